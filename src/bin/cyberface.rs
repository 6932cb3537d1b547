use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use chrono::{DateTime, FixedOffset, TimeDelta};
use clap::{ArgAction, Args, Parser, Subcommand};
use cyberface::{Canvas, CpuCanvas, CyberFace, FaceConfig, FrameRGBA, ManualClock, Typeface};

#[derive(Parser, Debug)]
#[command(name = "cyberface", version)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render the entrance animation as numbered PNGs at the interactive frame rate.
    Sequence(SequenceArgs),
}

#[derive(Args, Debug)]
struct FaceArgs {
    /// Font used for the time digits.
    #[arg(long)]
    font: PathBuf,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 450)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 450)]
    height: u32,

    /// Wall-clock time to show, RFC 3339. Defaults to now.
    #[arg(long)]
    at: Option<String>,

    /// Face style JSON.
    #[arg(long)]
    style: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    face: FaceArgs,

    /// Milliseconds since the face became visible.
    #[arg(long, default_value_t = 1000)]
    elapsed_ms: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct SequenceArgs {
    #[command(flatten)]
    face: FaceArgs,

    /// Number of frames to render.
    #[arg(long, default_value_t = 75)]
    frames: u32,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sequence(args) => cmd_sequence(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// A face driven by a manual clock that starts at the shown time and has just become visible.
struct Session {
    face: CyberFace,
    clock: Arc<ManualClock>,
    canvas: CpuCanvas,
    bounds: Canvas,
    start: DateTime<FixedOffset>,
    start_ms: u64,
}

impl Session {
    fn open(args: &FaceArgs) -> anyhow::Result<Self> {
        let config = match &args.style {
            Some(path) => FaceConfig::from_path(path)?,
            None => FaceConfig::default(),
        };
        let typeface = Typeface::from_path(&args.font)?;
        let bounds = Canvas::new(args.width, args.height);
        let canvas = CpuCanvas::with_typeface(bounds, &typeface)?;

        let start = match &args.at {
            Some(s) => DateTime::parse_from_rfc3339(s)
                .with_context(|| format!("parse --at '{s}' as RFC 3339"))?,
            None => chrono::Local::now().fixed_offset(),
        };
        let start_ms = u64::try_from(start.timestamp_millis()).unwrap_or(0);

        let clock = Arc::new(ManualClock::new(start_ms));
        let (face, notifier) = CyberFace::new(config, clock.clone())?;
        notifier.set_visible(true);

        Ok(Self {
            face,
            clock,
            canvas,
            bounds,
            start,
            start_ms,
        })
    }

    fn render_at(&mut self, elapsed_ms: u64) -> anyhow::Result<FrameRGBA> {
        self.clock.set(self.start_ms.saturating_add(elapsed_ms));
        let shown = i64::try_from(elapsed_ms)
            .ok()
            .and_then(TimeDelta::try_milliseconds)
            .and_then(|d| self.start.checked_add_signed(d))
            .unwrap_or(self.start);
        self.face.render(&mut self.canvas, self.bounds, &shown);
        Ok(self.canvas.finish()?)
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut session = Session::open(&args.face)?;
    let frame = session.render_at(args.elapsed_ms)?;
    write_png(&args.out, &frame)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    let mut session = Session::open(&args.face)?;
    let step_ms = session.face.config().interactive_frame_ms;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    for i in 0..args.frames {
        let frame = session.render_at(u64::from(i) * step_ms)?;
        let out = args.out_dir.join(format!("frame_{i:04}.png"));
        write_png(&out, &frame)?;
    }

    eprintln!(
        "wrote {} frames to {}",
        args.frames,
        args.out_dir.display()
    );
    Ok(())
}

fn write_png(path: &Path, frame: &FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}
