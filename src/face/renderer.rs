use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeZone};

use crate::animation::clock::MillisClock;
use crate::animation::progress::raw_progress;
use crate::face::config::FaceConfig;
use crate::face::digits::DigitAnimator;
use crate::face::planes::GridPlaneDrawer;
use crate::face::time_text::format_time;
use crate::face::vignette::VignetteCompositor;
use crate::face::visibility::{VisibilityNotifier, VisibilityTracker, visibility_channel};
use crate::foundation::core::Canvas;
use crate::foundation::error::FaceResult;
use crate::render::surface::Surface;

/// Inputs of a single frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameContext {
    /// Frame clock reading in milliseconds.
    pub now_ms: u64,
    /// Drawable bounds.
    pub canvas: Canvas,
    /// Formatted `"HH MM SS"` time.
    pub time_text: String,
}

/// The animated grid clock face.
///
/// Each frame clears the canvas, then draws the grid planes, the time digits and the vignette,
/// in that order. The entrance animation restarts every time the host reports the face as
/// visible through the [`VisibilityNotifier`] returned by [`CyberFace::new`].
pub struct CyberFace {
    config: FaceConfig,
    clock: Arc<dyn MillisClock>,
    tracker: VisibilityTracker,
    planes: GridPlaneDrawer,
    digits: DigitAnimator,
    vignette: VignetteCompositor,
    destroyed: bool,
}

impl std::fmt::Debug for CyberFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CyberFace")
            .field("config", &self.config)
            .field("tracker", &self.tracker)
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}

impl CyberFace {
    /// Validate `config`, build the drawers and subscribe to visibility changes.
    ///
    /// The entrance animation starts at construction time, as if the face had just become
    /// visible.
    #[tracing::instrument(skip(config, clock))]
    pub fn new(
        config: FaceConfig,
        clock: Arc<dyn MillisClock>,
    ) -> FaceResult<(Self, VisibilityNotifier)> {
        config.validate()?;

        let (notifier, subscription) = visibility_channel(Arc::clone(&clock));
        let now_ms = clock.now_ms();
        let face = Self {
            planes: GridPlaneDrawer::new(&config.grid, config.entrance_duration_ms),
            digits: DigitAnimator::new(&config.digits),
            vignette: VignetteCompositor::new(&config.vignette),
            tracker: VisibilityTracker::new(subscription, now_ms),
            clock,
            config,
            destroyed: false,
        };
        tracing::debug!(now_ms, "cyber face created");
        Ok((face, notifier))
    }

    /// Configuration the face was built with.
    pub fn config(&self) -> &FaceConfig {
        &self.config
    }

    /// Render one frame for the host-supplied `time`, reading "now" from the face clock.
    pub fn render<Tz>(&mut self, surface: &mut dyn Surface, bounds: Canvas, time: &DateTime<Tz>)
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let frame = FrameContext {
            now_ms: self.clock.now_ms(),
            canvas: bounds,
            time_text: format_time(time),
        };
        self.render_frame(surface, &frame);
    }

    /// Render one frame from explicit inputs.
    ///
    /// Pending visibility events are applied first. Empty bounds draw nothing.
    pub fn render_frame(&mut self, surface: &mut dyn Surface, frame: &FrameContext) {
        if self.destroyed {
            tracing::warn!("render called after the face was destroyed");
            return;
        }

        self.tracker.pump(frame.now_ms);

        let canvas = frame.canvas;
        if canvas.is_empty() {
            tracing::trace!(
                width = canvas.width,
                height = canvas.height,
                "skipping empty frame"
            );
            return;
        }

        let progress = self.progress_at(frame.now_ms);
        tracing::debug!(now_ms = frame.now_ms, progress, "render frame");

        surface.clear(self.config.background);
        self.planes.draw(surface, canvas, progress, frame.now_ms);
        self.digits.draw(
            surface,
            canvas,
            progress,
            self.tracker.clock().last_visible_ms(),
            &frame.time_text,
        );
        self.vignette.draw(surface, canvas, progress);
    }

    /// Eased entrance progress at `now_ms`, without applying pending visibility events.
    pub fn progress_at(&self, now_ms: u64) -> f64 {
        let elapsed = self.tracker.clock().elapsed_ms(now_ms);
        self.config
            .ease
            .apply(raw_progress(elapsed, self.config.entrance_duration_ms))
    }

    /// Timestamp of the most recent hidden-to-visible transition applied so far.
    pub fn last_visible_ms(&self) -> u64 {
        self.tracker.clock().last_visible_ms()
    }

    /// Last visibility state applied so far.
    pub fn is_visible(&self) -> bool {
        self.tracker.is_visible()
    }

    /// Frame interval the host should pump at while interactive.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.config.interactive_frame_ms)
    }

    /// `true` once [`CyberFace::destroy`] has run.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Unsubscribe from visibility changes. Only the first call does anything.
    pub fn destroy(&mut self) -> bool {
        if !self.tracker.release() {
            return false;
        }
        self.destroyed = true;
        tracing::info!("cyber face destroyed");
        true
    }
}

impl Drop for CyberFace {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/face/renderer.rs"]
mod tests;
