//! Cyberface is an animated "cyberpunk" grid clock face, rendered once per frame.
//!
//! A frame is a cleared canvas with two mirrored perspective planes of scrolling grid lines, the
//! time as `HH MM SS` with every character popping in on its own schedule, and a radial
//! vignette multiplied over the whole picture. The entrance animation restarts whenever the host
//! reports the face as visible.
//!
//! - Build a [`CyberFace`] from a [`FaceConfig`] and a [`MillisClock`]
//! - Forward visibility changes through the returned [`VisibilityNotifier`]
//! - Call [`CyberFace::render`] on any [`Surface`], such as [`CpuCanvas`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod face;
pub(crate) mod render;

pub use crate::foundation::color::Rgba8;
pub use crate::foundation::core::{Affine, Canvas, Circle, Line, Point, Rect, Vec2};
pub use crate::foundation::error::{FaceError, FaceResult};

pub use crate::animation::clock::{ManualClock, MillisClock, SystemClock};
pub use crate::animation::ease::{Ease, ease_in_out_sine};
pub use crate::animation::progress::{ANIM_DURATION_MS, raw_progress};

pub use crate::face::config::{DigitsConfig, FaceConfig, GridConfig, VignetteConfig};
pub use crate::face::digits::{DigitAnimator, digit_origin, digit_scale, scale_coefficient};
pub use crate::face::planes::{
    GridPlaneDrawer, PlaneGeometry, horizon_top, plane_geometry, scroll_phase,
};
pub use crate::face::renderer::{CyberFace, FrameContext};
pub use crate::face::time_text::{TIME_PLACEHOLDER, format_epoch_millis, format_time};
pub use crate::face::vignette::{VignetteCompositor, gradient_stops};
pub use crate::face::visibility::{
    AnimationClock, VisibilityEvent, VisibilityNotifier, VisibilitySubscription,
    VisibilityTracker, visibility_channel,
};

pub use crate::render::cpu::{CpuCanvas, FrameRGBA};
pub use crate::render::recording::{ClipRegion, DrawCommand, RecordingSurface};
pub use crate::render::surface::{
    BlendMode, FillStyle, FontMetrics, GradientExtend, GradientStop, LineStyle, RadialGradient,
    Shader, Surface, TextStyle,
};
pub use crate::render::text::Typeface;
