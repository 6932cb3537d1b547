pub(crate) mod config;
pub(crate) mod digits;
pub(crate) mod planes;
pub(crate) mod renderer;
pub(crate) mod time_text;
pub(crate) mod vignette;
pub(crate) mod visibility;
