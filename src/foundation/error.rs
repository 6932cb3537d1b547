/// Convenience result type used across the crate.
pub type FaceResult<T> = Result<T, FaceError>;

/// Error taxonomy for construction-time failures.
///
/// Per-frame drawing is infallible; these errors surface only while building a face, loading a
/// typeface, allocating a raster canvas or reading a frame back.
#[derive(thiserror::Error, Debug)]
pub enum FaceError {
    /// Invalid configuration values.
    #[error("configuration error: {0}")]
    Config(String),

    /// A font or other drawing resource could not be built.
    #[error("resource error: {0}")]
    Resource(String),

    /// Raster backend failures (allocation, readback).
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FaceError {
    /// Build a [`FaceError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`FaceError::Resource`] value.
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }

    /// Build a [`FaceError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
