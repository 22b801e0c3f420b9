use reptile_traits::SurfaceError;
use thiserror::Error;

/// A raster that could not be decoded. The object is skipped and the export
/// continues; the failure is reported as a warning.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Object {object} in band {band} on page {page} was skipped: {reason}")]
pub struct AssetError {
    pub page: usize,
    pub band: usize,
    pub object: usize,
    pub reason: String,
}

/// Failure while painting a single object.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error("Image decoding error: {0}")]
    Decode(String),
}

impl From<image::ImageError> for RenderError {
    fn from(err: image::ImageError) -> Self {
        RenderError::Decode(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum ExportErrorKind {
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error("Export was cancelled")]
    Cancelled,
}

/// A fatal export failure together with the number of pages fully painted
/// before it happened.
#[derive(Error, Debug)]
#[error("Export failed after {pages_committed} page(s): {kind}")]
pub struct ExportError {
    pub pages_committed: usize,
    #[source]
    pub kind: ExportErrorKind,
}

impl ExportError {
    pub fn surface(pages_committed: usize, err: SurfaceError) -> Self {
        Self {
            pages_committed,
            kind: ExportErrorKind::Surface(err),
        }
    }

    pub fn cancelled(pages_committed: usize) -> Self {
        Self {
            pages_committed,
            kind: ExportErrorKind::Cancelled,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.kind, ExportErrorKind::Cancelled)
    }
}
