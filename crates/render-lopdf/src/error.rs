use reptile_traits::SurfaceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Internal PDF library error: {0}")]
    Lopdf(#[from] lopdf::Error),
}

impl From<PdfError> for SurfaceError {
    fn from(err: PdfError) -> Self {
        match err {
            PdfError::Io(err) => SurfaceError::Io(err),
            other => SurfaceError::Backend(other.to_string()),
        }
    }
}
