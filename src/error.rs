use reptile_layout::LayoutError;
use reptile_render_core::ExportError;
use reptile_traits::SurfaceError;
use thiserror::Error;

/// A comprehensive error type for the whole compose-and-export pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid prepared document: {0}")]
    Json(#[from] serde_json::Error),
}
