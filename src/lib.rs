//! Reptile: renders prepared reports onto paginated output surfaces.
//!
//! A prepared document (pages of bands of positioned objects) is composed into
//! physical pages by the layout crate, then painted page by page onto any
//! [`Surface`] by the output driver. PDF output is built in.
//!
//! ```no_run
//! use reptile::{PipelineBuilder, PreparedDocument};
//!
//! # fn main() -> Result<(), reptile::PipelineError> {
//! let document = PreparedDocument::from_json(r#"{"pages": []}"#)?;
//! let pipeline = PipelineBuilder::new().with_pdf_title("Invoice").build();
//! pipeline.export_pdf_file(&document, "invoice.pdf")?;
//! # Ok(())
//! # }
//! ```

mod error;
mod pipeline;

pub use error::PipelineError;
pub use pipeline::{PipelineBuilder, ReportPipeline};

pub use reptile_layout as layout;
pub use reptile_prepared as prepared;
pub use reptile_render_core as render;
pub use reptile_render_lopdf as pdf;
pub use reptile_style as style;
pub use reptile_traits as traits;
pub use reptile_types as types;

pub use reptile_layout::{ComposedPage, LayoutConfig, LayoutError, PaginationPolicy};
pub use reptile_prepared::PreparedDocument;
pub use reptile_render_core::{
    CancellationToken, DisplayList, DrawCommand, ExportError, ExportReport, OutputDriver,
};
pub use reptile_render_lopdf::PdfSurface;
pub use reptile_traits::{Surface, SurfaceError, TextMetrics};
pub use reptile_types::Unit;
