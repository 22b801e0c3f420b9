//! PDF output surface using lopdf.
//!
//! `PdfSurface` implements the `Surface` trait on top of an in-memory lopdf
//! document and writes it out when the document ends.

mod error;
mod fonts;
mod page;
mod surface;

pub use error::PdfError;
pub use fonts::{base_font, to_win_ansi};
pub use surface::PdfSurface;
