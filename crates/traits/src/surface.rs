//! The abstract paint target.
//!
//! A `Surface` receives primitive drawing calls in document units with a
//! top-left origin. Every call carries its own color, stroke and font; a
//! surface keeps no pen or brush state between calls.

use reptile_style::{BrushPattern, FontSpec, HAlign, Stroke, TextFlags};
use reptile_types::{Bitmap, Color, Point, Rect, Size};
use thiserror::Error;

/// A failure of the output device itself. Fatal for the running export.
#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Surface is not open")]
    NotOpen,

    #[error("Surface is already open")]
    AlreadyOpen,

    #[error("No page has been started")]
    NoPage,

    #[error("Backend error: {0}")]
    Backend(String),
}

/// A paint target: screen, raster image, or paginated print/PDF output.
///
/// Lifecycle: `begin_document` once, `begin_page` for the first page,
/// `new_page` for every following page, `end_document` once.
pub trait Surface {
    fn begin_document(&mut self) -> Result<(), SurfaceError>;

    fn begin_page(&mut self, size: Size) -> Result<(), SurfaceError>;

    fn new_page(&mut self, size: Size) -> Result<(), SurfaceError>;

    fn end_document(&mut self) -> Result<(), SurfaceError>;

    fn fill_rect(&mut self, rect: Rect, color: &Color, pattern: BrushPattern)
    -> Result<(), SurfaceError>;

    fn draw_text(
        &mut self,
        rect: Rect,
        flags: TextFlags,
        text: &str,
        font: &FontSpec,
    ) -> Result<(), SurfaceError>;

    /// Draws rich markup laid out to the width of `rect` with no inner margin.
    fn draw_rich_text(
        &mut self,
        rect: Rect,
        markup: &str,
        font: &FontSpec,
        align: HAlign,
    ) -> Result<(), SurfaceError>;

    fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke) -> Result<(), SurfaceError>;

    fn draw_image(&mut self, rect: Rect, bitmap: &Bitmap) -> Result<(), SurfaceError>;

    /// Returns a human-readable name for this surface (for logging/debugging).
    fn name(&self) -> &'static str;
}
