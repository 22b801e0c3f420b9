use image::{ImageFormat, Rgba, RgbaImage};
use reptile::prepared::{
    PreparedBand, PreparedDocument, PreparedImage, PreparedObject, PreparedPage, PreparedText,
};
use reptile::style::{Border, BrushPattern, Fill, SizeMode, TextFlags};
use reptile::traits::{Surface, SurfaceError};
use reptile::types::{Bitmap, Color, Margins, Point, Rect, Size};
use reptile::DisplayList;
use std::io::Cursor;

/// An opaque PNG of the given pixel size.
pub fn png(width: u32, height: u32) -> Vec<u8> {
    let raster = RgbaImage::from_pixel(width, height, Rgba([0, 90, 160, 255]));
    let mut bytes = Cursor::new(Vec::new());
    raster
        .write_to(&mut bytes, ImageFormat::Png)
        .expect("encode png");
    bytes.into_inner()
}

/// A 210 x 297 page with 10 unit margins; A4 when lengths are millimeters.
pub fn a4_page() -> PreparedPage {
    PreparedPage::new(210.0, 297.0, Margins::all(10.0))
}

/// A single-page document: header band, a growable detail band and a footer.
pub fn invoice_document() -> PreparedDocument {
    let header = PreparedBand::new(30.0)
        .with_fill(Fill::solid(Color::gray(235)))
        .with_object(
            PreparedObject::text(0.0, 0.0, 120.0, 20.0, PreparedText::new("Invoice 2024-001"))
                .with_border(Border::all(1.0, Color::BLACK)),
        )
        .with_object(PreparedObject::image(150.0, 0.0, 30.0, 30.0, PreparedImage::new(png(32, 32), SizeMode::Center)));

    let detail = PreparedBand::new(20.0).growable(true).with_object(PreparedObject::text(
        0.0,
        0.0,
        60.0,
        20.0,
        PreparedText::new("one two three four five six seven eight nine ten")
            .wrapped(true)
            .can_grow(true),
    ));

    let footer = PreparedBand::new(15.0)
        .with_fill(Fill::with_pattern(Color::gray(200), BrushPattern::Cross))
        .with_object(PreparedObject::text(
            0.0,
            0.0,
            100.0,
            15.0,
            PreparedText::new("Total: <b>12.00</b> EUR").rich(true),
        ));

    PreparedDocument::new(vec![
        a4_page().with_band(header).with_band(detail).with_band(footer),
    ])
}

/// A display list that fails chosen calls and counts the lifecycle.
#[derive(Default)]
pub struct FailingSurface {
    pub inner: DisplayList,
    pub fail_on_begin: bool,
    pub fail_on_new_page: bool,
    pub begins: usize,
    pub ends: usize,
}

impl Surface for FailingSurface {
    fn begin_document(&mut self) -> Result<(), SurfaceError> {
        self.begins += 1;
        if self.fail_on_begin {
            return Err(SurfaceError::Backend("printer offline".into()));
        }
        self.inner.begin_document()
    }

    fn begin_page(&mut self, size: Size) -> Result<(), SurfaceError> {
        self.inner.begin_page(size)
    }

    fn new_page(&mut self, size: Size) -> Result<(), SurfaceError> {
        if self.fail_on_new_page {
            return Err(SurfaceError::Backend("paper jam".into()));
        }
        self.inner.new_page(size)
    }

    fn end_document(&mut self) -> Result<(), SurfaceError> {
        self.ends += 1;
        self.inner.end_document()
    }

    fn fill_rect(&mut self, rect: Rect, color: &Color, pattern: BrushPattern) -> Result<(), SurfaceError> {
        self.inner.fill_rect(rect, color, pattern)
    }

    fn draw_text(
        &mut self,
        rect: Rect,
        flags: TextFlags,
        text: &str,
        font: &reptile::style::FontSpec,
    ) -> Result<(), SurfaceError> {
        self.inner.draw_text(rect, flags, text, font)
    }

    fn draw_rich_text(
        &mut self,
        rect: Rect,
        markup: &str,
        font: &reptile::style::FontSpec,
        align: reptile::style::HAlign,
    ) -> Result<(), SurfaceError> {
        self.inner.draw_rich_text(rect, markup, font, align)
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: &reptile::style::Stroke) -> Result<(), SurfaceError> {
        self.inner.draw_line(from, to, stroke)
    }

    fn draw_image(&mut self, rect: Rect, bitmap: &Bitmap) -> Result<(), SurfaceError> {
        self.inner.draw_image(rect, bitmap)
    }

    fn name(&self) -> &'static str {
        "FailingSurface"
    }
}
