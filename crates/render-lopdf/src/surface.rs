use crate::error::PdfError;
use crate::fonts::{base_font, to_win_ansi};
use crate::page::PageContext;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use reptile_layout::StandardMetrics;
use reptile_layout::text::{TextMeasurer, parse_markup, wrap_rich};
use reptile_style::{BrushPattern, FontSpec, HAlign, Stroke, TextFlags};
use reptile_style::text::{align_offset, valign_offset};
use reptile_traits::{Surface, SurfaceError, TextMetrics};
use reptile_types::{Bitmap, Color, Point, Rect, Size, Unit};
use std::collections::BTreeMap;
use std::io::Write;
use std::sync::Arc;

const UNDERLINE_OFFSET: f32 = 1.5;
const UNDERLINE_WIDTH: f32 = 0.5;

/// Resource names of the standard fonts used so far.
#[derive(Default)]
struct FontResources {
    names: BTreeMap<&'static str, String>,
}

impl FontResources {
    fn resource(&mut self, font: &FontSpec) -> String {
        let base = base_font(font);
        let next = self.names.len() + 1;
        self.names
            .entry(base)
            .or_insert_with(|| format!("F{}", next))
            .clone()
    }

    fn dictionary(&self) -> Dictionary {
        let mut fonts = Dictionary::new();
        for (base, name) in &self.names {
            fonts.set(
                name.as_bytes(),
                dictionary! {
                    "Type" => "Font",
                    "Subtype" => "Type1",
                    "BaseFont" => *base,
                    "Encoding" => "WinAnsiEncoding",
                },
            );
        }
        fonts
    }
}

struct OpenDocument {
    document: Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
    fonts: FontResources,
    images: Vec<(String, ObjectId)>,
    page: Option<PageContext>,
}

impl OpenDocument {
    fn new() -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        let resources_id = document.new_object_id();
        Self {
            document,
            pages_id,
            resources_id,
            page_ids: Vec::new(),
            fonts: FontResources::default(),
            images: Vec::new(),
            page: None,
        }
    }

    fn flush_page(&mut self) -> Result<(), PdfError> {
        let Some(page) = self.page.take() else {
            return Ok(());
        };
        let (width, height) = (page.width, page.height);
        let content = page.finish();
        let content_id = self
            .document
            .add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = self.document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.0.into(), 0.0.into(), width.into(), height.into()],
            "Contents" => content_id,
            "Resources" => self.resources_id,
        });
        self.page_ids.push(page_id);
        Ok(())
    }

    fn start_page(&mut self, size: Size) -> Result<(), PdfError> {
        self.flush_page()?;
        self.page = Some(PageContext::new(size.width, size.height));
        Ok(())
    }

    fn add_image(&mut self, bitmap: &Bitmap) -> String {
        let (rgb, alpha) = bitmap.split_alpha();
        let mut dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(bitmap.width),
            "Height" => i64::from(bitmap.height),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        };
        if !bitmap.is_opaque() {
            let mask = Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => i64::from(bitmap.width),
                    "Height" => i64::from(bitmap.height),
                    "ColorSpace" => "DeviceGray",
                    "BitsPerComponent" => 8,
                },
                alpha,
            );
            let mask_id = self.document.add_object(mask);
            dict.set("SMask", mask_id);
        }
        let image_id = self.document.add_object(Stream::new(dict, rgb));
        let name = format!("Im{}", self.images.len() + 1);
        self.images.push((name.clone(), image_id));
        name
    }

    fn finish<W: Write>(mut self, title: Option<&str>, writer: &mut W) -> Result<usize, PdfError> {
        self.flush_page()?;

        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::from(*id)).collect();
        let page_count = kids.len();
        self.document.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count as i64,
            }),
        );

        let mut xobjects = Dictionary::new();
        for (name, id) in &self.images {
            xobjects.set(name.as_bytes(), *id);
        }
        self.document.objects.insert(
            self.resources_id,
            Object::Dictionary(dictionary! {
                "Font" => self.fonts.dictionary(),
                "XObject" => xobjects,
            }),
        );

        let catalog_id = self.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.document.trailer.set("Root", catalog_id);
        if let Some(title) = title {
            let info_id = self.document.add_object(dictionary! {
                "Title" => Object::string_literal(to_win_ansi(title)),
                "Producer" => Object::string_literal("reptile"),
            });
            self.document.trailer.set("Info", info_id);
        }

        self.document.compress();
        self.document.save_to(writer)?;
        Ok(page_count)
    }
}

/// A paginated PDF surface drawing with the standard-14 fonts.
///
/// Lengths arrive in the document unit and are converted to points here.
/// Font sizes are always points. The file is written on `end_document`.
pub struct PdfSurface<W: Write> {
    writer: W,
    unit: Unit,
    metrics: Arc<dyn TextMetrics>,
    title: Option<String>,
    document: Option<OpenDocument>,
    pages_written: usize,
}

impl<W: Write> PdfSurface<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            unit: Unit::Point,
            metrics: Arc::new(StandardMetrics::new()),
            title: None,
            document: None,
            pages_written: 0,
        }
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Metrics used to wrap and align text inside its rect.
    pub fn with_metrics(mut self, metrics: Arc<dyn TextMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Pages written by the last `end_document`.
    pub fn pages_written(&self) -> usize {
        self.pages_written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn pt(&self, value: f32) -> f32 {
        self.unit.to_points(value)
    }

    fn rect_pt(&self, rect: Rect) -> Rect {
        Rect::new(
            self.pt(rect.x),
            self.pt(rect.y),
            self.pt(rect.width),
            self.pt(rect.height),
        )
    }

    fn point_pt(&self, point: Point) -> Point {
        Point::new(self.pt(point.x), self.pt(point.y))
    }

    fn size_pt(&self, size: Size) -> Size {
        Size::new(self.pt(size.width), self.pt(size.height))
    }

    fn open(&mut self) -> Result<&mut OpenDocument, SurfaceError> {
        self.document.as_mut().ok_or(SurfaceError::NotOpen)
    }
}

fn current_page(page: &mut Option<PageContext>) -> Result<&mut PageContext, SurfaceError> {
    page.as_mut().ok_or(SurfaceError::NoPage)
}

impl<W: Write> Surface for PdfSurface<W> {
    fn begin_document(&mut self) -> Result<(), SurfaceError> {
        if self.document.is_some() {
            return Err(SurfaceError::AlreadyOpen);
        }
        self.document = Some(OpenDocument::new());
        Ok(())
    }

    fn begin_page(&mut self, size: Size) -> Result<(), SurfaceError> {
        let size = self.size_pt(size);
        self.open()?.start_page(size)?;
        Ok(())
    }

    fn new_page(&mut self, size: Size) -> Result<(), SurfaceError> {
        let size = self.size_pt(size);
        let document = self.open()?;
        if document.page.is_none() {
            return Err(SurfaceError::NoPage);
        }
        document.start_page(size)?;
        Ok(())
    }

    fn end_document(&mut self) -> Result<(), SurfaceError> {
        let document = self.document.take().ok_or(SurfaceError::NotOpen)?;
        let pages = document.finish(self.title.as_deref(), &mut self.writer)?;
        self.writer.flush()?;
        self.pages_written = pages;
        log::debug!("Wrote PDF with {} page(s)", pages);
        Ok(())
    }

    fn fill_rect(
        &mut self,
        rect: Rect,
        color: &Color,
        pattern: BrushPattern,
    ) -> Result<(), SurfaceError> {
        let rect = self.rect_pt(rect);
        let page = current_page(&mut self.open()?.page)?;
        page.fill_rect(&rect, color, pattern);
        Ok(())
    }

    fn draw_text(
        &mut self,
        rect: Rect,
        flags: TextFlags,
        text: &str,
        font: &FontSpec,
    ) -> Result<(), SurfaceError> {
        let rect = self.rect_pt(rect);
        let metrics = Arc::clone(&self.metrics);
        let measurer = TextMeasurer::new(metrics.as_ref(), Unit::Point);
        let block = measurer.measure(text, font, flags.word_wrap.then_some(rect.width));
        let ascent = measurer.ascent(font);
        let top = rect.y + valign_offset(flags.v_align, rect.height, block.size.height);

        let OpenDocument { fonts, page, .. } = self.open()?;
        let page = current_page(page)?;
        let resource = fonts.resource(font);
        page.save();
        page.clip(&rect);
        page.set_fill_color(&Color::BLACK);
        for (index, line) in block.lines.iter().enumerate() {
            if line.text.is_empty() {
                continue;
            }
            let x = rect.x + align_offset(flags.h_align, rect.width, line.width);
            let baseline = top + index as f32 * block.line_height + ascent;
            page.text(
                Point::new(x, baseline),
                &resource,
                font.effective_size(),
                to_win_ansi(&line.text),
            );
        }
        page.restore();
        Ok(())
    }

    fn draw_rich_text(
        &mut self,
        rect: Rect,
        markup: &str,
        font: &FontSpec,
        align: HAlign,
    ) -> Result<(), SurfaceError> {
        let rect = self.rect_pt(rect);
        let metrics = Arc::clone(&self.metrics);
        let items = parse_markup(markup);
        let lines = wrap_rich(&items, Some(rect.width), |style, text| {
            metrics.advance(text, &style.apply(font))
        });
        let line_height = metrics.line_height(font);
        let ascent = metrics.ascent(font);

        let OpenDocument { fonts, page, .. } = self.open()?;
        let page = current_page(page)?;
        page.save();
        page.clip(&rect);
        page.set_fill_color(&Color::BLACK);
        for (index, line) in lines.iter().enumerate() {
            let baseline = rect.y + index as f32 * line_height + ascent;
            let mut x = rect.x + align_offset(align, rect.width, line.width);
            for run in &line.runs {
                let run_font = run.style.apply(font);
                let width = metrics.advance(&run.text, &run_font);
                let resource = fonts.resource(&run_font);
                page.text(
                    Point::new(x, baseline),
                    &resource,
                    run_font.effective_size(),
                    to_win_ansi(&run.text),
                );
                if run.style.underline {
                    let y = baseline + UNDERLINE_OFFSET;
                    page.line(
                        Point::new(x, y),
                        Point::new(x + width, y),
                        &Stroke::new(Color::BLACK, UNDERLINE_WIDTH),
                    );
                }
                x += width;
            }
        }
        page.restore();
        Ok(())
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke) -> Result<(), SurfaceError> {
        let (from, to) = (self.point_pt(from), self.point_pt(to));
        let stroke = Stroke::new(stroke.color.clone(), self.pt(stroke.width));
        let page = current_page(&mut self.open()?.page)?;
        page.line(from, to, &stroke);
        Ok(())
    }

    fn draw_image(&mut self, rect: Rect, bitmap: &Bitmap) -> Result<(), SurfaceError> {
        let rect = self.rect_pt(rect);
        let document = self.open()?;
        if document.page.is_none() {
            return Err(SurfaceError::NoPage);
        }
        let name = document.add_image(bitmap);
        current_page(&mut document.page)?.image(&rect, &name);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "PdfSurface"
    }
}
