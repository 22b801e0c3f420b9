use super::text::border_lines;
use crate::LayoutError;
use reptile_prepared::{ObjectContent, ObjectKind, PreparedObject, SharedData};
use reptile_style::{Border, Fill, SizeMode, Stroke};
use reptile_types::{Point, Rect, Size};

/// Blits a raster into the object rect. Barcodes arrive already rasterized and
/// use this renderer too.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRenderer {
    pub picture: SharedData,
    pub size_mode: SizeMode,
    pub rect: Rect,
    pub border: Option<Border>,
    pub fill: Option<Fill>,
    /// `Image` or `Barcode`.
    pub kind: ObjectKind,
    /// The encoded barcode value, if any.
    pub code: Option<String>,
}

impl ImageRenderer {
    pub fn from_prepared(object: &PreparedObject, band_origin: Point) -> Result<Self, LayoutError> {
        let (picture, size_mode, code) = match &object.content {
            ObjectContent::Image(image) => (image.picture.clone(), image.size_mode, None),
            ObjectContent::Barcode(barcode) => (
                barcode.picture.clone(),
                barcode.size_mode,
                barcode.code.clone(),
            ),
            other => {
                return Err(LayoutError::RendererMismatch {
                    expected: "image",
                    found: other.kind(),
                });
            }
        };
        Ok(Self {
            picture,
            size_mode,
            rect: object.rect().translate(band_origin.x, band_origin.y),
            border: object.border.clone(),
            fill: object.fill.clone(),
            kind: object.kind(),
            code,
        })
    }

    /// Destination of a raster whose natural size is `natural` (document units).
    pub fn placement(&self, natural: Size) -> Rect {
        self.size_mode.place(self.rect, natural)
    }

    pub fn border_lines(&self) -> Vec<(Point, Point, Stroke)> {
        border_lines(self.border.as_ref(), &self.rect)
    }

    /// A short label for diagnostics.
    pub fn describe(&self) -> String {
        match &self.code {
            Some(code) => format!("{} '{}'", self.kind, code),
            None => self.kind.to_string(),
        }
    }
}
