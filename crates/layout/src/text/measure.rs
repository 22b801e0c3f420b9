use super::markup::{parse_markup, wrap_rich};
use super::wrapper::{wrap_lines, TextLine};
use reptile_style::FontSpec;
use reptile_traits::TextMetrics;
use reptile_types::{Size, Unit};

/// The wrapped lines of a text and the box they occupy, in document units.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<TextLine>,
    pub line_height: f32,
    pub size: Size,
}

/// Adapts a points-based `TextMetrics` to the document unit.
#[derive(Clone, Copy)]
pub struct TextMeasurer<'a> {
    metrics: &'a dyn TextMetrics,
    unit: Unit,
}

impl std::fmt::Debug for TextMeasurer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextMeasurer")
            .field("metrics", &self.metrics.name())
            .field("unit", &self.unit)
            .finish()
    }
}

impl<'a> TextMeasurer<'a> {
    pub fn new(metrics: &'a dyn TextMetrics, unit: Unit) -> Self {
        Self { metrics, unit }
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn advance(&self, text: &str, font: &FontSpec) -> f32 {
        self.unit.from_points(self.metrics.advance(text, font))
    }

    pub fn line_height(&self, font: &FontSpec) -> f32 {
        self.unit.from_points(self.metrics.line_height(font))
    }

    pub fn ascent(&self, font: &FontSpec) -> f32 {
        self.unit.from_points(self.metrics.ascent(font))
    }

    /// Bounding box of `text` wrapped to `max_width` (no wrapping when `None`).
    /// Empty text still occupies one line.
    pub fn measure(&self, text: &str, font: &FontSpec, max_width: Option<f32>) -> TextBlock {
        let lines = wrap_lines(text, font, max_width, self);
        let line_height = self.line_height(font);
        let width = lines.iter().map(|l| l.width).fold(0.0, f32::max);
        let height = lines.len().max(1) as f32 * line_height;
        TextBlock {
            lines,
            line_height,
            size: Size::new(width, height),
        }
    }

    /// Bounding box of rich `markup` wrapped to `max_width`. Each run is
    /// measured in its own styled font; lines advance by the base font's
    /// line height.
    pub fn measure_rich(&self, markup: &str, font: &FontSpec, max_width: Option<f32>) -> Size {
        let items = parse_markup(markup);
        let lines = wrap_rich(&items, max_width, |style, text| {
            self.advance(text, &style.apply(font))
        });
        let width = lines.iter().map(|l| l.width).fold(0.0, f32::max);
        Size::new(width, lines.len().max(1) as f32 * self.line_height(font))
    }
}
