use crate::LayoutError;
use crate::text::{TextMeasurer, parse_markup, plain_text};
use reptile_prepared::{ObjectContent, Padding, PreparedObject, PreparedText};
use reptile_style::{Border, Fill, FontSpec, Stroke, TextFlags};
use reptile_types::{Point, Rect, Size};
use std::borrow::Cow;

/// Everything a text object needs to measure and paint itself.
/// Each renderer owns its own copy.
#[derive(Debug, Clone, PartialEq)]
pub struct TextConfig {
    pub text: Option<String>,
    /// `text` holds rich markup.
    pub rich: bool,
    pub font: FontSpec,
    pub flags: TextFlags,
    pub padding: Padding,
    pub border: Option<Border>,
    pub fill: Option<Fill>,
    pub can_grow: bool,
    pub can_shrink: bool,
    pub auto_width: bool,
}

impl TextConfig {
    pub fn new(text: &PreparedText, border: Option<Border>, fill: Option<Fill>) -> Self {
        Self {
            text: text.text.clone(),
            rich: text.allow_tags,
            font: text.font.clone(),
            flags: TextFlags::new(text.h_align, text.v_align, text.word_wrap),
            padding: text.padding,
            border,
            fill,
            can_grow: text.can_grow,
            can_shrink: text.can_shrink,
            auto_width: text.auto_width,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        self.can_grow || self.can_shrink || self.auto_width
    }

    pub fn border_width(&self) -> f32 {
        self.border.as_ref().map_or(0.0, Border::inset)
    }

    /// The text with markup stripped from rich text.
    pub fn plain_text(&self) -> Cow<'_, str> {
        match &self.text {
            None => Cow::Borrowed(""),
            Some(text) if self.rich => Cow::Owned(plain_text(&parse_markup(text))),
            Some(text) => Cow::Borrowed(text),
        }
    }

    /// Realized size of an object declared as `declared`.
    ///
    /// Static objects keep their declared size. Dynamic objects measure the
    /// text within `width - 2 * (padding.x + border)`, wrapping when
    /// `word_wrap` is set. Rich runs are measured in their styled fonts. The
    /// natural height is the text height plus twice the border width;
    /// `can_shrink` and `can_grow` adopt it in their direction only.
    /// `auto_width` sets the width to the measured box width plus twice the
    /// border width.
    pub fn calc_size(&self, declared: Size, measurer: &TextMeasurer<'_>) -> Size {
        if !self.is_dynamic() {
            return declared;
        }
        let bw = self.border_width();
        let inner_width = (declared.width - 2.0 * self.padding.x - 2.0 * bw).max(0.0);
        let max_width = self.flags.word_wrap.then_some(inner_width);

        let measured = match (&self.text, self.rich) {
            (Some(markup), true) => measurer.measure_rich(markup, &self.font, max_width),
            _ => measurer.measure(&self.plain_text(), &self.font, max_width).size,
        };
        let natural_height = measured.height + 2.0 * bw;

        let mut size = declared;
        if self.can_shrink && natural_height < declared.height {
            size.height = natural_height;
        }
        if self.can_grow && natural_height > declared.height {
            size.height = natural_height;
        }
        if self.auto_width {
            size.width = measured.width + 2.0 * bw;
        }
        size
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextRenderer {
    pub config: TextConfig,
    /// Size as declared in the prepared object, before measurement.
    pub declared: Size,
    /// Absolute rect in the page frame.
    pub rect: Rect,
}

impl TextRenderer {
    pub fn from_prepared(object: &PreparedObject, band_origin: Point) -> Result<Self, LayoutError> {
        let ObjectContent::Text(text) = &object.content else {
            return Err(LayoutError::RendererMismatch {
                expected: "text",
                found: object.kind(),
            });
        };
        let rect = object.rect().translate(band_origin.x, band_origin.y);
        Ok(Self {
            config: TextConfig::new(text, object.border.clone(), object.fill.clone()),
            declared: rect.size(),
            rect,
        })
    }

    pub fn calc_size(&self, measurer: &TextMeasurer<'_>) -> Size {
        self.config.calc_size(self.declared, measurer)
    }

    pub fn resize(&mut self, size: Size) {
        self.rect.width = size.width;
        self.rect.height = size.height;
    }

    /// The object rect inset by the border width on all four sides.
    pub fn content_rect(&self) -> Rect {
        self.rect.inset_uniform(self.config.border_width())
    }

    /// Where plain text is laid out: the content rect inset by the padding on
    /// the left and top.
    pub fn text_rect(&self) -> Rect {
        let padding = self.config.padding;
        self.content_rect().inset(padding.x, padding.y, 0.0, 0.0)
    }

    /// Flagged border edges of the un-inset rect, in left, top, right, bottom
    /// order. Empty when the border has no color.
    pub fn border_lines(&self) -> Vec<(Point, Point, Stroke)> {
        border_lines(self.config.border.as_ref(), &self.rect)
    }
}

pub(crate) fn border_lines(border: Option<&Border>, rect: &Rect) -> Vec<(Point, Point, Stroke)> {
    let Some(border) = border else {
        return Vec::new();
    };
    let Some(stroke) = border.stroke() else {
        return Vec::new();
    };
    border
        .edge_lines(rect)
        .into_iter()
        .map(|(_, from, to)| (from, to, stroke.clone()))
        .collect()
}
