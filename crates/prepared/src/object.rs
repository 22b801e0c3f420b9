use crate::SharedData;
use reptile_style::{Border, Fill, FontSpec, HAlign, SizeMode, VAlign};
use reptile_types::Rect;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A positioned object inside a band. `left`/`top` are relative to the band origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedObject {
    #[serde(default)]
    pub left: f32,
    #[serde(default)]
    pub top: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub border: Option<Border>,
    #[serde(default)]
    pub fill: Option<Fill>,
    #[serde(flatten)]
    pub content: ObjectContent,
}

impl PreparedObject {
    pub fn new(left: f32, top: f32, width: f32, height: f32, content: ObjectContent) -> Self {
        Self {
            left,
            top,
            width,
            height,
            border: None,
            fill: None,
            content,
        }
    }

    pub fn text(left: f32, top: f32, width: f32, height: f32, text: PreparedText) -> Self {
        Self::new(left, top, width, height, ObjectContent::Text(text))
    }

    pub fn image(left: f32, top: f32, width: f32, height: f32, image: PreparedImage) -> Self {
        Self::new(left, top, width, height, ObjectContent::Image(image))
    }

    pub fn barcode(left: f32, top: f32, width: f32, height: f32, barcode: PreparedBarcode) -> Self {
        Self::new(left, top, width, height, ObjectContent::Barcode(barcode))
    }

    pub fn with_border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn kind(&self) -> ObjectKind {
        self.content.kind()
    }

    /// Declared geometry in the band frame.
    pub fn rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.width, self.height)
    }
}

/// The kind-specific payload of an object, tagged by `type` in serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObjectContent {
    Text(PreparedText),
    Image(PreparedImage),
    Barcode(PreparedBarcode),
    /// Any tag this model does not know. Rejected when the document is composed.
    #[serde(other)]
    Unsupported,
}

impl ObjectContent {
    pub fn kind(&self) -> ObjectKind {
        match self {
            ObjectContent::Text(_) => ObjectKind::Text,
            ObjectContent::Image(_) => ObjectKind::Image,
            ObjectContent::Barcode(_) => ObjectKind::Barcode,
            ObjectContent::Unsupported => ObjectKind::Unsupported,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Text,
    Image,
    Barcode,
    Unsupported,
}

impl ObjectKind {
    pub fn name(&self) -> &'static str {
        match self {
            ObjectKind::Text => "text",
            ObjectKind::Image => "image",
            ObjectKind::Barcode => "barcode",
            ObjectKind::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inner spacing between a text object's border and its text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub x: f32,
    pub y: f32,
}

impl Default for Padding {
    fn default() -> Self {
        Self { x: 2.0, y: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreparedText {
    pub text: Option<String>,
    pub font: FontSpec,
    pub h_align: HAlign,
    pub v_align: VAlign,
    pub word_wrap: bool,
    /// The text is rich markup rather than plain text.
    pub allow_tags: bool,
    pub can_grow: bool,
    pub can_shrink: bool,
    pub auto_width: bool,
    pub padding: Padding,
}

impl PreparedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn with_font(mut self, font: FontSpec) -> Self {
        self.font = font;
        self
    }

    pub fn aligned(mut self, h_align: HAlign, v_align: VAlign) -> Self {
        self.h_align = h_align;
        self.v_align = v_align;
        self
    }

    pub fn wrapped(mut self, word_wrap: bool) -> Self {
        self.word_wrap = word_wrap;
        self
    }

    pub fn rich(mut self, allow_tags: bool) -> Self {
        self.allow_tags = allow_tags;
        self
    }

    pub fn can_grow(mut self, value: bool) -> Self {
        self.can_grow = value;
        self
    }

    pub fn can_shrink(mut self, value: bool) -> Self {
        self.can_shrink = value;
        self
    }

    pub fn auto_width(mut self, value: bool) -> Self {
        self.auto_width = value;
        self
    }

    pub fn with_padding(mut self, x: f32, y: f32) -> Self {
        self.padding = Padding { x, y };
        self
    }

    /// Whether the realized size depends on measuring the text.
    pub fn is_dynamic(&self) -> bool {
        self.can_grow || self.can_shrink || self.auto_width
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedImage {
    #[serde(default)]
    pub picture: SharedData,
    #[serde(default)]
    pub size_mode: SizeMode,
}

impl PreparedImage {
    pub fn new(picture: Vec<u8>, size_mode: SizeMode) -> Self {
        Self {
            picture: Arc::new(picture),
            size_mode,
        }
    }
}

fn center() -> SizeMode {
    SizeMode::Center
}

/// A barcode whose symbol was already rasterized upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedBarcode {
    #[serde(default)]
    pub picture: SharedData,
    #[serde(default = "center")]
    pub size_mode: SizeMode,
    /// The encoded value, kept for diagnostics.
    #[serde(default)]
    pub code: Option<String>,
}

impl PreparedBarcode {
    pub fn new(picture: Vec<u8>, code: Option<String>) -> Self {
        Self {
            picture: Arc::new(picture),
            size_mode: SizeMode::Center,
            code,
        }
    }
}
