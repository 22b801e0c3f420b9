//! Prepared Document Model
//! The read-only tree handed over by the upstream report resolver: pages, bands
//! and positioned objects whose values and geometry are already final, apart
//! from dynamic text auto-sizing.

mod object;

pub use object::{
    ObjectContent, ObjectKind, Padding, PreparedBarcode, PreparedImage, PreparedObject,
    PreparedText,
};

use reptile_style::Fill;
use reptile_types::{Margins, Size};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::sync::Arc;

/// A reference-counted container for shared, immutable data like images.
pub type SharedData = Arc<Vec<u8>>;

/// The root of a prepared report.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedDocument {
    #[serde(default)]
    pub pages: Vec<PreparedPage>,
}

impl PreparedDocument {
    pub fn new(pages: Vec<PreparedPage>) -> Self {
        Self { pages }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn object_count(&self) -> usize {
        self.pages
            .iter()
            .flat_map(|p| &p.bands)
            .map(|b| b.objects.len())
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedPage {
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub margin: Margins,
    #[serde(default)]
    pub bands: Vec<PreparedBand>,
}

impl PreparedPage {
    pub fn new(width: f32, height: f32, margin: Margins) -> Self {
        Self {
            width,
            height,
            margin,
            bands: Vec::new(),
        }
    }

    pub fn with_band(mut self, band: PreparedBand) -> Self {
        self.bands.push(band);
        self
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Width available to bands between the left and right margins.
    pub fn content_width(&self) -> f32 {
        self.width - self.margin.horizontal()
    }
}

/// A horizontal strip of positioned objects.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedBand {
    pub height: f32,
    /// Zero means "span the page content width".
    #[serde(default)]
    pub width: f32,
    /// Offset from the page content origin.
    #[serde(default)]
    pub left: f32,
    #[serde(default)]
    pub fill: Option<Fill>,
    /// Lets the band stretch to contain text objects that grow during measurement.
    #[serde(default)]
    pub can_grow: bool,
    #[serde(default)]
    pub objects: Vec<PreparedObject>,
}

impl PreparedBand {
    pub fn new(height: f32) -> Self {
        Self {
            height,
            ..Default::default()
        }
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn with_left(mut self, left: f32) -> Self {
        self.left = left;
        self
    }

    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn growable(mut self, can_grow: bool) -> Self {
        self.can_grow = can_grow;
        self
    }

    pub fn with_object(mut self, object: PreparedObject) -> Self {
        self.objects.push(object);
        self
    }
}
