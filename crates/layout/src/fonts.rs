//! Text metrics sources for measurement and surface text layout.
//!
//! - `StandardMetrics`: built-in width tables for the PDF base fonts, no font files needed.
//! - `FixedMetrics`: constant advance and line height, independent of the font.
//! - `FaceMetrics`: registered TrueType/OpenType faces shaped with rustybuzz.
//!   With the `system-fonts` feature, faces can also be discovered through fontdb.
//!
//! Unknown families never fail: they resolve to the default Helvetica metrics.

use reptile_style::FontSpec;
use reptile_traits::TextMetrics;
use rustybuzz::UnicodeBuffer;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockWriteGuard};
use thiserror::Error;

/// Helvetica advance widths (1/1000 em) for the printable ASCII range 32..=126.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold advance widths (1/1000 em) for 32..=126.
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

const COURIER_WIDTH: u16 = 600;
const FALLBACK_WIDTH: u16 = 556;
const LINE_SPACING: f32 = 1.15;
const BASELINE: f32 = 0.83;

fn is_monospace_family(family: &str) -> bool {
    let family = family.to_lowercase();
    family.starts_with("courier") || family.contains("mono")
}

/// Metrics of the PDF standard fonts, computed from built-in width tables.
///
/// Helvetica widths cover every proportional family; Courier and "mono"
/// families use a fixed 600/1000 em advance.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardMetrics;

impl StandardMetrics {
    pub fn new() -> Self {
        Self
    }

    fn char_width(c: char, font: &FontSpec) -> u16 {
        if is_monospace_family(&font.family) {
            return COURIER_WIDTH;
        }
        let table = if font.bold {
            &HELVETICA_BOLD_WIDTHS
        } else {
            &HELVETICA_WIDTHS
        };
        match c as u32 {
            code @ 32..=126 => table[(code - 32) as usize],
            _ => FALLBACK_WIDTH,
        }
    }
}

impl TextMetrics for StandardMetrics {
    fn advance(&self, text: &str, font: &FontSpec) -> f32 {
        let units: u32 = text
            .chars()
            .map(|c| u32::from(Self::char_width(c, font)))
            .sum();
        units as f32 * font.effective_size() / 1000.0
    }

    fn line_height(&self, font: &FontSpec) -> f32 {
        font.effective_size() * LINE_SPACING
    }

    fn ascent(&self, font: &FontSpec) -> f32 {
        font.effective_size() * BASELINE
    }

    fn name(&self) -> &'static str {
        "StandardMetrics"
    }
}

/// Constant per-character advance and line height in points, whatever the font.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMetrics {
    pub char_width: f32,
    pub line_height: f32,
}

impl FixedMetrics {
    pub fn new(char_width: f32, line_height: f32) -> Self {
        Self {
            char_width,
            line_height,
        }
    }
}

impl TextMetrics for FixedMetrics {
    fn advance(&self, text: &str, _font: &FontSpec) -> f32 {
        text.chars().count() as f32 * self.char_width
    }

    fn line_height(&self, _font: &FontSpec) -> f32 {
        self.line_height
    }

    fn ascent(&self, _font: &FontSpec) -> f32 {
        self.line_height * BASELINE
    }

    fn name(&self) -> &'static str {
        "FixedMetrics"
    }
}

#[derive(Error, Debug)]
pub enum FontError {
    #[error("Font data for '{family}' could not be parsed: {message}")]
    InvalidFontData { family: String, message: String },

    #[error("Face registry lock was poisoned")]
    RegistryPoisoned,
}

/// A thread-safe handle to font data with rustybuzz Face creation.
pub struct FontInstance {
    pub data: Arc<Vec<u8>>,
    pub index: u32,
}

impl std::fmt::Debug for FontInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontInstance")
            .field("data_len", &self.data.len())
            .field("index", &self.index)
            .finish()
    }
}

impl FontInstance {
    pub fn new(data: Arc<Vec<u8>>, index: u32) -> Self {
        Self { data, index }
    }

    /// Creates a lightweight Face view over the font data.
    /// This is cheap (parsing header) and avoids self-referential struct issues.
    pub fn as_face(&self) -> Option<rustybuzz::Face<'_>> {
        rustybuzz::Face::from_slice(&self.data, self.index)
    }
}

/// Key for the face cache.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct FaceKey {
    family: String,
    bold: bool,
    italic: bool,
}

impl FaceKey {
    fn new(family: &str, bold: bool, italic: bool) -> Self {
        Self {
            family: family.to_lowercase(),
            bold,
            italic,
        }
    }

    fn for_font(font: &FontSpec) -> Self {
        Self::new(&font.family, font.bold, font.italic)
    }
}

/// Metrics read from real font files.
///
/// Faces are looked up by (family, bold, italic). A bold or italic request
/// without a matching face falls back to the regular face of the family, then
/// to `StandardMetrics`.
#[derive(Clone)]
pub struct FaceMetrics {
    faces: Arc<RwLock<HashMap<FaceKey, Arc<FontInstance>>>>,
    fallback: StandardMetrics,
    #[cfg(feature = "system-fonts")]
    db: Option<Arc<fontdb::Database>>,
}

impl std::fmt::Debug for FaceMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.faces.read().map(|faces| faces.len()).unwrap_or(0);
        f.debug_struct("FaceMetrics").field("faces", &count).finish()
    }
}

impl Default for FaceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl FaceMetrics {
    pub fn new() -> Self {
        Self {
            faces: Arc::new(RwLock::new(HashMap::new())),
            fallback: StandardMetrics,
            #[cfg(feature = "system-fonts")]
            db: None,
        }
    }

    /// Enables system font discovery (native platforms only).
    ///
    /// Only available with the `system-fonts` feature enabled.
    #[cfg(feature = "system-fonts")]
    pub fn with_system_fonts(mut self) -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        log::debug!("Loaded {} system font faces", db.len());
        self.db = Some(Arc::new(db));
        self
    }

    /// Registers a face for a family and style.
    pub fn register(
        &self,
        family: &str,
        bold: bool,
        italic: bool,
        data: Vec<u8>,
    ) -> Result<(), FontError> {
        if let Err(e) = ttf_parser::Face::parse(&data, 0) {
            return Err(FontError::InvalidFontData {
                family: family.to_string(),
                message: e.to_string(),
            });
        }
        let instance = Arc::new(FontInstance::new(Arc::new(data), 0));
        let mut faces = self.write_faces()?;
        faces.insert(FaceKey::new(family, bold, italic), instance);
        log::debug!(
            "Registered face '{}' (bold: {}, italic: {}); {} faces total",
            family,
            bold,
            italic,
            faces.len()
        );
        Ok(())
    }

    fn write_faces(
        &self,
    ) -> Result<RwLockWriteGuard<'_, HashMap<FaceKey, Arc<FontInstance>>>, FontError> {
        self.faces.write().map_err(|_| {
            log::warn!("Failed to acquire write lock on face registry");
            FontError::RegistryPoisoned
        })
    }

    pub fn face_count(&self) -> usize {
        self.faces.read().map(|faces| faces.len()).unwrap_or(0)
    }

    fn cached(&self, key: &FaceKey) -> Option<Arc<FontInstance>> {
        self.faces.read().ok()?.get(key).cloned()
    }

    fn resolve(&self, font: &FontSpec) -> Option<Arc<FontInstance>> {
        let key = FaceKey::for_font(font);
        if let Some(instance) = self.cached(&key) {
            return Some(instance);
        }
        if let Some(instance) = self.load_from_system(font) {
            if let Ok(mut faces) = self.write_faces() {
                faces.insert(key, instance.clone());
            }
            return Some(instance);
        }
        self.cached(&FaceKey::new(&font.family, false, false))
    }

    #[cfg(feature = "system-fonts")]
    fn load_from_system(&self, font: &FontSpec) -> Option<Arc<FontInstance>> {
        let db = self.db.as_ref()?;
        let families = [fontdb::Family::Name(&font.family)];
        let query = fontdb::Query {
            families: &families,
            weight: if font.bold {
                fontdb::Weight::BOLD
            } else {
                fontdb::Weight::NORMAL
            },
            stretch: fontdb::Stretch::Normal,
            style: if font.italic {
                fontdb::Style::Italic
            } else {
                fontdb::Style::Normal
            },
        };
        let id = db.query(&query)?;
        let (data, index) = db.with_face_data(id, |data, index| (data.to_vec(), index))?;
        log::debug!("Loaded system face for '{}'", font.family);
        Some(Arc::new(FontInstance::new(Arc::new(data), index)))
    }

    #[cfg(not(feature = "system-fonts"))]
    fn load_from_system(&self, _font: &FontSpec) -> Option<Arc<FontInstance>> {
        None
    }

    fn scale(face: &rustybuzz::Face<'_>, font: &FontSpec) -> f32 {
        font.effective_size() / face.units_per_em().max(1) as f32
    }
}

impl TextMetrics for FaceMetrics {
    fn advance(&self, text: &str, font: &FontSpec) -> f32 {
        let Some(instance) = self.resolve(font) else {
            return self.fallback.advance(text, font);
        };
        let Some(face) = instance.as_face() else {
            return self.fallback.advance(text, font);
        };
        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(text);
        buffer.guess_segment_properties();
        let glyphs = rustybuzz::shape(&face, &[], buffer);
        let units: i32 = glyphs.glyph_positions().iter().map(|p| p.x_advance).sum();
        units as f32 * Self::scale(&face, font)
    }

    fn line_height(&self, font: &FontSpec) -> f32 {
        self.resolve(font)
            .and_then(|instance| {
                let face = instance.as_face()?;
                let units = i32::from(face.ascender()) - i32::from(face.descender())
                    + i32::from(face.line_gap());
                Some(units as f32 * Self::scale(&face, font))
            })
            .unwrap_or_else(|| self.fallback.line_height(font))
    }

    fn ascent(&self, font: &FontSpec) -> f32 {
        self.resolve(font)
            .and_then(|instance| {
                let face = instance.as_face()?;
                Some(f32::from(face.ascender()) * Self::scale(&face, font))
            })
            .unwrap_or_else(|| self.fallback.ascent(font))
    }

    fn name(&self) -> &'static str {
        "FaceMetrics"
    }
}
