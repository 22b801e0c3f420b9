//! Object renderers and the registry that picks one per object kind.

pub mod image;
pub mod text;

pub use self::image::ImageRenderer;
pub use self::text::{TextConfig, TextRenderer};

use crate::LayoutError;
use reptile_prepared::{ObjectKind, PreparedObject};
use reptile_types::{Point, Rect};
use std::collections::HashMap;

/// A renderer instantiated for one object, positioned in the page frame.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectRenderer {
    Text(TextRenderer),
    Image(ImageRenderer),
}

impl ObjectRenderer {
    pub fn rect(&self) -> Rect {
        match self {
            ObjectRenderer::Text(text) => text.rect,
            ObjectRenderer::Image(image) => image.rect,
        }
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            ObjectRenderer::Text(_) => ObjectKind::Text,
            ObjectRenderer::Image(image) => image.kind,
        }
    }

    pub fn move_by(&mut self, dx: f32, dy: f32) {
        match self {
            ObjectRenderer::Text(text) => text.rect = text.rect.translate(dx, dy),
            ObjectRenderer::Image(image) => image.rect = image.rect.translate(dx, dy),
        }
    }
}

/// Builds the renderer of an object whose band origin is the given point.
pub type RendererFactory = fn(&PreparedObject, Point) -> Result<ObjectRenderer, LayoutError>;

fn text_factory(object: &PreparedObject, origin: Point) -> Result<ObjectRenderer, LayoutError> {
    TextRenderer::from_prepared(object, origin).map(ObjectRenderer::Text)
}

fn image_factory(object: &PreparedObject, origin: Point) -> Result<ObjectRenderer, LayoutError> {
    ImageRenderer::from_prepared(object, origin).map(ObjectRenderer::Image)
}

/// Maps object kinds to renderer factories.
#[derive(Clone)]
pub struct RendererRegistry {
    factories: HashMap<ObjectKind, RendererFactory>,
}

impl std::fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<_> = self.factories.keys().map(ObjectKind::name).collect();
        kinds.sort_unstable();
        f.debug_struct("RendererRegistry").field("kinds", &kinds).finish()
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl RendererRegistry {
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Text objects get the text renderer; images and barcodes the image renderer.
    pub fn standard() -> Self {
        Self::empty()
            .register(ObjectKind::Text, text_factory)
            .register(ObjectKind::Image, image_factory)
            .register(ObjectKind::Barcode, image_factory)
    }

    pub fn register(mut self, kind: ObjectKind, factory: RendererFactory) -> Self {
        self.factories.insert(kind, factory);
        self
    }

    pub fn resolve(&self, kind: ObjectKind) -> Result<RendererFactory, LayoutError> {
        self.factories
            .get(&kind)
            .copied()
            .ok_or(LayoutError::NoRenderer(kind))
    }

    pub fn instantiate(
        &self,
        object: &PreparedObject,
        band_origin: Point,
    ) -> Result<ObjectRenderer, LayoutError> {
        let factory = self.resolve(object.kind())?;
        factory(object, band_origin)
    }
}
