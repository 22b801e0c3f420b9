//! Composition of prepared pages into positioned bands and object renderers.
//!
//! The page compositor walks the prepared bands with a running cursor and
//! starts continuation pages on overflow. The band compositor establishes each
//! band frame and instantiates one renderer per object, measuring auto-sized
//! text on the way. Nothing here paints.

use reptile_prepared::ObjectKind;
use thiserror::Error;

pub mod algorithms;
pub mod composed;
pub mod compositor;
pub mod config;
pub mod fonts;
pub mod renderers;
pub mod text;

pub use self::composed::{ComposedBand, ComposedObject, ComposedPage};
pub use self::compositor::{BandCompositor, BandLocation, PageCompositor, compose};
pub use self::config::{LayoutConfig, PaginationPolicy};
pub use self::fonts::{FaceMetrics, FixedMetrics, FontError, StandardMetrics};
pub use self::renderers::{
    ImageRenderer, ObjectRenderer, RendererFactory, RendererRegistry, TextConfig, TextRenderer,
};
pub use self::text::TextMeasurer;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Page {page} has an invalid size {width:.2} x {height:.2}.")]
    InvalidPageSize { page: usize, width: f32, height: f32 },

    #[error("Page {page} has margins that are negative or do not fit inside the page.")]
    MarginOutOfBounds { page: usize },

    #[error("Band {band} on page {page} has invalid geometry (height {height:.2}, width {width:.2}).")]
    InvalidBandGeometry {
        page: usize,
        band: usize,
        height: f32,
        width: f32,
    },

    #[error(
        "Object {object} in band {band} on page {page} has a negative size {width:.2} x {height:.2}."
    )]
    InvalidObjectGeometry {
        page: usize,
        band: usize,
        object: usize,
        width: f32,
        height: f32,
    },

    #[error(
        "Band {band} on page {page} has a height of {height:.2} which exceeds the total page content height of {available:.2}."
    )]
    BandTooTall {
        page: usize,
        band: usize,
        height: f32,
        available: f32,
    },

    #[error("Band {band} on page {page} ends at {bottom:.2}, below the bottom limit {limit:.2}.")]
    PageOverflow {
        page: usize,
        band: usize,
        bottom: f32,
        limit: f32,
    },

    #[error("Object {object} in band {band} on page {page} has an unsupported type.")]
    UnknownObjectKind {
        page: usize,
        band: usize,
        object: usize,
    },

    #[error("No renderer is registered for {0} objects.")]
    NoRenderer(ObjectKind),

    #[error("Renderer mismatch: expected {expected} content, got {found}.")]
    RendererMismatch {
        expected: &'static str,
        found: ObjectKind,
    },
}
