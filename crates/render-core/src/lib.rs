//! Painting of composed pages onto abstract surfaces.
//!
//! - `OutputDriver` walks composed pages and drives a `Surface` through its
//!   lifecycle, collecting asset warnings on the way.
//! - `Paint` turns object renderers into primitive surface calls.
//! - `DisplayList` is a recording surface for previews and tests.

pub mod decode;
mod display_list;
mod driver;
mod error;
mod paint;
mod scope;

pub use display_list::{DisplayList, DrawCommand};
pub use driver::{
    CancellationToken, DriverState, ExportReport, OutputDriver, RenderContext,
};
pub use error::{AssetError, ExportError, ExportErrorKind, RenderError};
pub use paint::{Paint, PaintContext, paint_band_fill};
pub use scope::SurfaceScope;
