pub mod bitmap;
pub mod color;
pub mod geometry;
pub mod units;

pub use bitmap::Bitmap;
pub use color::Color;
pub use geometry::{Margins, Point, Rect, Size};
pub use units::Unit;
