pub mod border;
pub mod fill;
pub mod font;
pub mod sizing;
pub mod text;

pub use border::{Border, Edge, Stroke};
pub use fill::{BrushPattern, Fill};
pub use font::FontSpec;
pub use sizing::SizeMode;
pub use text::{HAlign, TextFlags, VAlign};
