pub mod markup;
pub mod measure;
pub mod wrapper;

pub use markup::{RichItem, RichLine, RichSpan, RunStyle, parse_markup, plain_text, wrap_rich};
pub use measure::{TextBlock, TextMeasurer};
pub use wrapper::{TextLine, wrap_lines};
