mod band;
mod page;

pub use band::{BandCompositor, BandLocation};
pub use page::{PageCompositor, compose};
