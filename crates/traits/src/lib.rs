pub mod metrics;
pub mod surface;

pub use metrics::TextMetrics;
pub use surface::{Surface, SurfaceError};
