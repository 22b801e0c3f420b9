use reptile_style::FontSpec;

/// Font measurement service used for text auto-sizing and text layout.
///
/// All values are in points. Implementations resolve unknown families to a
/// default face instead of failing.
pub trait TextMetrics: Send + Sync {
    /// Advance width of `text` laid out on a single line.
    fn advance(&self, text: &str, font: &FontSpec) -> f32;

    /// Distance between consecutive baselines.
    fn line_height(&self, font: &FontSpec) -> f32;

    /// Distance from the top of a line box to its baseline.
    fn ascent(&self, font: &FontSpec) -> f32 {
        font.effective_size() * 0.8
    }

    /// Returns a human-readable name for this metrics source (for logging/debugging).
    fn name(&self) -> &'static str;
}
