pub struct BreakAnalysis {
    pub should_break: bool,
    pub remaining_height: f32,
}

// Use a small epsilon to handle floating point inaccuracies
pub const EPSILON: f32 = 0.01;

/// Centralized logic to check if a band fits below the running cursor.
///
/// * `cursor_y`: The current Y position in the page frame.
/// * `band_height`: The realized height of the band.
/// * `bottom_limit`: Page height minus the bottom margin.
pub fn check_band_fit(cursor_y: f32, band_height: f32, bottom_limit: f32) -> BreakAnalysis {
    let available = (bottom_limit - cursor_y).max(0.0);
    BreakAnalysis {
        should_break: band_height > available + EPSILON,
        remaining_height: available,
    }
}
