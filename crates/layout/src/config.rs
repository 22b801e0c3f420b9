use reptile_types::Unit;

/// What the page compositor does with a band that would cross the bottom margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaginationPolicy {
    /// Move the band to a fresh page with the same size and margins.
    #[default]
    StartNewPage,
    /// Fail composition with `LayoutError::PageOverflow`.
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutConfig {
    /// The unit of every length in the prepared document. Font sizes stay in points.
    ///
    /// Defaults to `Unit::Point`.
    pub unit: Unit,
    /// Overflow handling for bands that do not fit below the running cursor.
    ///
    /// Defaults to `PaginationPolicy::StartNewPage`.
    pub pagination: PaginationPolicy,
}

impl LayoutConfig {
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_pagination(mut self, pagination: PaginationPolicy) -> Self {
        self.pagination = pagination;
        self
    }
}
