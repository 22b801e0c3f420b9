use super::band::{BandCompositor, BandLocation};
use crate::algorithms::pagination::{EPSILON, check_band_fit};
use crate::composed::ComposedPage;
use crate::config::{LayoutConfig, PaginationPolicy};
use crate::renderers::RendererRegistry;
use crate::text::TextMeasurer;
use crate::LayoutError;
use reptile_prepared::{PreparedDocument, PreparedPage};
use reptile_traits::TextMetrics;
use reptile_types::Point;

/// Walks prepared pages with a running vertical cursor and stacks bands,
/// starting continuation pages when a band would cross the bottom margin.
pub struct PageCompositor<'a> {
    registry: &'a RendererRegistry,
    metrics: &'a dyn TextMetrics,
    config: LayoutConfig,
}

impl<'a> PageCompositor<'a> {
    pub fn new(
        registry: &'a RendererRegistry,
        metrics: &'a dyn TextMetrics,
        config: LayoutConfig,
    ) -> Self {
        Self {
            registry,
            metrics,
            config,
        }
    }

    pub fn compose(&self, document: &PreparedDocument) -> Result<Vec<ComposedPage>, LayoutError> {
        let bands = BandCompositor::new(
            self.registry,
            TextMeasurer::new(self.metrics, self.config.unit),
        );
        let mut pages = Vec::with_capacity(document.pages.len());
        for (index, page) in document.pages.iter().enumerate() {
            self.compose_page(index, page, &bands, &mut pages)?;
        }
        log::debug!(
            "Composed {} prepared pages into {} pages",
            document.pages.len(),
            pages.len()
        );
        Ok(pages)
    }

    fn compose_page(
        &self,
        index: usize,
        page: &PreparedPage,
        bands: &BandCompositor<'_>,
        out: &mut Vec<ComposedPage>,
    ) -> Result<(), LayoutError> {
        validate_page(index, page)?;

        let mut current = ComposedPage::new(index, page.size(), page.margin);
        let origin = current.content_origin();
        let bottom_limit = current.bottom_limit();
        let content_height = bottom_limit - page.margin.top;
        let mut cursor_y = page.margin.top;

        for (band_index, band) in page.bands.iter().enumerate() {
            let location = BandLocation {
                page: index,
                band: band_index,
            };
            let mut composed =
                bands.compose(origin, cursor_y, band, page.content_width(), location)?;
            let height = composed.rect.height;

            if height > content_height + EPSILON {
                return Err(LayoutError::BandTooTall {
                    page: index,
                    band: band_index,
                    height,
                    available: content_height,
                });
            }

            let fit = check_band_fit(cursor_y, height, bottom_limit);
            if fit.should_break && !current.bands.is_empty() {
                match self.config.pagination {
                    PaginationPolicy::Reject => {
                        return Err(LayoutError::PageOverflow {
                            page: index,
                            band: band_index,
                            bottom: cursor_y + height,
                            limit: bottom_limit,
                        });
                    }
                    PaginationPolicy::StartNewPage => {
                        log::debug!(
                            "Band {} ({:.2}) does not fit in the remaining {:.2} on page {}, starting a new page",
                            band_index,
                            height,
                            fit.remaining_height,
                            index
                        );
                        let next = current.continuation();
                        out.push(std::mem::replace(&mut current, next));
                        cursor_y = page.margin.top;
                        composed.move_to(Point::new(composed.rect.x, cursor_y));
                    }
                }
            }

            cursor_y += height;
            current.bands.push(composed);
        }

        out.push(current);
        Ok(())
    }
}

fn validate_page(index: usize, page: &PreparedPage) -> Result<(), LayoutError> {
    let valid_size = page.width.is_finite()
        && page.height.is_finite()
        && page.width > 0.0
        && page.height > 0.0;
    if !valid_size {
        return Err(LayoutError::InvalidPageSize {
            page: index,
            width: page.width,
            height: page.height,
        });
    }
    let margin = &page.margin;
    if margin.is_negative()
        || margin.horizontal() > page.width
        || margin.vertical() > page.height
    {
        return Err(LayoutError::MarginOutOfBounds { page: index });
    }
    Ok(())
}

/// Composes `document` with the given renderers, metrics and configuration.
pub fn compose(
    document: &PreparedDocument,
    registry: &RendererRegistry,
    metrics: &dyn TextMetrics,
    config: LayoutConfig,
) -> Result<Vec<ComposedPage>, LayoutError> {
    PageCompositor::new(registry, metrics, config).compose(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::FixedMetrics;
    use reptile_prepared::{PreparedBand, PreparedObject, PreparedText};
    use reptile_types::{Margins, Rect};

    fn run(document: &PreparedDocument, config: LayoutConfig) -> Result<Vec<ComposedPage>, LayoutError> {
        let _ = env_logger::builder().is_test(true).try_init();
        let metrics = FixedMetrics::new(5.0, 10.0);
        compose(document, &RendererRegistry::standard(), &metrics, config)
    }

    fn a4_page() -> PreparedPage {
        PreparedPage::new(210.0, 297.0, Margins::all(10.0))
    }

    #[test]
    fn test_bands_stack_from_top_margin() {
        let page = a4_page()
            .with_band(PreparedBand::new(50.0))
            .with_band(PreparedBand::new(30.0));
        let pages = run(&PreparedDocument::new(vec![page]), LayoutConfig::default()).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].bands[0].rect, Rect::new(10.0, 10.0, 190.0, 50.0));
        assert_eq!(pages[0].bands[1].rect, Rect::new(10.0, 60.0, 190.0, 30.0));
    }

    #[test]
    fn test_overflowing_band_starts_new_page() {
        let text = PreparedObject::text(0.0, 0.0, 20.0, 10.0, PreparedText::new("x"));
        let page = a4_page()
            .with_band(PreparedBand::new(150.0))
            .with_band(PreparedBand::new(150.0).with_object(text));
        let pages = run(&PreparedDocument::new(vec![page]), LayoutConfig::default()).unwrap();

        assert_eq!(pages.len(), 2);
        assert!(!pages[0].continuation && pages[1].continuation);
        assert_eq!(pages[1].source_index, 0);
        assert_eq!(pages[1].bands[0].rect.y, 10.0);
        assert_eq!(pages[1].bands[0].rect.bottom(), 160.0);
        assert_eq!(pages[1].bands[0].objects[0].renderer.rect().y, 10.0);
    }

    #[test]
    fn test_reject_policy_reports_overflow() {
        let page = a4_page()
            .with_band(PreparedBand::new(150.0))
            .with_band(PreparedBand::new(150.0));
        let config = LayoutConfig::default().with_pagination(PaginationPolicy::Reject);
        let err = run(&PreparedDocument::new(vec![page]), config).unwrap_err();
        assert_eq!(
            err,
            LayoutError::PageOverflow {
                page: 0,
                band: 1,
                bottom: 310.0,
                limit: 287.0
            }
        );
    }

    #[test]
    fn test_band_taller_than_content_area() {
        let page = a4_page().with_band(PreparedBand::new(300.0));
        assert!(matches!(
            run(&PreparedDocument::new(vec![page]), LayoutConfig::default()),
            Err(LayoutError::BandTooTall { band: 0, .. })
        ));
    }

    #[test]
    fn test_exact_fit_stays_on_page() {
        let page = a4_page()
            .with_band(PreparedBand::new(200.0))
            .with_band(PreparedBand::new(77.0));
        let pages = run(&PreparedDocument::new(vec![page]), LayoutConfig::default()).unwrap();
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn test_invalid_pages_are_rejected() {
        let zero = PreparedPage::new(0.0, 100.0, Margins::default());
        assert!(matches!(
            run(&PreparedDocument::new(vec![zero]), LayoutConfig::default()),
            Err(LayoutError::InvalidPageSize { page: 0, .. })
        ));
        let margins = PreparedPage::new(100.0, 100.0, Margins::new(60.0, 0.0, 60.0, 0.0));
        assert_eq!(
            run(&PreparedDocument::new(vec![margins]), LayoutConfig::default()).unwrap_err(),
            LayoutError::MarginOutOfBounds { page: 0 }
        );
    }

    #[test]
    fn test_empty_page_is_kept() {
        let pages = run(&PreparedDocument::new(vec![a4_page()]), LayoutConfig::default()).unwrap();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].bands.is_empty());
    }
}
