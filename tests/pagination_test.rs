mod common;

use common::fixtures::{FailingSurface, a4_page, invoice_document};
use common::{TestResult, fixed_pipeline, init_logger};
use reptile::prepared::{PreparedBand, PreparedDocument};
use reptile::types::{Rect, Size};
use reptile::{DisplayList, DrawCommand, LayoutError, PaginationPolicy, PipelineBuilder, PipelineError};

fn two_tall_bands() -> PreparedDocument {
    PreparedDocument::new(vec![
        a4_page()
            .with_band(PreparedBand::new(150.0))
            .with_band(PreparedBand::new(150.0)),
    ])
}

#[test]
fn test_band_that_does_not_fit_moves_to_continuation_page() -> TestResult {
    init_logger();
    let pages = fixed_pipeline().compose(&two_tall_bands())?;

    assert_eq!(pages.len(), 2);
    assert!(!pages[0].continuation);
    assert!(pages[1].continuation);
    assert_eq!(pages[1].source_index, 0);
    assert_eq!(pages[0].bands[0].rect, Rect::new(10.0, 10.0, 190.0, 150.0));
    assert_eq!(pages[1].bands[0].rect, Rect::new(10.0, 10.0, 190.0, 150.0));
    assert_eq!(pages[1].bands[0].source_index, 1);
    Ok(())
}

#[test]
fn test_continuation_page_is_started_with_new_page() -> TestResult {
    let mut list = DisplayList::new();
    let report = fixed_pipeline().export(&two_tall_bands(), &mut list)?;

    assert_eq!(report.pages_committed, 2);
    let lifecycle: Vec<_> = list.commands().iter().filter(|c| !c.is_paint()).collect();
    assert_eq!(
        lifecycle,
        vec![
            &DrawCommand::BeginDocument,
            &DrawCommand::BeginPage(Size::new(210.0, 297.0)),
            &DrawCommand::NewPage(Size::new(210.0, 297.0)),
            &DrawCommand::EndDocument,
        ]
    );
    Ok(())
}

#[test]
fn test_reject_policy_fails_before_touching_the_surface() {
    let pipeline = PipelineBuilder::new()
        .with_pagination(PaginationPolicy::Reject)
        .build();
    let mut surface = FailingSurface::default();

    let err = pipeline.export(&two_tall_bands(), &mut surface).unwrap_err();
    match err {
        PipelineError::Layout(LayoutError::PageOverflow { page, band, bottom, limit }) => {
            assert_eq!((page, band), (0, 1));
            assert_eq!(bottom, 310.0);
            assert_eq!(limit, 287.0);
        }
        other => panic!("expected page overflow, got {other:?}"),
    }
    assert_eq!(surface.begins, 0);
    assert_eq!(surface.ends, 0);
}

#[test]
fn test_band_taller_than_the_content_area_is_rejected() {
    let document = PreparedDocument::new(vec![a4_page().with_band(PreparedBand::new(300.0))]);
    let err = fixed_pipeline().compose(&document).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Layout(LayoutError::BandTooTall { page: 0, band: 0, .. })
    ));
}

#[test]
fn test_growing_text_stretches_its_band_and_pushes_the_next() -> TestResult {
    let pages = fixed_pipeline().compose(&invoice_document())?;
    assert_eq!(pages.len(), 1);

    let bands = &pages[0].bands;
    // 56pt of inner width holds 11 characters: five wrapped lines of 10pt
    let detail = &bands[1];
    assert_eq!(detail.objects[0].renderer.rect().height, 50.0);
    assert_eq!(detail.rect.y, 40.0);
    assert_eq!(detail.rect.height, 50.0);
    assert_eq!(bands[2].rect.y, 90.0);
    Ok(())
}

#[test]
fn test_each_prepared_page_starts_a_physical_page() -> TestResult {
    let document = PreparedDocument::new(vec![
        a4_page().with_band(PreparedBand::new(20.0)),
        a4_page().with_band(PreparedBand::new(20.0)),
    ]);
    let pages = fixed_pipeline().compose(&document)?;
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[1].source_index, 1);
    assert!(!pages[1].continuation);
    Ok(())
}
