pub mod fixtures;
pub mod pdf_assertions;

use lopdf::Document as LopdfDocument;
use reptile::{PipelineBuilder, PreparedDocument, ReportPipeline};
use reptile::layout::FixedMetrics;
use std::sync::Arc;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A pipeline measuring 5pt per character and 10pt per line.
pub fn fixed_pipeline() -> ReportPipeline {
    PipelineBuilder::new()
        .with_metrics(Arc::new(FixedMetrics::new(5.0, 10.0)))
        .build()
}

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }
}

pub fn generate_pdf(
    pipeline: &ReportPipeline,
    document: &PreparedDocument,
) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let bytes = pipeline.export_pdf_bytes(document)?;
    GeneratedPdf::from_bytes(bytes)
}

pub fn generate_pdf_from_json(json: &str) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let document = PreparedDocument::from_json(json)?;
    generate_pdf(&PipelineBuilder::new().build(), &document)
}
