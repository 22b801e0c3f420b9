use crate::error::PipelineError;
use reptile_layout::{
    ComposedPage, LayoutConfig, PaginationPolicy, RendererRegistry, StandardMetrics,
};
use reptile_prepared::PreparedDocument;
use reptile_render_core::{CancellationToken, ExportReport, RenderContext};
use reptile_render_lopdf::PdfSurface;
use reptile_traits::{Surface, TextMetrics};
use reptile_types::Unit;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

#[cfg(feature = "system-fonts")]
use once_cell::sync::Lazy;
#[cfg(feature = "system-fonts")]
use reptile_layout::FaceMetrics;

/// System faces are scanned once per process and shared by every pipeline.
#[cfg(feature = "system-fonts")]
static SYSTEM_METRICS: Lazy<Arc<FaceMetrics>> = Lazy::new(|| {
    let metrics = FaceMetrics::new().with_system_fonts();
    log::info!("Loaded {} system font face(s)", metrics.face_count());
    Arc::new(metrics)
});

/// Builds a configured `ReportPipeline`.
pub struct PipelineBuilder {
    config: LayoutConfig,
    metrics: Option<Arc<dyn TextMetrics>>,
    registry: RendererRegistry,
    cancellation: Option<CancellationToken>,
    pdf_title: Option<String>,
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self {
            config: LayoutConfig::default(),
            metrics: None,
            registry: RendererRegistry::standard(),
            cancellation: None,
            pdf_title: None,
        }
    }
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// The unit every length in the prepared document is expressed in.
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.config = self.config.with_unit(unit);
        self
    }

    pub fn with_pagination(mut self, pagination: PaginationPolicy) -> Self {
        self.config = self.config.with_pagination(pagination);
        self
    }

    /// Replaces the built-in standard font metrics for `export` onto custom
    /// surfaces. PDF export always measures with the standard font metrics,
    /// because the PDF surface draws with the standard-14 fonts.
    pub fn with_metrics(mut self, metrics: Arc<dyn TextMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Measures text with the faces installed on this machine. Like
    /// `with_metrics`, this does not apply to PDF export.
    #[cfg(feature = "system-fonts")]
    pub fn with_system_fonts(mut self) -> Self {
        let metrics: Arc<dyn TextMetrics> = SYSTEM_METRICS.clone();
        self.metrics = Some(metrics);
        self
    }

    pub fn with_registry(mut self, registry: RendererRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Title written to the document information of PDF output.
    pub fn with_pdf_title(mut self, title: impl Into<String>) -> Self {
        self.pdf_title = Some(title.into());
        self
    }

    pub fn build(self) -> ReportPipeline {
        let metrics: Arc<dyn TextMetrics> = match self.metrics {
            Some(metrics) => metrics,
            None => Arc::new(StandardMetrics::new()),
        };
        let context = RenderContext::new(metrics, self.config).with_registry(self.registry);
        let pdf_context = RenderContext::new(Arc::new(StandardMetrics::new()), self.config)
            .with_registry(context.registry.clone());
        log::debug!(
            "Building pipeline: unit={:?}, pagination={:?}, metrics={}",
            context.config.unit,
            context.config.pagination,
            context.metrics.name()
        );
        ReportPipeline {
            context,
            pdf_context,
            cancellation: self.cancellation,
            pdf_title: self.pdf_title,
        }
    }
}

/// Composes prepared documents and exports them to a surface.
///
/// A pipeline holds no per-document state and can be shared across threads.
#[derive(Debug, Clone)]
pub struct ReportPipeline {
    context: RenderContext,
    /// Measures with the metrics of the fonts the PDF surface draws.
    pdf_context: RenderContext,
    cancellation: Option<CancellationToken>,
    pdf_title: Option<String>,
}

impl ReportPipeline {
    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// The context used by the PDF exports.
    pub fn pdf_context(&self) -> &RenderContext {
        &self.pdf_context
    }

    pub fn compose(&self, document: &PreparedDocument) -> Result<Vec<ComposedPage>, PipelineError> {
        Ok(self.context.compose(document)?)
    }

    /// Composes `document` and paints every page onto `surface`.
    ///
    /// Composition errors are reported before the surface is touched.
    pub fn export(
        &self,
        document: &PreparedDocument,
        surface: &mut dyn Surface,
    ) -> Result<ExportReport, PipelineError> {
        self.export_with(&self.context, document, surface)
    }

    fn export_with(
        &self,
        context: &RenderContext,
        document: &PreparedDocument,
        surface: &mut dyn Surface,
    ) -> Result<ExportReport, PipelineError> {
        let pages = context.compose(document)?;
        log::debug!(
            "Composed {} page(s) from {} prepared page(s)",
            pages.len(),
            document.pages.len()
        );
        let mut driver = context.driver();
        if let Some(token) = &self.cancellation {
            driver = driver.with_cancellation(token.clone());
        }
        let report = driver.export(&pages, surface)?;
        log::info!(
            "Exported {} page(s) to {} with {} warning(s)",
            report.pages_committed,
            surface.name(),
            report.warnings.len()
        );
        Ok(report)
    }

    /// Exports `document` as PDF into `writer` and hands the writer back.
    pub fn export_pdf<W: Write>(
        &self,
        document: &PreparedDocument,
        writer: W,
    ) -> Result<(W, ExportReport), PipelineError> {
        let context = &self.pdf_context;
        if self.context.metrics.name() != context.metrics.name() {
            log::debug!(
                "PDF export measures with {} instead of {}",
                context.metrics.name(),
                self.context.metrics.name()
            );
        }
        let mut surface = PdfSurface::new(writer)
            .with_unit(context.config.unit)
            .with_metrics(context.metrics.clone());
        if let Some(title) = &self.pdf_title {
            surface = surface.with_title(title.clone());
        }
        let report = self.export_with(context, document, &mut surface)?;
        Ok((surface.into_inner(), report))
    }

    pub fn export_pdf_bytes(&self, document: &PreparedDocument) -> Result<Vec<u8>, PipelineError> {
        let (bytes, _) = self.export_pdf(document, Vec::new())?;
        Ok(bytes)
    }

    pub fn export_pdf_file<P: AsRef<Path>>(
        &self,
        document: &PreparedDocument,
        path: P,
    ) -> Result<ExportReport, PipelineError> {
        let file = File::create(path.as_ref())?;
        let (mut writer, report) = self.export_pdf(document, BufWriter::new(file))?;
        writer.flush()?;
        Ok(report)
    }

    /// Exports several documents to PDF, in parallel when `parallel-render` is enabled.
    /// Results keep the order of `documents`.
    pub fn export_batch(&self, documents: &[PreparedDocument]) -> Vec<Result<Vec<u8>, PipelineError>> {
        #[cfg(feature = "parallel-render")]
        {
            use rayon::prelude::*;
            documents
                .par_iter()
                .map(|document| self.export_pdf_bytes(document))
                .collect()
        }
        #[cfg(not(feature = "parallel-render"))]
        {
            documents
                .iter()
                .map(|document| self.export_pdf_bytes(document))
                .collect()
        }
    }
}
