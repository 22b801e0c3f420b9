use crate::error::{AssetError, ExportError, RenderError};
use crate::paint::{Paint, PaintContext, paint_band_fill};
use crate::scope::SurfaceScope;
use reptile_layout::{
    ComposedPage, LayoutConfig, LayoutError, PageCompositor, RendererRegistry, StandardMetrics,
};
use reptile_prepared::PreparedDocument;
use reptile_traits::{Surface, SurfaceError, TextMetrics};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Everything an export needs besides the document and the surface:
/// text metrics, layout configuration and the renderer registry.
///
/// Created once and shared; cloning is cheap.
#[derive(Clone)]
pub struct RenderContext {
    pub metrics: Arc<dyn TextMetrics>,
    pub config: LayoutConfig,
    pub registry: RendererRegistry,
}

impl std::fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("metrics", &self.metrics.name())
            .field("config", &self.config)
            .field("registry", &self.registry)
            .finish()
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(Arc::new(StandardMetrics::new()), LayoutConfig::default())
    }
}

impl RenderContext {
    pub fn new(metrics: Arc<dyn TextMetrics>, config: LayoutConfig) -> Self {
        Self {
            metrics,
            config,
            registry: RendererRegistry::standard(),
        }
    }

    pub fn with_registry(mut self, registry: RendererRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn compose(&self, document: &PreparedDocument) -> Result<Vec<ComposedPage>, LayoutError> {
        PageCompositor::new(&self.registry, self.metrics.as_ref(), self.config).compose(document)
    }

    pub fn driver(&self) -> OutputDriver {
        OutputDriver::new(PaintContext {
            unit: self.config.unit,
        })
    }
}

/// A cooperative stop signal checked by the driver before each page.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverState {
    #[default]
    Idle,
    /// Painting the page with this index.
    Exporting(usize),
    Done,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportReport {
    pub pages_committed: usize,
    /// Objects skipped because their raster could not be decoded.
    pub warnings: Vec<AssetError>,
}

/// Paints composed pages onto a surface, one physical page per composed page.
#[derive(Debug, Default)]
pub struct OutputDriver {
    paint: PaintContext,
    state: DriverState,
    cancellation: Option<CancellationToken>,
}

impl OutputDriver {
    pub fn new(paint: PaintContext) -> Self {
        Self {
            paint,
            state: DriverState::Idle,
            cancellation: None,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation.as_ref().is_some_and(CancellationToken::is_cancelled)
    }

    /// Exports `pages` to `surface`.
    ///
    /// The surface is opened once and ended once on every path, including
    /// failures. Per page: the page is started, then each band's fill is
    /// painted followed by its objects in order. Undecodable rasters become
    /// warnings; a surface failure aborts the remaining pages.
    pub fn export(
        &mut self,
        pages: &[ComposedPage],
        surface: &mut dyn Surface,
    ) -> Result<ExportReport, ExportError> {
        self.state = DriverState::Exporting(0);
        let mut scope = match SurfaceScope::open(surface) {
            Ok(scope) => scope,
            Err(err) => {
                self.state = DriverState::Failed;
                return Err(ExportError::surface(0, err));
            }
        };

        let mut report = ExportReport::default();
        for (index, page) in pages.iter().enumerate() {
            if self.is_cancelled() {
                log::info!("Export cancelled after {} page(s)", report.pages_committed);
                self.state = DriverState::Failed;
                return Err(ExportError::cancelled(report.pages_committed));
            }
            self.state = DriverState::Exporting(index);
            if let Err(err) = self.export_page(index, page, scope.surface(), &mut report.warnings) {
                log::warn!("Surface error on page {}: {}", index, err);
                self.state = DriverState::Failed;
                return Err(ExportError::surface(report.pages_committed, err));
            }
            report.pages_committed += 1;
        }

        if let Err(err) = scope.close() {
            self.state = DriverState::Failed;
            return Err(ExportError::surface(report.pages_committed, err));
        }
        self.state = DriverState::Done;
        log::info!(
            "Exported {} page(s) with {} warning(s)",
            report.pages_committed,
            report.warnings.len()
        );
        Ok(report)
    }

    fn export_page(
        &self,
        index: usize,
        page: &ComposedPage,
        surface: &mut dyn Surface,
        warnings: &mut Vec<AssetError>,
    ) -> Result<(), SurfaceError> {
        if index == 0 {
            surface.begin_page(page.size)?;
        } else {
            surface.new_page(page.size)?;
        }

        for band in &page.bands {
            paint_band_fill(band, surface)?;
            for object in &band.objects {
                match object.renderer.paint(surface, &self.paint) {
                    Ok(()) => {}
                    Err(RenderError::Surface(err)) => return Err(err),
                    Err(RenderError::Decode(reason)) => {
                        let warning = AssetError {
                            page: index,
                            band: band.source_index,
                            object: object.source_index,
                            reason,
                        };
                        log::warn!("{}", warning);
                        warnings.push(warning);
                    }
                }
            }
        }
        Ok(())
    }
}
