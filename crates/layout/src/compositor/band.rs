use crate::composed::{ComposedBand, ComposedObject};
use crate::renderers::{ObjectRenderer, RendererRegistry};
use crate::text::TextMeasurer;
use crate::LayoutError;
use reptile_prepared::{ObjectKind, PreparedBand};
use reptile_types::{Point, Rect};

/// Identifies a prepared band in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandLocation {
    pub page: usize,
    pub band: usize,
}

fn is_valid_length(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

/// Places one band at the running cursor and instantiates its object renderers.
pub struct BandCompositor<'a> {
    registry: &'a RendererRegistry,
    measurer: TextMeasurer<'a>,
}

impl<'a> BandCompositor<'a> {
    pub fn new(registry: &'a RendererRegistry, measurer: TextMeasurer<'a>) -> Self {
        Self { registry, measurer }
    }

    /// Composes `band` with its top at `cursor_y`.
    ///
    /// The band frame starts at `page_origin.x + band.left`. A band without an
    /// explicit width spans `available_width`. Objects are resolved to absolute
    /// rects once; auto-sized text is measured here. A growable band stretches
    /// to contain its tallest object.
    pub fn compose(
        &self,
        page_origin: Point,
        cursor_y: f32,
        band: &PreparedBand,
        available_width: f32,
        location: BandLocation,
    ) -> Result<ComposedBand, LayoutError> {
        if !is_valid_length(band.height) || !is_valid_length(band.width) || !band.left.is_finite() {
            return Err(LayoutError::InvalidBandGeometry {
                page: location.page,
                band: location.band,
                height: band.height,
                width: band.width,
            });
        }

        let origin = Point::new(page_origin.x + band.left, cursor_y);
        let width = if band.width > 0.0 {
            band.width
        } else {
            available_width.max(0.0)
        };

        let mut objects = Vec::with_capacity(band.objects.len());
        let mut content_bottom = cursor_y;
        for (index, object) in band.objects.iter().enumerate() {
            if !is_valid_length(object.width) || !is_valid_length(object.height) {
                return Err(LayoutError::InvalidObjectGeometry {
                    page: location.page,
                    band: location.band,
                    object: index,
                    width: object.width,
                    height: object.height,
                });
            }
            if object.kind() == ObjectKind::Unsupported {
                return Err(LayoutError::UnknownObjectKind {
                    page: location.page,
                    band: location.band,
                    object: index,
                });
            }

            let mut renderer = self.registry.instantiate(object, origin)?;
            if let ObjectRenderer::Text(text) = &mut renderer {
                if text.config.is_dynamic() {
                    let size = text.calc_size(&self.measurer);
                    if size != text.declared {
                        log::trace!(
                            "Text object {} in band {} resized from {:?} to {:?}",
                            index,
                            location.band,
                            text.declared,
                            size
                        );
                    }
                    text.resize(size);
                }
            }
            content_bottom = content_bottom.max(renderer.rect().bottom());
            objects.push(ComposedObject {
                source_index: index,
                renderer,
            });
        }

        let mut height = band.height;
        if band.can_grow && content_bottom - cursor_y > height {
            height = content_bottom - cursor_y;
            log::debug!(
                "Band {} on page {} grew from {:.2} to {:.2}",
                location.band,
                location.page,
                band.height,
                height
            );
        }

        Ok(ComposedBand {
            source_index: location.band,
            rect: Rect::new(origin.x, origin.y, width, height),
            fill: band.fill.clone(),
            objects,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::FixedMetrics;
    use reptile_prepared::{ObjectContent, PreparedObject, PreparedText};
    use reptile_types::Unit;

    const AT: BandLocation = BandLocation { page: 0, band: 0 };

    fn compose(band: &PreparedBand) -> Result<ComposedBand, LayoutError> {
        let metrics = FixedMetrics::new(5.0, 10.0);
        let registry = RendererRegistry::standard();
        let compositor = BandCompositor::new(&registry, TextMeasurer::new(&metrics, Unit::Point));
        compositor.compose(Point::new(10.0, 10.0), 50.0, band, 190.0, AT)
    }

    #[test]
    fn test_band_frame_and_object_rects() {
        let band = PreparedBand::new(30.0)
            .with_left(5.0)
            .with_object(PreparedObject::text(2.0, 3.0, 40.0, 10.0, PreparedText::new("a")))
            .with_object(PreparedObject::text(50.0, 0.0, 40.0, 10.0, PreparedText::new("b")));
        let composed = compose(&band).unwrap();
        assert_eq!(composed.rect, Rect::new(15.0, 50.0, 190.0, 30.0));
        assert_eq!(composed.objects.len(), 2);
        assert_eq!(composed.objects[0].renderer.rect(), Rect::new(17.0, 53.0, 40.0, 10.0));
        assert_eq!(composed.objects[1].source_index, 1);
    }

    #[test]
    fn test_explicit_band_width_is_kept() {
        let composed = compose(&PreparedBand::new(10.0).with_width(80.0)).unwrap();
        assert_eq!(composed.rect.width, 80.0);
    }

    #[test]
    fn test_growable_band_contains_grown_text() {
        let text = PreparedText::new("1\n2\n3\n4").can_grow(true).with_padding(0.0, 0.0);
        let band = PreparedBand::new(20.0).with_object(PreparedObject::text(0.0, 5.0, 50.0, 10.0, text));

        let fixed = compose(&band).unwrap();
        assert_eq!(fixed.objects[0].renderer.rect().height, 40.0);
        assert_eq!(fixed.rect.height, 20.0);

        let grown = compose(&band.clone().growable(true)).unwrap();
        assert_eq!(grown.rect.height, 45.0);
    }

    #[test]
    fn test_invalid_geometry_is_rejected() {
        assert!(matches!(
            compose(&PreparedBand::new(-1.0)),
            Err(LayoutError::InvalidBandGeometry { .. })
        ));
        let band = PreparedBand::new(10.0)
            .with_object(PreparedObject::text(0.0, 0.0, -5.0, 1.0, PreparedText::new("a")));
        assert!(matches!(
            compose(&band),
            Err(LayoutError::InvalidObjectGeometry { object: 0, .. })
        ));
    }

    #[test]
    fn test_unsupported_object_is_rejected() {
        let band = PreparedBand::new(10.0).with_object(PreparedObject::new(
            0.0,
            0.0,
            1.0,
            1.0,
            ObjectContent::Unsupported,
        ));
        assert_eq!(
            compose(&band).unwrap_err(),
            LayoutError::UnknownObjectKind {
                page: 0,
                band: 0,
                object: 0
            }
        );
    }
}
