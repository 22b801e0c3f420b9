//! Painting of composed bands and objects onto a surface.

use crate::decode::{clip_raster, decode_raster, natural_size};
use crate::error::RenderError;
use reptile_layout::{ComposedBand, ImageRenderer, ObjectRenderer, TextRenderer};
use reptile_style::{Fill, Stroke};
use reptile_traits::{Surface, SurfaceError};
use reptile_types::{Point, Rect, Unit};

/// Settings shared by every paint call of one export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaintContext {
    pub unit: Unit,
}

pub trait Paint {
    fn paint(&self, surface: &mut dyn Surface, ctx: &PaintContext) -> Result<(), RenderError>;
}

fn fill_rect(surface: &mut dyn Surface, rect: Rect, fill: Option<&Fill>) -> Result<(), SurfaceError> {
    if let Some(fill) = fill.filter(|f| f.pattern.is_visible()) {
        if !rect.is_empty() {
            surface.fill_rect(rect, &fill.color, fill.pattern)?;
        }
    }
    Ok(())
}

fn stroke_lines(
    surface: &mut dyn Surface,
    lines: &[(Point, Point, Stroke)],
) -> Result<(), RenderError> {
    for (from, to, stroke) in lines {
        surface.draw_line(*from, *to, stroke)?;
    }
    Ok(())
}

impl Paint for TextRenderer {
    fn paint(&self, surface: &mut dyn Surface, _ctx: &PaintContext) -> Result<(), RenderError> {
        let content = self.content_rect();
        fill_rect(surface, content, self.config.fill.as_ref())?;

        if let Some(text) = self.config.text.as_deref() {
            if self.config.rich {
                surface.draw_rich_text(content, text, &self.config.font, self.config.flags.h_align)?;
            } else {
                surface.draw_text(self.text_rect(), self.config.flags, text, &self.config.font)?;
            }
        }

        stroke_lines(surface, &self.border_lines())
    }
}

impl Paint for ImageRenderer {
    /// Decodes before drawing anything, so an undecodable raster leaves no
    /// trace of the object on the surface.
    fn paint(&self, surface: &mut dyn Surface, ctx: &PaintContext) -> Result<(), RenderError> {
        let raster = if self.picture.is_empty() {
            None
        } else {
            Some(decode_raster(&self.picture)?)
        };

        fill_rect(surface, self.rect, self.fill.as_ref())?;
        if let Some(raster) = raster {
            let placed = self.placement(natural_size(&raster, ctx.unit));
            if let Some((rect, bitmap)) = clip_raster(raster, placed, self.rect)? {
                surface.draw_image(rect, &bitmap)?;
            }
        }
        stroke_lines(surface, &self.border_lines())
    }
}

impl Paint for ObjectRenderer {
    fn paint(&self, surface: &mut dyn Surface, ctx: &PaintContext) -> Result<(), RenderError> {
        match self {
            ObjectRenderer::Text(text) => text.paint(surface, ctx),
            ObjectRenderer::Image(image) => image.paint(surface, ctx),
        }
    }
}

/// Paints the band background over its realized rect. Objects are painted separately.
pub fn paint_band_fill(band: &ComposedBand, surface: &mut dyn Surface) -> Result<(), SurfaceError> {
    fill_rect(surface, band.rect, band.fill.as_ref())
}
