//! Raster decoding and clipping for image objects.

use crate::error::RenderError;
use image::RgbaImage;
use reptile_types::{Bitmap, Rect, Size, Unit};

/// Raster resolution assumed when an image is drawn at its natural size.
pub const IMAGE_DPI: f32 = 96.0;

/// Decodes PNG, JPEG or GIF bytes into straight RGBA.
pub fn decode_raster(bytes: &[u8]) -> Result<RgbaImage, RenderError> {
    if bytes.is_empty() {
        return Err(RenderError::Decode("image data is empty".into()));
    }
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

/// Natural size of a raster in document units.
pub fn natural_size(raster: &RgbaImage, unit: Unit) -> Size {
    let to_unit = |px: u32| unit.from_points(px as f32 * 72.0 / IMAGE_DPI);
    Size::new(to_unit(raster.width()), to_unit(raster.height()))
}

fn into_bitmap(raster: RgbaImage) -> Result<Bitmap, RenderError> {
    let (width, height) = raster.dimensions();
    Bitmap::from_rgba(width, height, raster.into_raw())
        .ok_or_else(|| RenderError::Decode("pixel buffer does not match dimensions".into()))
}

/// Crops a raster placed at `placed` to the part visible inside `clip`.
///
/// Returns `None` when nothing of the raster is visible.
pub fn clip_raster(
    raster: RgbaImage,
    placed: Rect,
    clip: Rect,
) -> Result<Option<(Rect, Bitmap)>, RenderError> {
    let Some(visible) = placed.intersection(&clip) else {
        return Ok(None);
    };
    if visible == placed {
        return into_bitmap(raster).map(|bitmap| Some((placed, bitmap)));
    }

    let scale_x = raster.width() as f32 / placed.width;
    let scale_y = raster.height() as f32 / placed.height;
    let x0 = ((visible.x - placed.x) * scale_x).floor().max(0.0) as u32;
    let y0 = ((visible.y - placed.y) * scale_y).floor().max(0.0) as u32;
    let x1 = ((visible.right() - placed.x) * scale_x).ceil() as u32;
    let y1 = ((visible.bottom() - placed.y) * scale_y).ceil() as u32;
    let width = x1.min(raster.width()).saturating_sub(x0);
    let height = y1.min(raster.height()).saturating_sub(y0);
    if width == 0 || height == 0 {
        return Ok(None);
    }

    let cropped = image::imageops::crop_imm(&raster, x0, y0, width, height).to_image();
    into_bitmap(cropped).map(|bitmap| Some((visible, bitmap)))
}
