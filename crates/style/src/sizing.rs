use reptile_types::{Rect, Size};
use serde::{Deserialize, Serialize};

/// Policy for fitting a raster into its target rectangle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SizeMode {
    /// Natural size anchored at the top-left corner; overflow is cropped to the target.
    Normal,
    /// Scaled to the target on both axes, ignoring aspect ratio.
    #[default]
    Stretch,
    /// Scaled to fit inside the target preserving aspect ratio, centered.
    Center,
    /// Scaled to cover the target preserving aspect ratio, centered; overflow is clipped.
    Zoom,
}

impl SizeMode {
    /// Destination rectangle for an image of `natural` size drawn into `target`.
    /// `natural` is expressed in the same unit as `target`.
    pub fn place(self, target: Rect, natural: Size) -> Rect {
        if natural.is_empty() || target.is_empty() {
            return target;
        }
        let sx = target.width / natural.width;
        let sy = target.height / natural.height;
        match self {
            SizeMode::Stretch => target,
            SizeMode::Normal => Rect::new(target.x, target.y, natural.width, natural.height),
            SizeMode::Center => Self::centered(target, natural, sx.min(sy)),
            SizeMode::Zoom => Self::centered(target, natural, sx.max(sy)),
        }
    }

    fn centered(target: Rect, natural: Size, scale: f32) -> Rect {
        let width = natural.width * scale;
        let height = natural.height * scale;
        Rect::new(
            target.x + (target.width - width) / 2.0,
            target.y + (target.height - height) / 2.0,
            width,
            height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_letterboxes() {
        let placed = SizeMode::Center.place(Rect::new(0.0, 0.0, 100.0, 50.0), Size::new(20.0, 20.0));
        assert_eq!(placed, Rect::new(25.0, 0.0, 50.0, 50.0));
    }

    #[test]
    fn test_zoom_covers() {
        let placed = SizeMode::Zoom.place(Rect::new(0.0, 0.0, 100.0, 50.0), Size::new(20.0, 20.0));
        assert_eq!(placed, Rect::new(0.0, -25.0, 100.0, 100.0));
    }

    #[test]
    fn test_stretch_and_normal() {
        let target = Rect::new(5.0, 5.0, 40.0, 10.0);
        assert_eq!(SizeMode::Stretch.place(target, Size::new(3.0, 3.0)), target);
        assert_eq!(
            SizeMode::Normal.place(target, Size::new(3.0, 4.0)),
            Rect::new(5.0, 5.0, 3.0, 4.0)
        );
    }

    #[test]
    fn test_empty_image_falls_back_to_target() {
        let target = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(SizeMode::Center.place(target, Size::zero()), target);
    }
}
