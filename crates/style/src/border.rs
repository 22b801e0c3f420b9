use reptile_types::{Color, Point, Rect};
use serde::{Deserialize, Serialize};

/// Explicit stroke parameters for a single line draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

impl Stroke {
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// Which side of a box an edge belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
}

/// A box border. Each edge is toggled independently; all edges share one width
/// and color. A border without color occupies space but is never stroked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Border {
    pub left: bool,
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub width: f32,
    pub color: Option<Color>,
}

impl Default for Border {
    fn default() -> Self {
        Self {
            left: false,
            top: false,
            right: false,
            bottom: false,
            width: 1.0,
            color: None,
        }
    }
}

impl Border {
    pub fn all(width: f32, color: Color) -> Self {
        Self {
            left: true,
            top: true,
            right: true,
            bottom: true,
            width,
            color: Some(color),
        }
    }

    /// Border width clamped to be non-negative.
    pub fn inset(&self) -> f32 {
        self.width.max(0.0)
    }

    pub fn stroke(&self) -> Option<Stroke> {
        self.color
            .as_ref()
            .map(|color| Stroke::new(color.clone(), self.inset()))
    }

    pub fn has_edge(&self, edge: Edge) -> bool {
        match edge {
            Edge::Left => self.left,
            Edge::Top => self.top,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
        }
    }

    /// Line segments for the flagged edges of `rect`, ordered left, top, right, bottom.
    pub fn edge_lines(&self, rect: &Rect) -> Vec<(Edge, Point, Point)> {
        [
            (Edge::Left, rect.top_left(), rect.bottom_left()),
            (Edge::Top, rect.top_left(), rect.top_right()),
            (Edge::Right, rect.top_right(), rect.bottom_right()),
            (Edge::Bottom, rect.bottom_left(), rect.bottom_right()),
        ]
        .into_iter()
        .filter(|(edge, _, _)| self.has_edge(*edge))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_lines_follow_flags() {
        let border = Border {
            left: true,
            right: true,
            ..Border::default()
        };
        let lines = border.edge_lines(&Rect::new(0.0, 0.0, 10.0, 5.0));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], (Edge::Left, Point::new(0.0, 0.0), Point::new(0.0, 5.0)));
        assert_eq!(lines[1], (Edge::Right, Point::new(10.0, 0.0), Point::new(10.0, 5.0)));
    }

    #[test]
    fn test_no_color_no_stroke() {
        let border = Border {
            top: true,
            width: 2.0,
            ..Border::default()
        };
        assert!(border.stroke().is_none());
        assert_eq!(border.inset(), 2.0);
    }

    #[test]
    fn test_deserialize_border() {
        let b: Border =
            serde_json::from_str(r#"{"left": true, "bottom": true, "width": 0.5, "color": 255}"#)
                .unwrap();
        assert!(b.left && b.bottom && !b.top && !b.right);
        assert_eq!(b.stroke(), Some(Stroke::new(Color::rgb(0, 0, 255), 0.5)));
    }
}
