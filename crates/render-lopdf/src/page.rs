//! Content stream building for a single page.
//!
//! All coordinates handed to `PageContext` are points with a top-left origin;
//! they are flipped to PDF user space here.

use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};
use reptile_style::{BrushPattern, Stroke};
use reptile_types::{Color, Point, Rect};

/// Distance between hatch lines, in points.
const HATCH_SPACING: f32 = 4.0;
const HATCH_LINE_WIDTH: f32 = 0.5;

fn rgb(color: &Color) -> Vec<Object> {
    let [r, g, b] = color.normalized();
    vec![r.into(), g.into(), b.into()]
}

pub(crate) struct PageContext {
    pub(crate) width: f32,
    pub(crate) height: f32,
    content: Content,
}

impl PageContext {
    pub(crate) fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            content: Content { operations: vec![] },
        }
    }

    pub(crate) fn finish(self) -> Content {
        self.content
    }

    fn op(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn flip(&self, y: f32) -> f32 {
        self.height - y
    }

    fn rect_operands(&self, rect: &Rect) -> Vec<Object> {
        vec![
            rect.x.into(),
            self.flip(rect.bottom()).into(),
            rect.width.into(),
            rect.height.into(),
        ]
    }

    pub(crate) fn save(&mut self) {
        self.op("q", vec![]);
    }

    pub(crate) fn restore(&mut self) {
        self.op("Q", vec![]);
    }

    pub(crate) fn clip(&mut self, rect: &Rect) {
        let operands = self.rect_operands(rect);
        self.op("re", operands);
        self.op("W", vec![]);
        self.op("n", vec![]);
    }

    pub(crate) fn fill_rect(&mut self, rect: &Rect, color: &Color, pattern: BrushPattern) {
        match pattern {
            BrushPattern::None => {}
            BrushPattern::Solid => {
                self.save();
                self.op("rg", rgb(color));
                let operands = self.rect_operands(rect);
                self.op("re", operands);
                self.op("f", vec![]);
                self.restore();
            }
            hatch => self.hatch(rect, color, hatch),
        }
    }

    fn hatch(&mut self, rect: &Rect, color: &Color, pattern: BrushPattern) {
        let horizontal = matches!(pattern, BrushPattern::Horizontal | BrushPattern::Cross);
        let vertical = matches!(pattern, BrushPattern::Vertical | BrushPattern::Cross);
        let forward = matches!(
            pattern,
            BrushPattern::ForwardDiagonal | BrushPattern::DiagonalCross
        );
        let backward = matches!(
            pattern,
            BrushPattern::BackwardDiagonal | BrushPattern::DiagonalCross
        );

        self.save();
        self.clip(rect);
        self.op("RG", rgb(color));
        self.op("w", vec![HATCH_LINE_WIDTH.into()]);

        let (left, top, right, bottom) = (rect.x, rect.y, rect.right(), rect.bottom());
        if horizontal {
            let mut y = top + HATCH_SPACING / 2.0;
            while y < bottom {
                self.segment(Point::new(left, y), Point::new(right, y));
                y += HATCH_SPACING;
            }
        }
        if vertical {
            let mut x = left + HATCH_SPACING / 2.0;
            while x < right {
                self.segment(Point::new(x, top), Point::new(x, bottom));
                x += HATCH_SPACING;
            }
        }
        if forward || backward {
            // Diagonals at 45 degrees, spanning enough to cover the clip.
            let mut x = left - rect.height;
            while x < right {
                if forward {
                    self.segment(Point::new(x, bottom), Point::new(x + rect.height, top));
                }
                if backward {
                    self.segment(Point::new(x, top), Point::new(x + rect.height, bottom));
                }
                x += HATCH_SPACING;
            }
        }
        self.op("S", vec![]);
        self.restore();
    }

    fn segment(&mut self, from: Point, to: Point) {
        let (fy, ty) = (self.flip(from.y), self.flip(to.y));
        self.op("m", vec![from.x.into(), fy.into()]);
        self.op("l", vec![to.x.into(), ty.into()]);
    }

    pub(crate) fn line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        self.save();
        self.op("RG", rgb(&stroke.color));
        self.op("w", vec![stroke.width.into()]);
        self.segment(from, to);
        self.op("S", vec![]);
        self.restore();
    }

    /// Shows `text` with its baseline starting at `origin`.
    pub(crate) fn text(&mut self, origin: Point, font_resource: &str, size: f32, text: Vec<u8>) {
        let y = self.flip(origin.y);
        self.op("BT", vec![]);
        self.op(
            "Tf",
            vec![Object::Name(font_resource.as_bytes().to_vec()), size.into()],
        );
        self.op("Td", vec![origin.x.into(), y.into()]);
        self.op("Tj", vec![Object::String(text, StringFormat::Literal)]);
        self.op("ET", vec![]);
    }

    pub(crate) fn set_fill_color(&mut self, color: &Color) {
        self.op("rg", rgb(color));
    }

    pub(crate) fn image(&mut self, rect: &Rect, resource: &str) {
        self.save();
        let y = self.flip(rect.bottom());
        self.op(
            "cm",
            vec![
                rect.width.into(),
                0.0.into(),
                0.0.into(),
                rect.height.into(),
                rect.x.into(),
                y.into(),
            ],
        );
        self.op("Do", vec![Object::Name(resource.as_bytes().to_vec())]);
        self.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operators(ctx: PageContext) -> Vec<String> {
        ctx.finish().operations.into_iter().map(|op| op.operator).collect()
    }

    #[test]
    fn test_solid_fill_flips_y() {
        let mut ctx = PageContext::new(100.0, 200.0);
        ctx.fill_rect(&Rect::new(10.0, 20.0, 30.0, 40.0), &Color::BLACK, BrushPattern::Solid);
        let content = ctx.finish();
        let re = &content.operations[2];
        assert_eq!(re.operator, "re");
        assert_eq!(re.operands[1], Object::Real(140.0));
    }

    #[test]
    fn test_none_pattern_draws_nothing() {
        let mut ctx = PageContext::new(100.0, 100.0);
        ctx.fill_rect(&Rect::new(0.0, 0.0, 10.0, 10.0), &Color::BLACK, BrushPattern::None);
        assert!(operators(ctx).is_empty());
    }

    #[test]
    fn test_hatch_is_clipped_strokes() {
        let mut ctx = PageContext::new(100.0, 100.0);
        ctx.fill_rect(&Rect::new(0.0, 0.0, 10.0, 10.0), &Color::BLACK, BrushPattern::Cross);
        let ops = operators(ctx);
        assert_eq!(&ops[..4], &["q", "re", "W", "n"]);
        // lines at 2 and 6 on both axes
        assert_eq!(ops.iter().filter(|op| *op == "m").count(), 4);
        assert_eq!(ops.last().map(String::as_str), Some("Q"));
    }
}
