//! The output of composition: pages holding absolutely positioned bands.
//! Built per compose pass and discarded after export.

use crate::renderers::ObjectRenderer;
use reptile_style::Fill;
use reptile_types::{Margins, Point, Rect, Size};

#[derive(Debug, Clone, PartialEq)]
pub struct ComposedObject {
    /// Index of the object inside its prepared band.
    pub source_index: usize,
    pub renderer: ObjectRenderer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComposedBand {
    /// Index of the band inside its prepared page.
    pub source_index: usize,
    /// Realized rect in the page frame.
    pub rect: Rect,
    pub fill: Option<Fill>,
    pub objects: Vec<ComposedObject>,
}

impl ComposedBand {
    /// Moves the band and every object in it so its top-left lands on `origin`.
    pub fn move_to(&mut self, origin: Point) {
        let dx = origin.x - self.rect.x;
        let dy = origin.y - self.rect.y;
        self.rect = self.rect.translate(dx, dy);
        for object in &mut self.objects {
            object.renderer.move_by(dx, dy);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComposedPage {
    /// Index of the prepared page this page was composed from. Continuation
    /// pages share the index of the page that overflowed.
    pub source_index: usize,
    /// Whether this page was started because a band overflowed.
    pub continuation: bool,
    pub size: Size,
    pub margin: Margins,
    pub bands: Vec<ComposedBand>,
}

impl ComposedPage {
    pub fn new(source_index: usize, size: Size, margin: Margins) -> Self {
        Self {
            source_index,
            continuation: false,
            size,
            margin,
            bands: Vec::new(),
        }
    }

    /// A fresh page with the same size and margins, for bands that overflowed this one.
    pub fn continuation(&self) -> Self {
        Self {
            continuation: true,
            ..Self::new(self.source_index, self.size, self.margin)
        }
    }

    pub fn content_origin(&self) -> Point {
        Point::new(self.margin.left, self.margin.top)
    }

    /// The lowest y a band may reach.
    pub fn bottom_limit(&self) -> f32 {
        self.size.height - self.margin.bottom
    }

    pub fn object_count(&self) -> usize {
        self.bands.iter().map(|b| b.objects.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderers::RendererRegistry;
    use reptile_prepared::{PreparedObject, PreparedText};

    #[test]
    fn test_move_to_relocates_objects() {
        let object = PreparedObject::text(4.0, 2.0, 10.0, 10.0, PreparedText::new("a"));
        let renderer = RendererRegistry::standard()
            .instantiate(&object, Point::new(10.0, 200.0))
            .unwrap();
        let mut band = ComposedBand {
            source_index: 0,
            rect: Rect::new(10.0, 200.0, 100.0, 20.0),
            fill: None,
            objects: vec![ComposedObject {
                source_index: 0,
                renderer,
            }],
        };
        band.move_to(Point::new(10.0, 10.0));
        assert_eq!(band.rect, Rect::new(10.0, 10.0, 100.0, 20.0));
        assert_eq!(band.objects[0].renderer.rect(), Rect::new(14.0, 12.0, 10.0, 10.0));
    }

    #[test]
    fn test_continuation_copies_page_header() {
        let mut page = ComposedPage::new(3, Size::new(210.0, 297.0), Margins::all(10.0));
        page.bands.push(ComposedBand {
            source_index: 0,
            rect: Rect::new(10.0, 10.0, 190.0, 50.0),
            fill: None,
            objects: Vec::new(),
        });
        let next = page.continuation();
        assert!(next.continuation && next.bands.is_empty());
        assert_eq!(next.source_index, 3);
        assert_eq!(next.size, page.size);
        assert_eq!(next.bottom_limit(), 287.0);
        assert_eq!(next.content_origin(), Point::new(10.0, 10.0));
    }
}
