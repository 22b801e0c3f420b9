//! An in-memory surface that records every call, for previews and tests.

use reptile_style::{BrushPattern, FontSpec, HAlign, Stroke, TextFlags};
use reptile_traits::{Surface, SurfaceError};
use reptile_types::{Bitmap, Color, Point, Rect, Size};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    BeginDocument,
    BeginPage(Size),
    NewPage(Size),
    EndDocument,
    FillRect {
        rect: Rect,
        color: Color,
        pattern: BrushPattern,
    },
    Text {
        rect: Rect,
        flags: TextFlags,
        text: String,
        font: FontSpec,
    },
    RichText {
        rect: Rect,
        markup: String,
        font: FontSpec,
        align: HAlign,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Image {
        rect: Rect,
        width: u32,
        height: u32,
    },
}

impl DrawCommand {
    /// Whether the command paints something, as opposed to a lifecycle call.
    pub fn is_paint(&self) -> bool {
        !matches!(
            self,
            DrawCommand::BeginDocument
                | DrawCommand::BeginPage(_)
                | DrawCommand::NewPage(_)
                | DrawCommand::EndDocument
        )
    }
}

#[derive(Debug, Default)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
    open: bool,
    page_open: bool,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    pub fn page_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::BeginPage(_) | DrawCommand::NewPage(_)))
            .count()
    }

    /// Paint commands grouped by page.
    pub fn pages(&self) -> Vec<Vec<&DrawCommand>> {
        let mut pages = Vec::new();
        for command in &self.commands {
            match command {
                DrawCommand::BeginPage(_) | DrawCommand::NewPage(_) => pages.push(Vec::new()),
                c if c.is_paint() => {
                    if let Some(page) = pages.last_mut() {
                        page.push(c);
                    }
                }
                _ => {}
            }
        }
        pages
    }

    fn paint(&mut self, command: DrawCommand) -> Result<(), SurfaceError> {
        if !self.open {
            return Err(SurfaceError::NotOpen);
        }
        if !self.page_open {
            return Err(SurfaceError::NoPage);
        }
        self.commands.push(command);
        Ok(())
    }
}

impl Surface for DisplayList {
    fn begin_document(&mut self) -> Result<(), SurfaceError> {
        if self.open {
            return Err(SurfaceError::AlreadyOpen);
        }
        self.open = true;
        self.commands.push(DrawCommand::BeginDocument);
        Ok(())
    }

    fn begin_page(&mut self, size: Size) -> Result<(), SurfaceError> {
        if !self.open {
            return Err(SurfaceError::NotOpen);
        }
        self.page_open = true;
        self.commands.push(DrawCommand::BeginPage(size));
        Ok(())
    }

    fn new_page(&mut self, size: Size) -> Result<(), SurfaceError> {
        if !self.page_open {
            return Err(SurfaceError::NoPage);
        }
        self.commands.push(DrawCommand::NewPage(size));
        Ok(())
    }

    fn end_document(&mut self) -> Result<(), SurfaceError> {
        if !self.open {
            return Err(SurfaceError::NotOpen);
        }
        self.open = false;
        self.page_open = false;
        self.commands.push(DrawCommand::EndDocument);
        Ok(())
    }

    fn fill_rect(
        &mut self,
        rect: Rect,
        color: &Color,
        pattern: BrushPattern,
    ) -> Result<(), SurfaceError> {
        self.paint(DrawCommand::FillRect {
            rect,
            color: color.clone(),
            pattern,
        })
    }

    fn draw_text(
        &mut self,
        rect: Rect,
        flags: TextFlags,
        text: &str,
        font: &FontSpec,
    ) -> Result<(), SurfaceError> {
        self.paint(DrawCommand::Text {
            rect,
            flags,
            text: text.to_string(),
            font: font.clone(),
        })
    }

    fn draw_rich_text(
        &mut self,
        rect: Rect,
        markup: &str,
        font: &FontSpec,
        align: HAlign,
    ) -> Result<(), SurfaceError> {
        self.paint(DrawCommand::RichText {
            rect,
            markup: markup.to_string(),
            font: font.clone(),
            align,
        })
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke) -> Result<(), SurfaceError> {
        self.paint(DrawCommand::Line {
            from,
            to,
            stroke: stroke.clone(),
        })
    }

    fn draw_image(&mut self, rect: Rect, bitmap: &Bitmap) -> Result<(), SurfaceError> {
        self.paint(DrawCommand::Image {
            rect,
            width: bitmap.width,
            height: bitmap.height,
        })
    }

    fn name(&self) -> &'static str {
        "DisplayList"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_lifecycle_and_paint() {
        let mut list = DisplayList::new();
        list.begin_document().unwrap();
        list.begin_page(Size::new(100.0, 100.0)).unwrap();
        list.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), &Color::BLACK, BrushPattern::Solid)
            .unwrap();
        list.new_page(Size::new(100.0, 100.0)).unwrap();
        list.end_document().unwrap();

        assert_eq!(list.page_count(), 2);
        let pages = list.pages();
        assert_eq!(pages[0].len(), 1);
        assert!(pages[1].is_empty());
        assert_eq!(list.commands().last(), Some(&DrawCommand::EndDocument));
    }

    #[test]
    fn test_lifecycle_misuse_is_rejected() {
        let mut list = DisplayList::new();
        assert!(matches!(
            list.begin_page(Size::new(1.0, 1.0)),
            Err(SurfaceError::NotOpen)
        ));
        list.begin_document().unwrap();
        assert!(matches!(list.begin_document(), Err(SurfaceError::AlreadyOpen)));
        let stroke = Stroke::new(Color::BLACK, 1.0);
        assert!(matches!(
            list.draw_line(Point::new(0.0, 0.0), Point::new(1.0, 1.0), &stroke),
            Err(SurfaceError::NoPage)
        ));
    }
}
