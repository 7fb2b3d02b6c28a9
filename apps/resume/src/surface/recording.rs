//! In-memory [`Surface`] that records every drawing call for assertions.

use crate::layout::font_metrics::FontSpec;
use crate::surface::{Align, Cell, PageGeometry, Pen, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    SetFont(FontSpec),
    Cell {
        page: usize,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        text: String,
        align: Align,
        filled: bool,
        link: Option<String>,
    },
    LineBreak(f32),
    AddPage,
    Bookmark {
        title: String,
        level: u8,
    },
}

pub struct RecordingSurface {
    pen: Pen,
    pub ops: Vec<Op>,
}

impl RecordingSurface {
    pub fn new(geometry: PageGeometry) -> Self {
        RecordingSurface {
            pen: Pen::new(geometry),
            ops: Vec::new(),
        }
    }

    /// Texts of every non-empty cell, in drawing order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Cell { text, .. } if !text.is_empty() => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Registered bookmarks in order, as `(title, level)`.
    pub fn bookmarks(&self) -> Vec<(&str, u8)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Bookmark { title, level } => Some((title.as_str(), *level)),
                _ => None,
            })
            .collect()
    }

    /// The page a cell with exactly this text was drawn on.
    pub fn page_of(&self, needle: &str) -> Option<usize> {
        self.ops.iter().find_map(|op| match op {
            Op::Cell { text, page, .. } if text == needle => Some(*page),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn geometry(&self) -> &PageGeometry {
        &self.pen.geometry
    }

    fn font(&self) -> FontSpec {
        self.pen.font
    }

    fn set_font(&mut self, font: FontSpec) {
        self.pen.font = font;
        self.ops.push(Op::SetFont(font));
    }

    fn cell(&mut self, cell: Cell<'_>) {
        let placed = self.pen.place(&cell);
        self.ops.push(Op::Cell {
            page: self.pen.page,
            x: placed.x,
            y: placed.y,
            width: placed.width,
            height: placed.height,
            text: cell.text.to_string(),
            align: cell.align,
            filled: cell.fill.is_some(),
            link: cell.link.map(str::to_string),
        });
    }

    fn line_break(&mut self, height: f32) {
        self.pen.line_break(height);
        self.ops.push(Op::LineBreak(height));
    }

    fn x(&self) -> f32 {
        self.pen.x
    }

    fn y(&self) -> f32 {
        self.pen.y
    }

    fn set_x(&mut self, x: f32) {
        self.pen.x = x;
    }

    fn set_y(&mut self, y: f32) {
        self.pen.set_y(y);
    }

    fn add_page(&mut self) {
        self.pen.new_page();
        self.ops.push(Op::AddPage);
    }

    fn page_number(&self) -> usize {
        self.pen.page
    }

    fn bookmark(&mut self, title: &str, level: u8) {
        self.ops.push(Op::Bookmark {
            title: title.to_string(),
            level,
        });
    }
}
