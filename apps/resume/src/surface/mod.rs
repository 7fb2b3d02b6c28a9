//! Drawing surface — the capability interface the layout engine draws through.
//!
//! Units are millimetres with the origin at the top-left corner of the page,
//! y growing downwards. Font sizes are in points. Implementations own the byte
//! format; the layout engine only sees this trait.

pub mod pdf;
#[cfg(test)]
pub mod recording;

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::FontSpec;
use crate::models::controls::Margins;

pub use pdf::{DocumentInfo, PdfSurface};

/// Inner horizontal padding applied to left/right aligned cell text.
pub const CELL_MARGIN: f32 = 1.0;

// ────────────────────────────────────────────────────────────────────────────
// Geometry and cells
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub margin_top: f32,
    pub margin_right: f32,
    pub margin_bottom: f32,
}

impl PageGeometry {
    /// US letter (215.9mm × 279.4mm) with the configured margins.
    pub fn letter(margins: &Margins) -> Self {
        PageGeometry {
            width: 215.9,
            height: 279.4,
            margin_left: margins.left,
            margin_top: margins.top,
            margin_right: margins.right,
            margin_bottom: margins.bottom,
        }
    }

    /// Printable horizontal extent.
    pub fn working_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    /// Lowest y a cell may reach before content must move to a new page.
    pub fn bottom_bound(&self) -> f32 {
        self.height - self.margin_bottom
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// One rectangular text placement at the current cursor position.
///
/// A `width` of 0 extends the cell to the right margin. After placement the
/// cursor moves right by the cell width; it never moves down.
#[derive(Debug, Clone, Copy)]
pub struct Cell<'a> {
    pub width: f32,
    pub height: f32,
    pub text: &'a str,
    pub align: Align,
    /// Background grey level (0.0 black – 1.0 white) when the cell is filled.
    pub fill: Option<f32>,
    pub link: Option<&'a str>,
}

impl<'a> Cell<'a> {
    pub fn new(width: f32, height: f32, text: &'a str) -> Self {
        Cell {
            width,
            height,
            text,
            align: Align::Left,
            fill: None,
            link: None,
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn fill(mut self, grey: f32) -> Self {
        self.fill = Some(grey);
        self
    }

    /// Attaches a link target; empty targets are ignored.
    pub fn link(mut self, target: &'a str) -> Self {
        if !target.is_empty() {
            self.link = Some(target);
        }
        self
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Surface trait
// ────────────────────────────────────────────────────────────────────────────

pub trait Surface {
    fn geometry(&self) -> &PageGeometry;

    fn font(&self) -> FontSpec;

    fn set_font(&mut self, font: FontSpec);

    /// Width of `text` in the current font, in millimetres.
    fn text_width(&self, text: &str) -> f32 {
        self.font().text_width(text)
    }

    fn cell(&mut self, cell: Cell<'_>);

    /// Moves to the left margin and down by `height`.
    fn line_break(&mut self, height: f32);

    fn x(&self) -> f32;

    fn y(&self) -> f32;

    fn set_x(&mut self, x: f32);

    /// Moves to the left margin at `y`. Negative values count from the bottom edge.
    fn set_y(&mut self, y: f32);

    /// Starts a new page with the cursor at the top-left margin corner.
    fn add_page(&mut self);

    /// 1-based number of the current page; 0 before the first page.
    fn page_number(&self) -> usize;

    /// Registers an outline entry pointing at the current position.
    fn bookmark(&mut self, title: &str, level: u8);
}

// ────────────────────────────────────────────────────────────────────────────
// Shared cursor bookkeeping
// ────────────────────────────────────────────────────────────────────────────

/// Cursor state shared by the surface implementations.
#[derive(Debug, Clone)]
pub(crate) struct Pen {
    pub geometry: PageGeometry,
    pub font: FontSpec,
    pub x: f32,
    pub y: f32,
    pub page: usize,
}

/// Where a cell lands once its width has been resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Left edge of the text inside the cell.
    pub text_x: f32,
    /// Baseline of the text inside the cell.
    pub baseline: f32,
}

impl Pen {
    pub fn new(geometry: PageGeometry) -> Self {
        Pen {
            geometry,
            font: FontSpec::default(),
            x: geometry.margin_left,
            y: geometry.margin_top,
            page: 0,
        }
    }

    /// Resolves a cell against the cursor and advances past it.
    pub fn place(&mut self, cell: &Cell<'_>) -> Placement {
        let width = if cell.width == 0.0 {
            self.geometry.width - self.geometry.margin_right - self.x
        } else {
            cell.width
        };
        let text_width = self.font.text_width(cell.text);
        let text_x = match cell.align {
            Align::Left => self.x + CELL_MARGIN,
            Align::Center => self.x + (width - text_width) / 2.0,
            Align::Right => self.x + width - CELL_MARGIN - text_width,
        };
        let font_height = self.font.size_pt * crate::layout::font_metrics::MM_PER_PT;
        let placement = Placement {
            x: self.x,
            y: self.y,
            width,
            height: cell.height,
            text_x,
            baseline: self.y + 0.5 * cell.height + 0.3 * font_height,
        };
        self.x += width;
        placement
    }

    pub fn line_break(&mut self, height: f32) {
        self.x = self.geometry.margin_left;
        self.y += height;
    }

    pub fn set_y(&mut self, y: f32) {
        self.x = self.geometry.margin_left;
        self.y = if y >= 0.0 {
            y
        } else {
            self.geometry.height + y
        };
    }

    pub fn new_page(&mut self) {
        self.page += 1;
        self.x = self.geometry.margin_left;
        self.y = self.geometry.margin_top;
    }
}
