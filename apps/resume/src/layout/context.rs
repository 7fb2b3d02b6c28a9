//! Layout context: the drawing surface plus the page-setup values every
//! section needs (default font family, working width, page furniture).
//!
//! Built once per document and passed by `&mut` to every section driver.

use tracing::debug;

use crate::layout::font_metrics::{FontFamily, FontSpec, FontStyle};
use crate::layout::furniture::Furniture;
use crate::surface::{Cell, PageGeometry, Surface};

pub struct LayoutContext<S: Surface> {
    surface: S,
    default_family: FontFamily,
    working_width: f32,
    furniture: Option<Furniture>,
}

impl<S: Surface> LayoutContext<S> {
    pub fn new(surface: S, default_family: FontFamily, furniture: Option<Furniture>) -> Self {
        let working_width = surface.geometry().working_width();
        LayoutContext {
            surface,
            default_family,
            working_width,
            furniture,
        }
    }

    /// Opens the first page.
    pub fn start(&mut self) {
        self.open_page();
    }

    pub fn working_width(&self) -> f32 {
        self.working_width
    }

    pub fn geometry(&self) -> PageGeometry {
        *self.surface.geometry()
    }

    /// Selects the default family in `style` at `size_pt`.
    pub fn set_font(&mut self, style: FontStyle, size_pt: f32) {
        self.surface
            .set_font(FontSpec::new(self.default_family, style, size_pt));
    }

    pub fn text_width(&self, text: &str) -> f32 {
        self.surface.text_width(text)
    }

    /// Width of `text` in the default family at `style`/`size_pt`, without
    /// touching the current font.
    pub fn measure(&self, text: &str, style: FontStyle, size_pt: f32) -> f32 {
        FontSpec::new(self.default_family, style, size_pt).text_width(text)
    }

    /// Places a cell, moving to a new page first when it would cross the
    /// bottom bound. The horizontal position survives the break.
    pub fn cell(&mut self, cell: Cell<'_>) {
        let bottom = self.surface.geometry().bottom_bound();
        if self.surface.page_number() > 0 && self.surface.y() + cell.height > bottom {
            let x = self.surface.x();
            self.new_page();
            self.surface.set_x(x);
        }
        self.surface.cell(cell);
    }

    pub fn line_break(&mut self, height: f32) {
        self.surface.line_break(height);
    }

    pub fn y(&self) -> f32 {
        self.surface.y()
    }

    pub fn page_number(&self) -> usize {
        self.surface.page_number()
    }

    pub fn bookmark(&mut self, title: &str, level: u8) {
        self.surface.bookmark(title, level);
    }

    /// Closes the current page (footer) and opens the next one (header).
    /// The current font is restored afterwards.
    pub fn new_page(&mut self) {
        let font = self.surface.font();
        if let Some(furniture) = &self.furniture {
            furniture.draw_footer(&mut self.surface);
        }
        self.open_page();
        self.surface.set_font(font);
        debug!(page = self.surface.page_number(), "Page break");
    }

    fn open_page(&mut self) {
        self.surface.add_page();
        if let Some(furniture) = &self.furniture {
            furniture.draw_header(&mut self.surface);
        }
    }

    /// Draws the last footer and hands the surface back.
    pub fn finish(mut self) -> S {
        if self.surface.page_number() > 0 {
            if let Some(furniture) = &self.furniture {
                furniture.draw_footer(&mut self.surface);
            }
        }
        self.surface
    }
}
