//! Page fill prediction for multi-paragraph sections.
//!
//! The height of the first item a section draws becomes the guideline for
//! every later item: before item 2 onwards is drawn, if the cursor plus the
//! guideline would cross the bottom bound, the section moves to a new page
//! and the item skips its leading blank line.

use crate::layout::context::LayoutContext;
use crate::surface::{PageGeometry, Surface};

/// Leading space before every item except the first on a fresh page.
pub const ITEM_LEADING: f32 = 8.0;

// ────────────────────────────────────────────────────────────────────────────
// Height guideline
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HeightGuideline {
    start: Option<(usize, f32)>,
    height: Option<f32>,
}

impl HeightGuideline {
    /// Records where the measured item starts. Ignored once a height exists.
    pub fn begin(&mut self, page: usize, y: f32) {
        if self.height.is_none() {
            self.start = Some((page, y));
        }
    }

    /// Records where the measured item ends and fixes the guideline.
    /// Items that crossed pages count the full printable height of every
    /// page in between.
    pub fn end(&mut self, page: usize, y: f32, geometry: &PageGeometry) {
        if self.height.is_some() {
            return;
        }
        let Some((start_page, start_y)) = self.start else {
            return;
        };
        let crossed = page.saturating_sub(start_page);
        let height = if crossed == 0 {
            y - start_y
        } else {
            let printable = geometry.bottom_bound() - geometry.margin_top;
            (geometry.bottom_bound() - start_y)
                + (crossed - 1) as f32 * printable
                + (y - geometry.margin_top)
        };
        self.height = Some(height.max(0.0));
    }

    pub fn height(&self) -> Option<f32> {
        self.height
    }

    /// True when an item of guideline height starting at `y` would pass `bottom_bound`.
    pub fn would_overflow(&self, y: f32, bottom_bound: f32) -> bool {
        match self.height {
            Some(g) => y + g > bottom_bound,
            None => false,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Section pagination
// ────────────────────────────────────────────────────────────────────────────

/// Per-section pagination state: the guideline plus the "needs leading
/// blank line" flag.
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    guideline: HeightGuideline,
    items: usize,
    needs_leading: bool,
}

impl Default for Paginator {
    fn default() -> Self {
        Paginator {
            guideline: HeightGuideline::default(),
            items: 0,
            needs_leading: true,
        }
    }
}

impl Paginator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call before drawing an item. Breaks the page when needed, then emits
    /// the leading blank line unless the item opens a fresh page.
    pub fn begin_item<S: Surface>(&mut self, ctx: &mut LayoutContext<S>) {
        if self.items > 0 && self.guideline.would_overflow(ctx.y(), ctx.geometry().bottom_bound()) {
            ctx.new_page();
            self.needs_leading = false;
        }
        if self.items == 0 {
            self.guideline.begin(ctx.page_number(), ctx.y());
        }
        if self.needs_leading {
            ctx.line_break(ITEM_LEADING);
        }
        self.needs_leading = true;
    }

    /// Call after an item is fully drawn.
    pub fn end_item<S: Surface>(&mut self, ctx: &LayoutContext<S>) {
        if self.items == 0 {
            self.guideline.end(ctx.page_number(), ctx.y(), &ctx.geometry());
        }
        self.items += 1;
    }

    pub fn guideline(&self) -> &HeightGuideline {
        &self.guideline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::FontFamily;
    use crate::models::controls::Margins;
    use crate::surface::recording::{Op, RecordingSurface};

    fn geometry() -> PageGeometry {
        PageGeometry::letter(&Margins::default())
    }

    // ── HeightGuideline ──

    #[test]
    fn test_guideline_same_page() {
        let mut g = HeightGuideline::default();
        g.begin(1, 30.0);
        g.end(1, 52.5, &geometry());
        assert_eq!(g.height(), Some(22.5));
        assert!(g.would_overflow(240.0, 259.4));
        assert!(!g.would_overflow(230.0, 259.4));
    }

    #[test]
    fn test_guideline_spanning_a_break() {
        let mut g = HeightGuideline::default();
        g.begin(1, 250.0);
        g.end(2, 20.0, &geometry());
        // 9.4 on page 1 plus 10 on page 2
        assert!((g.height().unwrap() - 19.4).abs() < 1e-3);
    }

    #[test]
    fn test_guideline_fixed_after_first_item() {
        let mut g = HeightGuideline::default();
        g.begin(1, 10.0);
        g.end(1, 20.0, &geometry());
        g.begin(1, 100.0);
        g.end(1, 200.0, &geometry());
        assert_eq!(g.height(), Some(10.0));
    }

    #[test]
    fn test_no_guideline_never_overflows() {
        assert!(!HeightGuideline::default().would_overflow(1000.0, 0.0));
    }

    // ── Paginator ──

    #[test]
    fn test_break_before_second_item_suppresses_leading_line() {
        let page = PageGeometry {
            height: 80.0,
            ..geometry()
        };
        let mut ctx = LayoutContext::new(RecordingSurface::new(page), FontFamily::Helvetica, None);
        ctx.start();
        let mut paginator = Paginator::new();

        // item 1: 8 leading + 20 body, from y = 10 to y = 38
        paginator.begin_item(&mut ctx);
        ctx.line_break(20.0);
        paginator.end_item(&ctx);
        assert_eq!(paginator.guideline().height(), Some(28.0));

        // 38 + 28 > 60, so item 2 opens page 2 without leading space
        paginator.begin_item(&mut ctx);
        let surface = ctx.finish();
        let tail: Vec<&Op> = surface
            .ops
            .iter()
            .rev()
            .filter(|op| !matches!(op, Op::SetFont(_)))
            .take(2)
            .collect();
        assert_eq!(*tail[0], Op::AddPage);
        assert_eq!(*tail[1], Op::LineBreak(20.0));
        assert_eq!(surface.page_number(), 2);
    }

    #[test]
    fn test_second_item_on_same_page_keeps_leading_line() {
        let mut ctx = LayoutContext::new(RecordingSurface::new(geometry()), FontFamily::Helvetica, None);
        ctx.start();
        let mut paginator = Paginator::new();
        paginator.begin_item(&mut ctx);
        ctx.line_break(20.0);
        paginator.end_item(&ctx);
        paginator.begin_item(&mut ctx);

        let surface = ctx.finish();
        assert_eq!(surface.ops.last(), Some(&Op::LineBreak(ITEM_LEADING)));
        assert_eq!(surface.ops.iter().filter(|op| **op == Op::AddPage).count(), 1);
        assert_eq!(surface.page_number(), 1);
    }
}
