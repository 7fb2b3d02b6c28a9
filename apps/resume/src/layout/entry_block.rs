//! Shared renderer for multi-line entries (positions and projects).
//!
//! An entry is a header line (name, optional qualifier, location), one or more
//! title lines (title, optional flavor, date range) and optional details: a
//! wrapped summary paragraph and wrapped bullet points.

use crate::layout::context::LayoutContext;
use crate::layout::font_metrics::FontStyle;
use crate::layout::wrap::wrap_lines;
use crate::surface::{Align, Cell, Surface, CELL_MARGIN};

pub const BODY_PT: f32 = 11.0;
/// Baseline pitch between consecutive body lines.
pub const LINE_PITCH: f32 = 5.5;
pub const BULLET_CELL: f32 = 7.0;
const BULLET_PT: f32 = 6.0;
const BULLET_GLYPH: &str = "\u{2022}";
const TITLE_PT: f32 = 12.0;
const TITLE_ADVANCE: f32 = 6.0;
const LOCATION_PT: f32 = 10.0;

// ────────────────────────────────────────────────────────────────────────────
// Header line
// ────────────────────────────────────────────────────────────────────────────

/// Italic name (linked), optional `" (extra)"`, location flush right.
/// Registers the name as a level-1 bookmark.
pub fn render_header_line<S: Surface>(
    ctx: &mut LayoutContext<S>,
    name: &str,
    extra: &str,
    url: &str,
    location: &str,
) {
    ctx.set_font(FontStyle::Italic, BODY_PT);
    let extra = if extra.is_empty() {
        String::new()
    } else {
        format!(" ({extra})")
    };
    let name_width = ctx.text_width(name);
    let extra_width = ctx.text_width(&extra);

    ctx.bookmark(name, 1);
    ctx.cell(Cell::new(name_width, BODY_PT, name).link(url));
    if extra_width > 0.0 {
        ctx.cell(Cell::new(extra_width, BODY_PT, &extra));
    }

    ctx.set_font(FontStyle::Italic, LOCATION_PT);
    ctx.cell(Cell::new(0.0, BODY_PT, location).align(Align::Right));
}

// ────────────────────────────────────────────────────────────────────────────
// Entry block
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct EntryBlock<'a> {
    pub title: &'a str,
    /// Rendered as `" - <subtitle>"` in the regular face.
    pub subtitle: &'a str,
    pub dates: String,
    pub summary: &'a str,
    pub bullets: &'a [String],
}

impl EntryBlock<'_> {
    /// Bold title, optional regular subtitle, bold dates flush right.
    pub fn render_title_line<S: Surface>(&self, ctx: &mut LayoutContext<S>) {
        ctx.set_font(FontStyle::Bold, TITLE_PT);
        let title_width = ctx.text_width(self.title);
        ctx.cell(Cell::new(title_width, TITLE_PT, self.title));

        if !self.subtitle.is_empty() {
            let subtitle = format!(" - {}", self.subtitle);
            ctx.set_font(FontStyle::Regular, TITLE_PT);
            let subtitle_width = ctx.text_width(&subtitle);
            ctx.cell(Cell::new(subtitle_width, TITLE_PT, &subtitle));
            ctx.set_font(FontStyle::Bold, TITLE_PT);
        }

        ctx.cell(Cell::new(0.0, TITLE_PT, &self.dates).align(Align::Right));
    }

    /// Moves below a title line; use between stacked title lines.
    pub fn advance_title<S: Surface>(ctx: &mut LayoutContext<S>) {
        ctx.line_break(TITLE_ADVANCE);
    }

    /// True when [`render_details`](Self::render_details) would draw anything.
    pub fn has_details(&self, bullet_limit: Option<usize>) -> bool {
        !self.summary.is_empty() || (!self.bullets.is_empty() && bullet_limit != Some(0))
    }

    /// Summary then bullets, starting on the line after the title. At most
    /// `bullet_limit` bullets are drawn (`None` draws all). Returns the
    /// number of bullets drawn.
    pub fn render_details<S: Surface>(&self, ctx: &mut LayoutContext<S>, bullet_limit: Option<usize>) -> usize {
        if !self.has_details(bullet_limit) {
            return 0;
        }
        Self::advance_title(ctx);

        if !self.summary.is_empty() {
            render_summary(ctx, self.summary);
        }

        let limit = bullet_limit.unwrap_or(usize::MAX);
        if self.bullets.is_empty() || limit == 0 {
            return 0;
        }
        if !self.summary.is_empty() {
            ctx.line_break(LINE_PITCH);
        }
        render_bullets(ctx, self.bullets, limit)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Paragraphs
// ────────────────────────────────────────────────────────────────────────────

/// Regular body text wrapped to the working width.
pub fn render_summary<S: Surface>(ctx: &mut LayoutContext<S>, summary: &str) {
    ctx.set_font(FontStyle::Regular, BODY_PT);
    let max_width = ctx.working_width() - 2.0 * CELL_MARGIN;
    let lines: Vec<String> = {
        let font_ctx = &*ctx;
        wrap_lines(summary, max_width, |s| font_ctx.measure(s, FontStyle::Regular, BODY_PT))
    };
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            ctx.line_break(LINE_PITCH);
        }
        ctx.cell(Cell::new(0.0, BODY_PT, line));
    }
}

/// Draws up to `limit` bullets and returns how many were drawn.
pub fn render_bullets<S: Surface>(ctx: &mut LayoutContext<S>, bullets: &[String], limit: usize) -> usize {
    let mut drawn = 0;
    for bullet in bullets.iter().take(limit) {
        if drawn > 0 {
            ctx.line_break(LINE_PITCH);
        }
        render_bullet(ctx, bullet);
        drawn += 1;
    }
    drawn
}

/// One bullet: glyph on the first physical line, continuation lines indented
/// by the bullet cell.
fn render_bullet<S: Surface>(ctx: &mut LayoutContext<S>, text: &str) {
    let max_width = ctx.working_width() - BULLET_CELL - 2.0 * CELL_MARGIN;
    let mut lines: Vec<String> = {
        let font_ctx = &*ctx;
        wrap_lines(text, max_width, |s| font_ctx.measure(s, FontStyle::Regular, BODY_PT))
    };
    if lines.is_empty() {
        lines.push(String::new());
    }

    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            ctx.line_break(LINE_PITCH);
        }
        ctx.set_font(FontStyle::Regular, BULLET_PT);
        let glyph = if i == 0 { BULLET_GLYPH } else { "" };
        ctx.cell(Cell::new(BULLET_CELL, BODY_PT, glyph));

        ctx.set_font(FontStyle::Regular, BODY_PT);
        ctx.cell(Cell::new(0.0, BODY_PT, line));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::FontFamily;
    use crate::models::controls::Margins;
    use crate::surface::recording::{Op, RecordingSurface};
    use crate::surface::PageGeometry;

    fn context() -> LayoutContext<RecordingSurface> {
        let mut ctx = LayoutContext::new(
            RecordingSurface::new(PageGeometry::letter(&Margins::default())),
            FontFamily::Helvetica,
            None,
        );
        ctx.start();
        ctx
    }

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_title_line_with_subtitle() {
        let mut ctx = context();
        let block = EntryBlock {
            title: "Engineer",
            subtitle: "Payments",
            dates: "2020 to 2022".to_string(),
            summary: "",
            bullets: &[],
        };
        block.render_title_line(&mut ctx);
        let surface = ctx.finish();
        assert_eq!(surface.texts(), vec!["Engineer", " - Payments", "2020 to 2022"]);
    }

    #[test]
    fn test_header_line_with_extra_and_link() {
        let mut ctx = context();
        render_header_line(&mut ctx, "Acme", "acquired", "https://acme.test", "Springfield");
        let surface = ctx.finish();
        assert_eq!(surface.texts(), vec!["Acme", " (acquired)", "Springfield"]);
        assert_eq!(surface.bookmarks(), vec![("Acme", 1)]);
        let linked = surface.ops.iter().any(|op| {
            matches!(op, Op::Cell { text, link: Some(l), .. } if text == "Acme" && l == "https://acme.test")
        });
        assert!(linked);
    }

    #[test]
    fn test_bullets_respect_limit() {
        let mut ctx = context();
        let bullets = strings(&["one", "two", "three"]);
        let drawn = render_bullets(&mut ctx, &bullets, 2);
        let surface = ctx.finish();
        assert_eq!(drawn, 2);
        assert_eq!(surface.texts(), vec!["\u{2022}", "one", "\u{2022}", "two"]);
    }

    #[test]
    fn test_long_bullet_wraps_with_single_glyph() {
        let mut ctx = context();
        let long = "word ".repeat(80);
        render_bullets(&mut ctx, &[long], usize::MAX);
        let surface = ctx.finish();

        let glyphs = surface.texts().iter().filter(|t| **t == "\u{2022}").count();
        assert_eq!(glyphs, 1);
        let breaks = surface
            .ops
            .iter()
            .filter(|op| **op == Op::LineBreak(LINE_PITCH))
            .count();
        assert!(breaks >= 1, "expected continuation lines");
        for op in &surface.ops {
            if let Op::Cell { x, width, text, .. } = op {
                if text.starts_with("word") {
                    assert!((x - 17.0).abs() < 1e-3, "text indented past the bullet cell");
                    assert!(*width > 0.0);
                }
            }
        }
    }

    #[test]
    fn test_details_skip_when_nothing_to_draw() {
        let mut ctx = context();
        let bullets = strings(&["a"]);
        let block = EntryBlock {
            title: "t",
            subtitle: "",
            dates: String::new(),
            summary: "",
            bullets: &bullets,
        };
        assert_eq!(block.render_details(&mut ctx, Some(0)), 0);
        let surface = ctx.finish();
        assert!(surface.ops.iter().all(|op| !matches!(op, Op::LineBreak(_))));
    }

    #[test]
    fn test_details_summary_then_bullets() {
        let mut ctx = context();
        let bullets = strings(&["first", "second"]);
        let block = EntryBlock {
            title: "t",
            subtitle: "",
            dates: String::new(),
            summary: "Led the platform team.",
            bullets: &bullets,
        };
        assert_eq!(block.render_details(&mut ctx, None), 2);
        let surface = ctx.finish();
        assert_eq!(
            surface.texts(),
            vec!["Led the platform team.", "\u{2022}", "first", "\u{2022}", "second"]
        );
        let first_break = surface
            .ops
            .iter()
            .find(|op| matches!(op, Op::LineBreak(_)))
            .unwrap();
        assert_eq!(*first_break, Op::LineBreak(TITLE_ADVANCE));
    }
}
