use tracing::debug;

use crate::layout::context::LayoutContext;
use crate::layout::entry_block::{BODY_PT, LINE_PITCH};
use crate::layout::font_metrics::FontStyle;
use crate::models::controls::SectionControl;
use crate::models::{Certification, Dates};
use crate::report::{ReportEntry, SectionKind, SectionReport};
use crate::sections::common::{section_title, SECTION_BODY_LEADING};
use crate::selection::{has_candidates, run_pass, Quota, UsedSet};
use crate::surface::{Align, Cell, Surface};

const AUTHORITY_PT: f32 = 10.0;

/// `" (<start>-<end>)"`.
pub fn certification_dates(dates: &Dates) -> String {
    format!(" ({}-{})", dates.start, dates.end)
}

/// One line per entry: bold linked name, regular dates, italic authority flush right.
pub fn render_certifications<S: Surface>(
    ctx: &mut LayoutContext<S>,
    pool: &[Certification],
    used: &mut UsedSet,
    control: &SectionControl,
) -> Option<SectionReport> {
    if control.count == 0 || !has_candidates(pool, used, &control.tags) {
        debug!(title = %control.title, "Certifications section suppressed");
        return None;
    }

    section_title(ctx, &control.title);
    ctx.line_break(SECTION_BODY_LEADING);

    let mut report = SectionReport::new(SectionKind::Certifications, &control.title);
    let mut quota = Quota::limited(control.count);

    run_pass(pool, used, &control.tags, &mut |_: usize, entry: &Certification| {
        if !report.entries.is_empty() {
            ctx.line_break(LINE_PITCH);
        }

        let dates = certification_dates(&entry.dates);
        let name_width = ctx.measure(&entry.certification, FontStyle::Bold, BODY_PT);
        let dates_width = ctx.measure(&dates, FontStyle::Regular, BODY_PT);

        ctx.bookmark(&entry.certification, 1);
        ctx.set_font(FontStyle::Bold, BODY_PT);
        ctx.cell(Cell::new(name_width, BODY_PT, &entry.certification).link(&entry.url));
        ctx.set_font(FontStyle::Regular, BODY_PT);
        ctx.cell(Cell::new(dates_width, BODY_PT, &dates));
        ctx.set_font(FontStyle::Italic, AUTHORITY_PT);
        ctx.cell(Cell::new(0.0, BODY_PT, &entry.authority).align(Align::Right));

        report.entries.push(ReportEntry::named(&entry.certification));
        quota.take()
    });

    Some(report)
}
