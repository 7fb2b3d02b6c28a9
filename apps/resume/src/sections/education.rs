use tracing::debug;

use crate::layout::context::LayoutContext;
use crate::layout::entry_block::{BODY_PT, LINE_PITCH};
use crate::layout::font_metrics::FontStyle;
use crate::models::controls::SectionControl;
use crate::models::Education;
use crate::report::{ReportEntry, SectionKind, SectionReport};
use crate::sections::common::{section_title, SECTION_BODY_LEADING};
use crate::selection::{has_candidates, run_pass, Quota, UsedSet};
use crate::surface::{Align, Cell, Surface};

const INSTITUTION_PT: f32 = 10.0;

/// One line per entry: bold linked title, italic institution flush right.
pub fn render_education<S: Surface>(
    ctx: &mut LayoutContext<S>,
    pool: &[Education],
    used: &mut UsedSet,
    control: &SectionControl,
) -> Option<SectionReport> {
    if control.count == 0 || !has_candidates(pool, used, &control.tags) {
        debug!(title = %control.title, "Education section suppressed");
        return None;
    }

    section_title(ctx, &control.title);
    ctx.line_break(SECTION_BODY_LEADING);

    let mut report = SectionReport::new(SectionKind::Education, &control.title);
    let mut quota = Quota::limited(control.count);

    run_pass(pool, used, &control.tags, &mut |_: usize, entry: &Education| {
        if !report.entries.is_empty() {
            ctx.line_break(LINE_PITCH);
        }

        let institution_width = ctx.measure(&entry.institution, FontStyle::Italic, INSTITUTION_PT);
        let title_width = ctx.working_width() - institution_width;

        ctx.bookmark(&entry.title, 1);
        ctx.set_font(FontStyle::Bold, BODY_PT);
        ctx.cell(Cell::new(title_width, BODY_PT, &entry.title).link(&entry.url));
        ctx.set_font(FontStyle::Italic, INSTITUTION_PT);
        ctx.cell(Cell::new(institution_width, BODY_PT, &entry.institution).align(Align::Right));

        report.entries.push(ReportEntry::named(&entry.title));
        quota.take()
    });

    Some(report)
}
