use tracing::debug;

use crate::layout::context::LayoutContext;
use crate::layout::entry_block::{render_header_line, EntryBlock, LINE_PITCH};
use crate::layout::page_fill::Paginator;
use crate::models::controls::SectionControl;
use crate::models::Project;
use crate::report::{ReportEntry, SectionKind, SectionReport};
use crate::sections::common::section_title;
use crate::sections::ENTRY_TRAILING;
use crate::selection::{has_candidates, run_pass, Quota, UsedSet};
use crate::surface::Surface;

/// Per project: header line, role/dates line, summary, every bullet.
/// Paginates on the height of the first project.
pub fn render_projects<S: Surface>(
    ctx: &mut LayoutContext<S>,
    pool: &[Project],
    used: &mut UsedSet,
    control: &SectionControl,
) -> Option<SectionReport> {
    if control.count == 0 || !has_candidates(pool, used, &control.tags) {
        debug!(title = %control.title, "Projects section suppressed");
        return None;
    }

    section_title(ctx, &control.title);

    let mut report = SectionReport::new(SectionKind::Projects, &control.title);
    let mut quota = Quota::limited(control.count);
    let mut paginator = Paginator::new();

    run_pass(pool, used, &control.tags, &mut |_: usize, project: &Project| {
        paginator.begin_item(ctx);

        render_header_line(ctx, &project.title, "", &project.url, &project.location);
        ctx.line_break(LINE_PITCH);

        let block = EntryBlock {
            title: &project.role,
            subtitle: "",
            dates: project.dates.span(),
            summary: &project.summary,
            bullets: &project.bullet_points,
        };
        block.render_title_line(ctx);
        block.render_details(ctx, None);

        ctx.line_break(ENTRY_TRAILING);
        paginator.end_item(ctx);

        report.entries.push(ReportEntry::named(&project.title));
        quota.take()
    });

    Some(report)
}
