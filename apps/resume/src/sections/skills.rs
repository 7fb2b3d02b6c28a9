//! Skills: accepted names joined with `" / "` into centred lines.

use tracing::debug;

use crate::layout::context::LayoutContext;
use crate::layout::entry_block::{BODY_PT, LINE_PITCH};
use crate::layout::font_metrics::FontStyle;
use crate::models::controls::SectionControl;
use crate::models::Skill;
use crate::report::{ReportEntry, SectionKind, SectionReport};
use crate::sections::common::{section_title, SECTION_BODY_LEADING};
use crate::selection::{has_candidates, run_pass, Quota, UsedSet};
use crate::surface::{Align, Cell, Surface};

const SEPARATOR: &str = " / ";

/// Running buffer of skill names for the current line.
#[derive(Debug, Default)]
struct SkillLine {
    names: Vec<String>,
    lines_emitted: usize,
}

impl SkillLine {
    /// Adds `name`. When the joined buffer no longer fits, returns the line
    /// without `name` and keeps `name` as the start of the next one.
    fn push(&mut self, name: &str, fits: impl Fn(&str) -> bool) -> Option<String> {
        self.names.push(name.to_string());
        if self.names.len() > 1 && !fits(&self.names.join(SEPARATOR)) {
            let carried = self.names.pop().unwrap_or_default();
            let full = self.names.join(SEPARATOR);
            self.names = vec![carried];
            return Some(full);
        }
        None
    }

    fn take_rest(&mut self) -> Option<String> {
        if self.names.is_empty() {
            return None;
        }
        let rest = self.names.join(SEPARATOR);
        self.names.clear();
        Some(rest)
    }
}

fn emit_line<S: Surface>(ctx: &mut LayoutContext<S>, buffer: &mut SkillLine, line: &str) {
    if buffer.lines_emitted > 0 {
        ctx.line_break(LINE_PITCH);
    }
    ctx.cell(Cell::new(0.0, BODY_PT, line).align(Align::Center));
    buffer.lines_emitted += 1;
}

pub fn render_skills<S: Surface>(
    ctx: &mut LayoutContext<S>,
    pool: &[Skill],
    used: &mut UsedSet,
    control: &SectionControl,
) -> Option<SectionReport> {
    if control.count == 0 || !has_candidates(pool, used, &control.tags) {
        debug!(title = %control.title, "Skills section suppressed");
        return None;
    }

    section_title(ctx, &control.title);
    ctx.set_font(FontStyle::Regular, BODY_PT);
    ctx.line_break(SECTION_BODY_LEADING);

    let mut report = SectionReport::new(SectionKind::Skills, &control.title);
    let mut buffer = SkillLine::default();
    let mut quota = Quota::limited(control.count);
    let working_width = ctx.working_width();

    run_pass(pool, used, &control.tags, &mut |_: usize, skill: &Skill| {
        let full = buffer.push(&skill.name, |joined| ctx.text_width(joined) <= working_width);
        if let Some(line) = full {
            emit_line(ctx, &mut buffer, &line);
        }
        report.entries.push(ReportEntry::named(&skill.name));
        quota.take()
    });

    if let Some(rest) = buffer.take_rest() {
        emit_line(ctx, &mut buffer, &rest);
    }

    debug!(title = %control.title, skills = report.entries.len(), lines = buffer.lines_emitted, "Skills rendered");
    Some(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::FontFamily;
    use crate::models::controls::Margins;
    use crate::surface::recording::RecordingSurface;
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

    fn skill(name: &str, tags: &[&str]) -> Skill {
        Skill {
            name: name.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn control(title: &str, count: u32, tags: &[&str]) -> SectionControl {
        SectionControl {
            title: title.to_string(),
            count,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    // ── SkillLine ──

    #[test]
    fn test_skill_line_flushes_all_but_last() {
        let mut line = SkillLine::default();
        let fits = |s: &str| s.len() <= 10;
        assert_eq!(line.push("Rust", fits), None);
        assert_eq!(line.push("Go", fits), None); // "Rust / Go" = 9
        assert_eq!(line.push("SQL", fits), Some("Rust / Go".to_string()));
        assert_eq!(line.take_rest(), Some("SQL".to_string()));
        assert_eq!(line.take_rest(), None);
    }

    #[test]
    fn test_single_overwide_skill_is_not_flushed_empty() {
        let mut line = SkillLine::default();
        assert_eq!(line.push("Kubernetes", |s| s.len() <= 3), None);
        assert_eq!(line.take_rest(), Some("Kubernetes".to_string()));
    }

    // ── render_skills ──

    #[test]
    fn test_two_passes_never_repeat_a_skill() {
        let pool = vec![
            skill("Rust", &["core"]),
            skill("Go", &["core"]),
            skill("Terraform", &["ops"]),
            skill("SQL", &["core"]),
        ];
        let mut used = UsedSet::new(pool.len());
        let mut ctx = context();

        let first = render_skills(&mut ctx, &pool, &mut used, &control("Core", 2, &["core"])).unwrap();
        let second = render_skills(&mut ctx, &pool, &mut used, &control("Other", 10, &[])).unwrap();

        assert_eq!(first.names(), vec!["Rust", "Go"]);
        assert_eq!(second.names(), vec!["Terraform", "SQL"]);
        let surface = ctx.finish();
        assert_eq!(surface.texts(), vec!["Core", "Rust / Go", "Other", "Terraform / SQL"]);
    }

    #[test]
    fn test_zero_count_suppresses_and_marks_nothing() {
        let pool = vec![skill("Rust", &[])];
        let mut used = UsedSet::new(1);
        let mut ctx = context();
        assert!(render_skills(&mut ctx, &pool, &mut used, &control("Skills", 0, &[])).is_none());
        assert!(!used.is_used(0));
        assert!(ctx.finish().texts().is_empty());
    }

    #[test]
    fn test_no_matching_tags_suppresses_title() {
        let pool = vec![skill("Rust", &["a"])];
        let mut used = UsedSet::new(1);
        let mut ctx = context();
        assert!(render_skills(&mut ctx, &pool, &mut used, &control("Skills", 3, &["z"])).is_none());
        assert!(ctx.finish().texts().is_empty());
    }

    #[test]
    fn test_many_skills_wrap_to_several_centred_lines() {
        let pool: Vec<Skill> = (0..60).map(|i| skill(&format!("Skill number {i}"), &[])).collect();
        let mut used = UsedSet::new(pool.len());
        let mut ctx = context();
        let report = render_skills(&mut ctx, &pool, &mut used, &control("Skills", 60, &[])).unwrap();
        assert_eq!(report.entries.len(), 60);

        let surface = ctx.finish();
        let lines: Vec<&str> = surface.texts().into_iter().skip(1).collect();
        assert!(lines.len() > 1);
        let font = crate::layout::font_metrics::FontSpec::new(FontFamily::Helvetica, FontStyle::Regular, BODY_PT);
        for line in &lines {
            assert!(font.text_width(line) <= 195.9 + 1e-3, "line too wide: {line}");
        }
        assert_eq!(lines.join(SEPARATOR).split(SEPARATOR).count(), 60);
    }
}
