//! Organization sections (employment, politics, volunteering).
//!
//! Each pool is drawn twice: an expanded pass, then a condensed pass over
//! whatever the expanded pass left unused. Positions are selected with a
//! nested pass keyed on position tags; how they render depends on the
//! collapse policy:
//!
//! - `collapse`: one title line spanning the oldest start to the newest end.
//! - `titles-only`: the first accepted position's title line, every other
//!   unused position's title line, then the first position's details.
//! - `full`: each position competes for the per-organization quota and
//!   renders its own title line and details.
//!
//! The condensed pass stops after the title line(s) of one position.

use tracing::{debug, warn};

use crate::layout::context::LayoutContext;
use crate::layout::entry_block::{render_header_line, EntryBlock, BODY_PT};
use crate::layout::page_fill::{Paginator, ITEM_LEADING};
use crate::models::controls::{BulletBudget, CollapsePolicy, OrganizationControls, PassControl, PassKind};
use crate::models::{Dates, Organization, Position};
use crate::report::{ReportEntry, SectionKind, SectionReport};
use crate::sections::common::section_title;
use crate::sections::ENTRY_TRAILING;
use crate::selection::{has_candidates, run_pass, Acceptance, Acceptor, OrganizationUsage, Quota, Tagged, UsedSet};
use crate::surface::Surface;

// ────────────────────────────────────────────────────────────────────────────
// Bullet allowance
// ────────────────────────────────────────────────────────────────────────────

/// Remaining bullet budget for one pass. `None` is unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulletAllowance {
    remaining: Option<u32>,
    decrement: u32,
}

impl BulletAllowance {
    pub fn new(budget: BulletBudget) -> Self {
        BulletAllowance {
            remaining: (budget.start > 0).then_some(budget.start),
            decrement: budget.decrement,
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.remaining.map(|r| r as usize)
    }

    /// Lowers the budget after a position drew bullets. Never goes below zero.
    pub fn spend(&mut self) {
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining = remaining.saturating_sub(self.decrement);
            if *remaining == 0 {
                warn!("Bullet point budget exhausted; later positions render no bullets");
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Organization pass
// ────────────────────────────────────────────────────────────────────────────

/// Renders one pass of an organization pool. Returns `None` when the pass
/// has a zero quota or nothing left to show.
pub fn render_organizations<S: Surface>(
    ctx: &mut LayoutContext<S>,
    kind: SectionKind,
    pool: &[Organization],
    usage: &mut OrganizationUsage,
    controls: &OrganizationControls,
    pass: PassKind,
) -> Option<SectionReport> {
    let control = controls.pass(pass);
    let OrganizationUsage {
        organizations,
        positions,
    } = usage;

    let any_candidate = pool.iter().enumerate().any(|(i, organization)| {
        !organizations.is_used(i)
            && organization.matches(&control.tags)
            && positions
                .get(i)
                .is_some_and(|used| has_candidates(&organization.positions, used, &control.position_tags))
    });
    if control.count == 0 || !any_candidate {
        debug!(?kind, ?pass, title = %control.title, "Organization section suppressed");
        return None;
    }

    section_title(ctx, &control.title);

    let mut driver = OrganizationPass {
        ctx,
        control,
        pass,
        positions,
        bullets: BulletAllowance::new(control.bullet_points),
        paginator: Paginator::new(),
        quota: Quota::limited(control.count),
        report: SectionReport {
            pass: Some(pass),
            ..SectionReport::new(kind, &control.title)
        },
    };
    let outcome = run_pass(pool, organizations, &control.tags, &mut driver);

    debug!(
        ?kind,
        ?pass,
        organizations = outcome.accepted.len(),
        used = organizations.used_count(),
        quota_reached = outcome.quota_reached,
        guideline = ?driver.paginator.guideline().height(),
        "Organization pass complete"
    );
    Some(driver.report)
}

struct OrganizationPass<'a, S: Surface> {
    ctx: &'a mut LayoutContext<S>,
    control: &'a PassControl,
    pass: PassKind,
    positions: &'a mut Vec<UsedSet>,
    bullets: BulletAllowance,
    paginator: Paginator,
    quota: Quota,
    report: SectionReport,
}

impl<S: Surface> Acceptor<Organization> for OrganizationPass<'_, S> {
    fn try_accept(&mut self, index: usize, organization: &Organization) -> Acceptance {
        let Some(used) = self.positions.get_mut(index) else {
            return Acceptance::Rejected;
        };
        if !has_candidates(&organization.positions, used, &self.control.position_tags) {
            return Acceptance::Rejected;
        }

        self.paginator.begin_item(self.ctx);

        render_header_line(
            self.ctx,
            &organization.organization,
            &organization.organization_extra,
            &organization.url,
            &organization.location,
        );
        self.ctx.line_break(header_advance(organization, self.control, self.pass));

        let titles = render_positions(
            self.ctx,
            organization,
            used,
            self.control,
            self.pass,
            &mut self.bullets,
        );

        self.ctx.line_break(ENTRY_TRAILING);
        self.paginator.end_item(self.ctx);

        self.report.entries.push(ReportEntry {
            name: organization.organization.clone(),
            positions: titles,
        });
        self.quota.take()
    }
}

/// Full line after the header when several positions follow in full;
/// half a line otherwise.
fn header_advance(organization: &Organization, control: &PassControl, pass: PassKind) -> f32 {
    if organization.positions.len() == 1
        || pass == PassKind::Condensed
        || control.collapse_multiple_positions != CollapsePolicy::Full
    {
        BODY_PT / 2.0
    } else {
        BODY_PT
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Positions
// ────────────────────────────────────────────────────────────────────────────

fn position_block<'p>(position: &'p Position, dates: &Dates) -> EntryBlock<'p> {
    EntryBlock {
        title: position.display_title(),
        subtitle: &position.flavor,
        dates: dates.span(),
        summary: &position.summary,
        bullets: &position.bullet_points,
    }
}

/// Runs the nested position pass for one organization and returns the
/// titles drawn, in order.
fn render_positions<S: Surface>(
    ctx: &mut LayoutContext<S>,
    organization: &Organization,
    used: &mut UsedSet,
    control: &PassControl,
    pass: PassKind,
    bullets: &mut BulletAllowance,
) -> Vec<String> {
    let policy = control.collapse_multiple_positions;
    let oldest_start = organization
        .positions
        .last()
        .map(|p| p.dates.start.clone())
        .unwrap_or_default();
    // Titles-only draws every sibling not already used before this pass.
    let used_before = used.clone();

    let mut titles = Vec::new();
    let mut quota = Quota::limited_or_unlimited(control.positions_count);
    let mut siblings = Vec::new();

    run_pass(&organization.positions, used, &control.position_tags, &mut |index: usize, position: &Position| {
        if !titles.is_empty() {
            ctx.line_break(ITEM_LEADING);
        }

        let dates = match policy {
            CollapsePolicy::Collapse => Dates {
                start: oldest_start.clone(),
                end: position.dates.end.clone(),
            },
            _ => position.dates.clone(),
        };
        let block = position_block(position, &dates);
        block.render_title_line(ctx);
        titles.push(block.title.to_string());

        if policy == CollapsePolicy::TitlesOnly {
            for (sibling_index, sibling) in organization.positions.iter().enumerate() {
                if sibling_index == index || used_before.is_used(sibling_index) {
                    continue;
                }
                EntryBlock::advance_title(ctx);
                position_block(sibling, &sibling.dates).render_title_line(ctx);
                titles.push(sibling.display_title().to_string());
                siblings.push(sibling_index);
            }
        }

        if pass == PassKind::Condensed {
            return Acceptance::QuotaReached;
        }

        let drawn = block.render_details(ctx, bullets.limit());
        if drawn > 0 {
            bullets.spend();
        }

        match policy {
            CollapsePolicy::Collapse | CollapsePolicy::TitlesOnly => Acceptance::QuotaReached,
            CollapsePolicy::Full => quota.take(),
        }
    });

    for sibling in siblings {
        used.mark(sibling);
    }
    titles
}
