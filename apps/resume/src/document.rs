//! Document composer: page setup, the fixed section order, final flush.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::layout::{Furniture, LayoutContext};
use crate::models::controls::{OrganizationControls, PassKind};
use crate::models::{Organization, Resume};
use crate::report::{RenderReport, SectionKind, SectionReport};
use crate::sections::{
    contact_line, render_certifications, render_education, render_organizations, render_projects,
    render_skills,
};
use crate::selection::{OrganizationUsage, UsageLedger};
use crate::surface::{DocumentInfo, PageGeometry, PdfSurface, Surface};

/// Lays the résumé out on `surface` and returns it with a selection report.
///
/// Order: contact line, skills (first, second), employment, politics and
/// volunteering (expanded then condensed each), skills (third), education,
/// projects, certifications.
pub fn compose<S: Surface>(resume: &Resume, surface: S, stamp: DateTime<Utc>) -> (S, RenderReport) {
    let controls = &resume.controls;
    let furniture = Furniture::from_resume(resume, stamp);
    let mut ctx = LayoutContext::new(surface, controls.pdf.fonts.default, Some(furniture));
    let mut ledger = UsageLedger::for_resume(resume);
    let mut sections: Vec<SectionReport> = Vec::new();

    ctx.start();
    contact_line(&mut ctx, &resume.contact);

    sections.extend(render_skills(&mut ctx, &resume.skills, &mut ledger.skills, &controls.skills.first));
    sections.extend(render_skills(&mut ctx, &resume.skills, &mut ledger.skills, &controls.skills.second));

    let organization_pools: [(SectionKind, &[Organization], &mut OrganizationUsage, &OrganizationControls); 3] = [
        (SectionKind::Employment, &resume.employment, &mut ledger.employment, &controls.employers),
        (SectionKind::Politics, &resume.politics, &mut ledger.politics, &controls.politics),
        (SectionKind::Volunteering, &resume.volunteering, &mut ledger.volunteering, &controls.volunteering),
    ];
    for (kind, pool, usage, organization_controls) in organization_pools {
        for pass in [PassKind::Expanded, PassKind::Condensed] {
            sections.extend(render_organizations(&mut ctx, kind, pool, usage, organization_controls, pass));
        }
    }

    sections.extend(render_skills(&mut ctx, &resume.skills, &mut ledger.skills, &controls.skills.third));
    sections.extend(render_education(&mut ctx, &resume.education, &mut ledger.education, &controls.education));
    sections.extend(render_projects(&mut ctx, &resume.projects, &mut ledger.projects, &controls.projects));
    sections.extend(render_certifications(
        &mut ctx,
        &resume.certifications,
        &mut ledger.certifications,
        &controls.certifications,
    ));

    let pages = ctx.page_number();
    let surface = ctx.finish();
    let report = RenderReport { pages, sections };
    debug!(pages, sections = report.sections.len(), "Layout complete");
    (surface, report)
}

/// Composes onto a US letter PDF and serializes it.
pub fn render_pdf(resume: &Resume, stamp: DateTime<Utc>) -> (Vec<u8>, RenderReport) {
    let geometry = PageGeometry::letter(&resume.controls.pdf.margins);
    let (surface, report) = compose(resume, PdfSurface::new(geometry), stamp);
    let bytes = surface.finish(&DocumentInfo::for_resume(resume, stamp));
    (bytes, report)
}
