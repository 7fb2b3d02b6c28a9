use crate::models::{Organization, Resume};
use crate::selection::cursor::UsedSet;

/// Usage state for one run: one [`UsedSet`] per pool, plus one per
/// organization for its positions. Built fresh for every render.
#[derive(Debug, Clone, Default)]
pub struct UsageLedger {
    pub skills: UsedSet,
    pub employment: OrganizationUsage,
    pub volunteering: OrganizationUsage,
    pub politics: OrganizationUsage,
    pub education: UsedSet,
    pub projects: UsedSet,
    pub certifications: UsedSet,
}

impl UsageLedger {
    pub fn for_resume(resume: &Resume) -> Self {
        UsageLedger {
            skills: UsedSet::new(resume.skills.len()),
            employment: OrganizationUsage::new(&resume.employment),
            volunteering: OrganizationUsage::new(&resume.volunteering),
            politics: OrganizationUsage::new(&resume.politics),
            education: UsedSet::new(resume.education.len()),
            projects: UsedSet::new(resume.projects.len()),
            certifications: UsedSet::new(resume.certifications.len()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrganizationUsage {
    pub organizations: UsedSet,
    /// `positions[i]` tracks the positions of organization `i`.
    pub positions: Vec<UsedSet>,
}

impl OrganizationUsage {
    pub fn new(pool: &[Organization]) -> Self {
        OrganizationUsage {
            organizations: UsedSet::new(pool.len()),
            positions: pool.iter().map(|o| UsedSet::new(o.positions.len())).collect(),
        }
    }
}
