// Section drivers: one per content kind. Each suppresses itself when its
// quota is zero or nothing matches, and otherwise reports what it selected.

pub mod certifications;
pub mod common;
pub mod education;
pub mod organizations;
pub mod projects;
pub mod skills;

/// Space after a multi-line entry (organization or project).
pub const ENTRY_TRAILING: f32 = 3.0;

pub use certifications::render_certifications;
pub use common::contact_line;
pub use education::render_education;
pub use organizations::render_organizations;
pub use projects::render_projects;
pub use skills::render_skills;
