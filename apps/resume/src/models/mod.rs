pub mod controls;
pub mod resume;

pub use resume::{Certification, Contact, Dates, Education, Organization, Position, Project, Resume, Skill};
