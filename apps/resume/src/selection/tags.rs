use crate::models::{Certification, Education, Organization, Position, Project, Skill};

/// True when `target` is empty or shares at least one tag with `candidate`.
pub fn matches(candidate: &[String], target: &[String]) -> bool {
    target.is_empty() || candidate.iter().any(|tag| target.contains(tag))
}

/// Anything a pass can filter by tag.
pub trait Tagged {
    fn tags(&self) -> &[String];

    fn matches(&self, target: &[String]) -> bool {
        matches(self.tags(), target)
    }
}

macro_rules! impl_tagged {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Tagged for $ty {
                fn tags(&self) -> &[String] {
                    &self.tags
                }
            }
        )*
    };
}

impl_tagged!(Skill, Organization, Position, Education, Project, Certification);
