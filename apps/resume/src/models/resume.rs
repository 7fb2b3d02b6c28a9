use serde::{Deserialize, Serialize};

use crate::models::controls::Controls;

/// The merged résumé: content pools plus the display controls that budget them.
///
/// Records are read-only during layout; which entries have been emitted is
/// tracked separately in a [`crate::selection::ledger::UsageLedger`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Resume {
    pub controls: Controls,
    pub contact: Contact,
    pub skills: Vec<Skill>,
    pub employment: Vec<Organization>,
    pub volunteering: Vec<Organization>,
    pub politics: Vec<Organization>,
    pub education: Vec<Education>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub name: String,
    pub email_address: String,
    pub phone_number: String,
    pub url: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    pub name: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Organization {
    pub organization: String,
    pub organization_extra: String,
    pub url: String,
    pub location: String,
    /// Most recent first.
    pub positions: Vec<Position>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Position {
    pub title: String,
    pub normalized_title: String,
    pub flavor: String,
    pub summary: String,
    pub dates: Dates,
    pub bullet_points: Vec<String>,
    pub tags: Vec<String>,
}

impl Position {
    /// The normalized title when present, else the title.
    pub fn display_title(&self) -> &str {
        if self.normalized_title.is_empty() {
            &self.title
        } else {
            &self.normalized_title
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dates {
    pub start: String,
    pub end: String,
}

impl Dates {
    /// `"<start> to <end>"`.
    pub fn span(&self) -> String {
        format!("{} to {}", self.start, self.end)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub title: String,
    pub url: String,
    pub institution: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub title: String,
    pub url: String,
    pub location: String,
    pub role: String,
    pub summary: String,
    pub dates: Dates,
    pub bullet_points: Vec<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Certification {
    pub certification: String,
    pub url: String,
    pub authority: String,
    pub credential: String,
    pub dates: Dates,
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_title_prefers_normalized() {
        let mut p = Position {
            title: "SDE II".to_string(),
            ..Default::default()
        };
        assert_eq!(p.display_title(), "SDE II");
        p.normalized_title = "Software Engineer".to_string();
        assert_eq!(p.display_title(), "Software Engineer");
    }

    #[test]
    fn test_dates_span() {
        let d = Dates {
            start: "2019".to_string(),
            end: "2023".to_string(),
        };
        assert_eq!(d.span(), "2019 to 2023");
    }

    #[test]
    fn test_decodes_organization_yaml() {
        let yaml = r#"
organization: Acme
positions:
  - title: Engineer
    dates: { start: "2020", end: Present }
    bullet_points: [Built things, Fixed things]
tags: [tech]
"#;
        let org: Organization = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(org.organization, "Acme");
        assert_eq!(org.positions[0].dates.end, "Present");
        assert_eq!(org.positions[0].bullet_points.len(), 2);
        assert!(org.organization_extra.is_empty());
    }
}
