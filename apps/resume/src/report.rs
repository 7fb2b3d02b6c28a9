//! What a run selected, section by section.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::errors::RenderError;
use crate::models::controls::PassKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Skills,
    Employment,
    Politics,
    Volunteering,
    Education,
    Projects,
    Certifications,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    pub name: String,
    /// Position titles rendered under an organization, in drawing order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub positions: Vec<String>,
}

impl ReportEntry {
    pub fn named(name: impl Into<String>) -> Self {
        ReportEntry {
            name: name.into(),
            positions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionReport {
    pub kind: SectionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass: Option<PassKind>,
    pub title: String,
    pub entries: Vec<ReportEntry>,
}

impl SectionReport {
    pub fn new(kind: SectionKind, title: &str) -> Self {
        SectionReport {
            kind,
            pass: None,
            title: title.to_string(),
            entries: Vec::new(),
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderReport {
    pub pages: usize,
    pub sections: Vec<SectionReport>,
}

impl RenderReport {
    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }

    pub fn log_summary(&self) {
        for section in &self.sections {
            info!(
                kind = ?section.kind,
                pass = ?section.pass,
                title = %section.title,
                entries = section.entries.len(),
                "Section rendered"
            );
            debug!(title = %section.title, names = ?section.names(), "Section entries");
        }
        info!(pages = self.pages, entries = self.entry_count(), "Render complete");
    }

    pub fn write_json(&self, path: &Path) -> Result<(), RenderError> {
        let body = serde_json::to_string_pretty(self)?;
        fs::write(path, body).map_err(|source| RenderError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
impl RenderReport {
    /// First section of `kind` drawn in `pass` (`None` for flat sections).
    pub fn section(&self, kind: SectionKind, pass: Option<PassKind>) -> Option<&SectionReport> {
        self.sections
            .iter()
            .find(|s| s.kind == kind && s.pass == pass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RenderReport {
        let mut skills = SectionReport::new(SectionKind::Skills, "Skills");
        skills.entries.push(ReportEntry::named("Rust"));
        skills.entries.push(ReportEntry::named("SQL"));

        let mut employment = SectionReport::new(SectionKind::Employment, "Experience");
        employment.pass = Some(PassKind::Expanded);
        employment.entries.push(ReportEntry {
            name: "Acme".to_string(),
            positions: vec!["Engineer".to_string()],
        });

        RenderReport {
            pages: 2,
            sections: vec![skills, employment],
        }
    }

    #[test]
    fn test_entry_count_and_lookup() {
        let report = sample();
        assert_eq!(report.entry_count(), 3);
        let employment = report
            .section(SectionKind::Employment, Some(PassKind::Expanded))
            .unwrap();
        assert_eq!(employment.names(), vec!["Acme"]);
        assert!(report.section(SectionKind::Employment, Some(PassKind::Condensed)).is_none());
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["pages"], 2);
        assert_eq!(json["sections"][0]["kind"], "skills");
        assert!(json["sections"][0].get("pass").is_none());
        assert!(json["sections"][0]["entries"][0].get("positions").is_none());
        assert_eq!(json["sections"][1]["pass"], "expanded");
        assert_eq!(json["sections"][1]["entries"][0]["positions"][0], "Engineer");
    }

    #[test]
    fn test_write_json_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        sample().write_json(&path).unwrap();
        let body = std::fs::read_to_string(&path).unwrap();
        assert!(body.contains("\"title\": \"Experience\""));
    }
}
