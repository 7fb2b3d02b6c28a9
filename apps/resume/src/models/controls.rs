use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::FontFamily;

/// Display controls: which entries appear, under which titles, in what form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Controls {
    pub pdf: PdfControls,
    pub flavor: Flavor,
    pub skills: SkillsControls,
    pub employers: OrganizationControls,
    pub volunteering: OrganizationControls,
    pub politics: OrganizationControls,
    pub education: SectionControl,
    pub projects: SectionControl,
    pub certifications: SectionControl,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfControls {
    pub filename: String,
    pub keywords: Vec<String>,
    pub fonts: Fonts,
    pub margins: Margins,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Fonts {
    pub header: FontFamily,
    pub footer: FontFamily,
    pub default: FontFamily,
}

/// Page margins in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Margins {
            left: 10.0,
            top: 10.0,
            right: 10.0,
            bottom: 20.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Flavor {
    pub header: String,
    pub footer: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillsControls {
    pub first: SectionControl,
    pub second: SectionControl,
    pub third: SectionControl,
}

/// Budget for a flat section: title, quota (0 suppresses) and target tags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionControl {
    pub title: String,
    pub count: u32,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationControls {
    pub expanded: PassControl,
    pub condensed: PassControl,
}

impl OrganizationControls {
    pub fn pass(&self, kind: PassKind) -> &PassControl {
        match kind {
            PassKind::Expanded => &self.expanded,
            PassKind::Condensed => &self.condensed,
        }
    }
}

/// The two passes every organization pool gets, in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassKind {
    /// Header, title lines, summary and bullets.
    Expanded,
    /// Header and title lines only.
    Condensed,
}

/// Budget for one organization pass (expanded or condensed).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PassControl {
    pub title: String,
    pub count: u32,
    pub tags: Vec<String>,
    pub position_tags: Vec<String>,
    /// Positions accepted per organization under the `full` policy; 0 means unlimited.
    pub positions_count: u32,
    pub collapse_multiple_positions: CollapsePolicy,
    pub bullet_points: BulletBudget,
}

/// Bullet points allowed across one organization pass.
///
/// `start` caps the bullets of the first position that renders any; every such
/// position lowers the cap by `decrement`, never below zero. A `start` of 0
/// means no cap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletBudget {
    pub start: u32,
    pub decrement: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollapsePolicy {
    /// One synthetic position spanning the whole tenure.
    Collapse,
    /// Every title line, details only for the first accepted position.
    TitlesOnly,
    #[default]
    Full,
}
