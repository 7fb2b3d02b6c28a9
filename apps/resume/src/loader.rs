//! Layered YAML loading.
//!
//! The base résumé is read first, the secret résumé is overlaid on it, and the
//! controls document is overlaid on its `controls` key. Mappings merge key by
//! key; every other value in a later layer replaces the earlier one. A null or
//! empty later document changes nothing.

use std::fs;
use std::path::Path;

use serde_yaml::Value;
use tracing::{debug, info};

use crate::errors::RenderError;
use crate::models::{Organization, Resume};

pub fn load_resume(base: &Path, secret: &Path, controls: &Path) -> Result<Resume, RenderError> {
    let mut merged = read_yaml("base resume", base)?;
    overlay(&mut merged, read_yaml("secret resume", secret)?);
    overlay_controls(&mut merged, read_yaml("controls", controls)?);

    let mut resume: Resume = serde_yaml::from_value(merged).map_err(RenderError::Configuration)?;
    flatten_multiline_fields(&mut resume);

    info!(
        skills = resume.skills.len(),
        employment = resume.employment.len(),
        volunteering = resume.volunteering.len(),
        politics = resume.politics.len(),
        education = resume.education.len(),
        projects = resume.projects.len(),
        certifications = resume.certifications.len(),
        "Resume loaded"
    );
    Ok(resume)
}

fn read_yaml(kind: &'static str, path: &Path) -> Result<Value, RenderError> {
    let body = fs::read_to_string(path).map_err(|source| RenderError::Read {
        kind,
        path: path.to_path_buf(),
        source,
    })?;
    debug!(kind, path = %path.display(), bytes = body.len(), "Read YAML layer");

    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_yaml::from_str(&body).map_err(|source| RenderError::Decode {
        kind,
        path: path.to_path_buf(),
        source,
    })
}

/// Merges `layer` into `base`.
pub fn overlay(base: &mut Value, layer: Value) {
    match (base, layer) {
        (_, Value::Null) => {}
        (Value::Mapping(target), Value::Mapping(source)) => {
            for (key, value) in source {
                match target.get_mut(&key) {
                    Some(existing) => overlay(existing, value),
                    None if value.is_null() => {}
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (slot, layer) => *slot = layer,
    }
}

fn overlay_controls(merged: &mut Value, controls: Value) {
    if controls.is_null() {
        return;
    }
    if !merged.is_mapping() {
        *merged = Value::Mapping(Default::default());
    }
    if let Value::Mapping(root) = merged {
        if !root.contains_key("controls") {
            root.insert(Value::from("controls"), Value::Null);
        }
        if let Some(slot) = root.get_mut("controls") {
            overlay(slot, controls);
        }
    }
}

/// Replaces line breaks with single spaces and trims.
pub fn flatten(text: &str) -> String {
    text.replace("\n\r", " ")
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}

fn flatten_in_place(text: &mut String) {
    *text = flatten(text);
}

fn flatten_organizations(pool: &mut [Organization]) {
    for position in pool.iter_mut().flat_map(|o| o.positions.iter_mut()) {
        flatten_in_place(&mut position.summary);
        flatten_in_place(&mut position.flavor);
        position.bullet_points.iter_mut().for_each(flatten_in_place);
    }
}

fn flatten_multiline_fields(resume: &mut Resume) {
    flatten_in_place(&mut resume.controls.flavor.header);
    flatten_in_place(&mut resume.controls.flavor.footer);

    flatten_organizations(&mut resume.employment);
    flatten_organizations(&mut resume.volunteering);
    flatten_organizations(&mut resume.politics);

    for project in &mut resume.projects {
        flatten_in_place(&mut project.summary);
        project.bullet_points.iter_mut().for_each(flatten_in_place);
    }
}
