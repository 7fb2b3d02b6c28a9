mod config;
mod document;
mod errors;
mod layout;
mod loader;
mod models;
mod report;
mod sections;
mod selection;
mod surface;

use std::fs;

use anyhow::Result;
use chrono::Utc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::document::render_pdf;
use crate::errors::RenderError;
use crate::loader::load_resume;

fn main() -> Result<()> {
    let config = Config::load();

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.log_level))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume renderer v{}", env!("CARGO_PKG_VERSION"));

    let resume = load_resume(&config.base_resume, &config.secret_resume, &config.controls)?;
    let output = config.output_path(&resume)?;

    let (bytes, report) = render_pdf(&resume, Utc::now());
    fs::write(&output, &bytes).map_err(|source| RenderError::Write {
        path: output.clone(),
        source,
    })?;
    info!(path = %output.display(), bytes = bytes.len(), "PDF written");

    if let Some(path) = &config.report {
        report.write_json(path)?;
        info!(path = %path.display(), "Selection report written");
    }

    report.log_summary();
    Ok(())
}
