use std::path::PathBuf;

use clap::Parser;

use crate::errors::RenderError;
use crate::models::Resume;

/// Run configuration from command-line flags, falling back to environment
/// variables (a `.env` file is honoured when present).
#[derive(Debug, Clone, Parser)]
#[command(name = "resume", version, about = "Render a tailored résumé PDF from layered YAML")]
pub struct Config {
    /// Base résumé content
    #[arg(long, env = "RESUME_BASE", default_value = "conf/resume/base.yaml")]
    pub base_resume: PathBuf,

    /// Private résumé content overlaid on the base (contact details and the like)
    #[arg(long, env = "RESUME_SECRET", default_value = "conf/resume/secret.yaml")]
    pub secret_resume: PathBuf,

    /// Display controls: titles, counts, tags, fonts, margins
    #[arg(long, env = "RESUME_CONTROLS", default_value = "conf/controls/default.yaml")]
    pub controls: PathBuf,

    /// Output PDF; defaults to controls.pdf.filename
    #[arg(long, env = "RESUME_OUTPUT_PDF")]
    pub output_pdf: Option<PathBuf>,

    /// Write a JSON report of the selected entries to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Log filter used when RUST_LOG does not parse
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn load() -> Self {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Config::parse()
    }

    /// The `--output-pdf` flag wins over `controls.pdf.filename`.
    pub fn output_path(&self, resume: &Resume) -> Result<PathBuf, RenderError> {
        if let Some(path) = &self.output_pdf {
            return Ok(path.clone());
        }
        let filename = resume.controls.pdf.filename.trim();
        if filename.is_empty() {
            return Err(RenderError::MissingOutputPath);
        }
        Ok(PathBuf::from(filename))
    }
}
