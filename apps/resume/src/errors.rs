use std::path::PathBuf;

use thiserror::Error;

/// Run-level error type.
/// Every variant is fatal: it is raised before layout starts or while writing the artifact.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Error reading {kind} file {path}: {source}")]
    Read {
        kind: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error decoding {kind} YAML {path}: {source}")]
    Decode {
        kind: &'static str,
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid configuration: {0}")]
    Configuration(#[source] serde_yaml::Error),

    #[error("No output path: pass --output-pdf or set controls.pdf.filename")]
    MissingOutputPath,

    #[error("Error writing {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Report serialization error: {0}")]
    Report(#[from] serde_json::Error),
}
