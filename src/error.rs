//! Error types for the prompt-spec crate.
//!
//! Two channels: [`PromptSpecError`] is returned as `Err` from loading and
//! from the pre-flight stages of a call, while [`TransportError`] never
//! leaves [`crate::PromptSpec::call`] and is folded into
//! [`crate::CallOutcome::Error`] instead.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a prompt spec or preparing a call.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PromptSpecError {
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("YAML parsing error: {0}")]
    Parse(#[source] serde_yaml::Error),

    #[error("failed to read prompt spec: {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Missing required parameters: {}", missing.join(", "))]
    RequiredParameter { missing: Vec<String> },

    #[error("Unknown model: {model}")]
    Endpoint { model: String },
}

/// Failures of the outbound HTTP call.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[source] reqwest::Error),

    #[error("failed to read response body: {0}")]
    ResponseRead(#[source] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpError {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("invalid header: {name}")]
    InvalidHeader { name: String },
}

/// Errors from turning command-line arguments into parameters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CliError {
    #[error("invalid --param format: {param} (expected key=value)")]
    InvalidParamFormat { param: String },
}
