//! Error types for ColorHeart.

use std::path::PathBuf;
use std::time::Duration;

/// Errors that end the interactive session loop.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {key}. {hint}")]
    MissingRequired { key: String, hint: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// LLM provider errors.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Provider {provider} rate limited, retry after {retry_after:?}")]
    RateLimited {
        provider: String,
        retry_after: Option<Duration>,
    },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Authentication failed for provider {provider}")]
    AuthFailed { provider: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures of a single report request. All of them end in the `Failure`
/// report state; none is shown to the user beyond a generic message.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Report request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Report response was empty")]
    EmptyResponse,

    #[error("Report response has an invalid shape: {0}")]
    InvalidShape(String),

    #[error("Provider error: {0}")]
    Provider(#[from] LlmError),
}

impl ReportError {
    /// Short machine-friendly kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout(_) => "timeout",
            Self::EmptyResponse => "empty_response",
            Self::InvalidShape(_) => "invalid_shape",
            Self::Provider(_) => "provider",
        }
    }
}

/// Diagnosis flow errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DiagnosisError {
    #[error("'{input}' is not a valid answer for question {question_id}")]
    InvalidAnswer { question_id: String, input: String },

    #[error("Diagnosis is already completed")]
    AlreadyCompleted,

    #[error("Back navigation is not available once the diagnosis is completed")]
    BackUnavailable,
}

/// Session controller errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Name must not be empty")]
    EmptyName,

    #[error("Unknown age group: {0}")]
    UnknownAgeGroup(String),

    #[error("Operation {operation} is not available in step {step}")]
    WrongStep { operation: String, step: String },

    #[error(transparent)]
    Diagnosis(#[from] DiagnosisError),
}

/// Print/export errors.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to write export document {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open the print viewer: {0}")]
    Launch(#[source] std::io::Error),

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}
