use crate::domain::prediction::{ErrorEnvelope, ErrorPayload};
use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("invalid value for field {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("canonical fields do not match model columns (expected {expected:?}, got {actual:?})")]
    SchemaMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("model rejected canonical input: {0}")]
    Inference(String),
}

impl ScoringError {
    pub fn code(&self) -> &'static str {
        match self {
            ScoringError::Validation { .. } => "VALIDATION_ERROR",
            ScoringError::SchemaMismatch { .. } => "SCHEMA_MISMATCH",
            ScoringError::Inference(_) => "INFERENCE_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ScoringError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ScoringError::SchemaMismatch { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ScoringError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        let details = match self {
            ScoringError::Validation { field, .. } => Some(format!("field: {field}")),
            ScoringError::SchemaMismatch { expected, actual } => Some(format!(
                "expected columns: {expected:?}, canonical fields: {actual:?}"
            )),
            ScoringError::Inference(_) => None,
        };
        ErrorEnvelope {
            error: ErrorPayload {
                code: self.code().to_string(),
                message: self.to_string(),
                details,
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("model artifact not readable at {path}: {source}")]
    ArtifactUnreadable {
        path: String,
        source: std::io::Error,
    },

    #[error("model artifact is corrupt: {0}")]
    ArtifactCorrupt(String),

    #[error("model feature set does not match canonical schema (model columns: {model:?})")]
    FeatureMismatch { model: Vec<String> },
}
