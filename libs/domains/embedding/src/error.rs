use std::time::Duration;

use core_config::ConfigError;
use thiserror::Error;

use crate::models::ModelKind;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Rejected before any model is invoked.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The model raised during inference or returned malformed output.
    #[error("{kind} model error: {message}")]
    Model { kind: ModelKind, message: String },

    /// Query/passage reassembly left a slot unfilled or filled it twice.
    #[error("Reconstruction defect: {0}")]
    Reconstruction(String),

    #[error("Deadline exceeded after {0:?}")]
    DeadlineExceeded(Duration),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type EmbeddingResult<T> = Result<T, EmbeddingError>;

impl EmbeddingError {
    pub fn model(kind: ModelKind, message: impl Into<String>) -> Self {
        EmbeddingError::Model {
            kind,
            message: message.into(),
        }
    }
}

impl From<ConfigError> for EmbeddingError {
    fn from(err: ConfigError) -> Self {
        EmbeddingError::Config(err.to_string())
    }
}

impl From<tokio::task::JoinError> for EmbeddingError {
    fn from(err: tokio::task::JoinError) -> Self {
        if err.is_panic() {
            EmbeddingError::Internal("inference worker panicked".to_string())
        } else {
            EmbeddingError::Internal(format!("inference worker failed: {}", err))
        }
    }
}

impl From<EmbeddingError> for tonic::Status {
    fn from(err: EmbeddingError) -> Self {
        match err {
            EmbeddingError::Validation(msg) => tonic::Status::invalid_argument(msg),
            EmbeddingError::Model { .. } | EmbeddingError::Reconstruction(_) => {
                tonic::Status::internal(err.to_string())
            }
            EmbeddingError::DeadlineExceeded(_) => tonic::Status::deadline_exceeded(err.to_string()),
            EmbeddingError::Config(msg) => {
                tonic::Status::failed_precondition(format!("Config error: {}", msg))
            }
            EmbeddingError::Internal(msg) => tonic::Status::internal(msg),
        }
    }
}
