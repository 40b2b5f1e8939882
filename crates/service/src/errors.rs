use models::errors::ModelError;
use models::validation::ValidationErrors;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(v) => Self::Validation(v),
            ModelError::Conflict(msg) => Self::Conflict(msg),
            ModelError::NotFound(msg) => Self::NotFound(msg),
            ModelError::Db(msg) => Self::Db(msg),
        }
    }
}
