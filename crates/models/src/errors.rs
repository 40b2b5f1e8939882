use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ModelError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Map a driver error, turning unique-index violations into `Conflict`
    /// with the supplied caller-facing message.
    pub fn from_db_with_conflict(err: DbErr, conflict: impl FnOnce() -> String) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::Conflict(conflict()),
            _ => Self::Db(err.to_string()),
        }
    }
}

impl From<DbErr> for ModelError {
    fn from(err: DbErr) -> Self {
        Self::from_db_with_conflict(err, || "unique constraint violated".to_string())
    }
}
