use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Internal error: {0}")]
    InternalWithMsg(String),
}

impl AppError {
    /// True for unique-constraint violations, so callers can tell
    /// "this date is already materialized" apart from real store failures.
    pub fn is_duplicate(&self) -> bool {
        if let AppError::Database(e) = self
            && let Some(db_err) = e.as_database_error()
        {
            // 2067 / 1555 = SQLite unique constraint codes
            let code = db_err.code().unwrap_or_default();
            return code == "2067" || code == "1555";
        }
        false
    }
}
