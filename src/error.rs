use thiserror::Error;

pub type Result<T> = std::result::Result<T, TallyError>;

#[derive(Error, Debug)]
pub enum TallyError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("Unknown department: {0}")]
    UnknownDepartment(String),

    #[error("Invalid precinct id: {0}")]
    InvalidPrecinct(String),

    #[error("Vote count overflow: {0}")]
    Overflow(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TallyError {
    // Store failures are the only errors that come from outside the request
    pub fn is_store_error(&self) -> bool {
        matches!(self, TallyError::Database(_) | TallyError::Cache(_))
    }
}
