use crate::database::DatabaseError;
use sqlx::Error as SqlxError;
use thiserror::Error;

/// Application-level error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Caller supplied a value normalization cannot repair
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Not found errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// A composed query failed to execute or decode
    #[error("Query failed: {0}")]
    QueryFailed(#[from] RepositoryError),

    /// A query exceeded its deadline
    #[error("Timed out: {0}")]
    Timeout(String),

    /// Database setup errors (pool creation, migrations)
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Check if error is a database connection error
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            AppError::Database(DatabaseError::PoolCreation(_))
                | AppError::Database(DatabaseError::ConnectionTimeout)
                | AppError::QueryFailed(RepositoryError::Query(
                    SqlxError::PoolTimedOut | SqlxError::PoolClosed | SqlxError::Io(_)
                ))
        )
    }

    /// Check if error is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }

    /// Read-only operations that failed for transient reasons may be retried
    /// with backoff; argument errors never succeed on retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::QueryFailed(_) | AppError::Timeout(_))
            || self.is_connection_error()
    }

    /// Get HTTP status code for the error
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::InvalidArgument(_) => 400,
            AppError::NotFound(_) => 404,
            AppError::Timeout(_) => 503,
            AppError::QueryFailed(_) | AppError::Database(_) | AppError::Config(_) => 500,
        }
    }

    /// Stable error code for response envelopes
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidArgument(_) => "INVALID_ARGUMENT",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Timeout(_) => "UNAVAILABLE",
            AppError::QueryFailed(_) | AppError::Database(_) | AppError::Config(_) => {
                "INTERNAL_ERROR"
            }
        }
    }
}

/// Repository-specific error types
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Database query error
    #[error("Query error: {0}")]
    Query(SqlxError),

    /// A returned row did not match the expected shape
    #[error("Malformed row: {0}")]
    RowDecode(SqlxError),
}

impl From<SqlxError> for RepositoryError {
    fn from(err: SqlxError) -> Self {
        match err {
            SqlxError::ColumnDecode { .. }
            | SqlxError::ColumnNotFound(_)
            | SqlxError::ColumnIndexOutOfBounds { .. }
            | SqlxError::Decode(_)
            | SqlxError::TypeNotFound { .. } => RepositoryError::RowDecode(err),
            _ => RepositoryError::Query(err),
        }
    }
}
