//! # Database Error Types
//!
//! Error types for storage operations, plus the combined error the
//! order-placement surface returns.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                            │
//! │                                                                 │
//! │  SQLite Error (sqlx::Error)                                     │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  DbError (this module)   ← storage failures, 5xx-class          │
//! │       │                                                         │
//! │       ├──────────────► OrderError::Storage                      │
//! │       │                                                         │
//! │  CoreError (venda-core) ← domain failures, 4xx-class            │
//! │       │                                                         │
//! │       └──────────────► OrderError::Domain                       │
//! │                                                                 │
//! │  Callers classify via OrderError::is_client_error()             │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use venda_core::{CoreError, ValidationError};

// =============================================================================
// DbError
// =============================================================================

/// Storage operation errors. These wrap sqlx errors with context and are
/// treated as retryable by the caller; the core never retries on its own.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found where a row was required.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation (duplicate primary key, etc.).
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Foreign key constraint violation.
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Database connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Transaction begin/commit/rollback failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// Converts sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → Analyze message for constraint type
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite constraint messages:
                //   "UNIQUE constraint failed: <table>.<column>"
                //   "FOREIGN KEY constraint failed"
                if msg.contains("UNIQUE constraint failed") {
                    let field = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    DbError::UniqueViolation {
                        field,
                        value: "unknown".to_string(),
                    }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for storage operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// OrderError
// =============================================================================

/// The error surface of the order operations (placement, status update,
/// reads). Domain failures are caller-correctable; storage failures are not.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Validation / not-found / insufficient-stock (maps to 4xx).
    #[error(transparent)]
    Domain(#[from] CoreError),

    /// Underlying storage failure (maps to 5xx); always implies the
    /// transaction was rolled back in full.
    #[error(transparent)]
    Storage(#[from] DbError),
}

impl OrderError {
    /// True for failures the caller can correct (validation, unknown ids,
    /// insufficient stock); false for storage faults worth retrying.
    pub fn is_client_error(&self) -> bool {
        matches!(self, OrderError::Domain(_))
    }
}

impl From<ValidationError> for OrderError {
    fn from(err: ValidationError) -> Self {
        OrderError::Domain(CoreError::Validation(err))
    }
}

impl From<sqlx::Error> for OrderError {
    fn from(err: sqlx::Error) -> Self {
        OrderError::Storage(DbError::from(err))
    }
}

/// Result type for order operations.
pub type OrderResult<T> = Result<T, OrderError>;

// =============================================================================
// Unit Tests
// =============================================================================
