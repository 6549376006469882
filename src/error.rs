use thiserror::Error;

/// Error type for pgbridge operations
#[derive(Debug, Error)]
pub enum PgBridgeError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Statement produced no tuple set ({0} rows affected)")]
    NoTuples(u64),

    #[error("Runtime error: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Result type alias for pgbridge operations
pub type Result<T> = std::result::Result<T, PgBridgeError>;
