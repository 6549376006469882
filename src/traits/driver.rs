use async_trait::async_trait;

use crate::error::Result;
use crate::types::RawQueryResult;

/// Trait for database driver implementations.
/// Drivers are responsible for:
/// - Connecting to the database
/// - Executing one SQL string at a time, text format, no parameter binding
/// - Converting tuple sets to RawQueryResult
#[async_trait]
pub trait DatabaseDriver: Send + Sync {
    /// Execute a single SQL string.
    /// Statements that complete without producing a tuple set fail with
    /// `PgBridgeError::NoTuples` under this contract.
    async fn execute(&self, sql: &str) -> Result<RawQueryResult>;
}
