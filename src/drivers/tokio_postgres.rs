use async_trait::async_trait;
use tokio_postgres::{Client, NoTls, SimpleQueryMessage};

use crate::error::{PgBridgeError, Result};
use crate::traits::DatabaseDriver;
use crate::types::RawQueryResult;

/// PostgreSQL driver implementation using tokio-postgres.
///
/// Queries go through the simple-query protocol: one SQL string in, text
/// format out, no parameter binding. A statement that completes without
/// sending a row description produced no tuple set, which this layer's
/// contract treats as a failure.
pub struct TokioPostgresDriver {
    client: Client,
}

impl TokioPostgresDriver {
    /// Connect to a PostgreSQL database.
    pub async fn connect(conninfo: &str) -> Result<Self> {
        let (client, connection) = tokio_postgres::connect(conninfo, NoTls)
            .await
            .map_err(|e| PgBridgeError::ConnectionFailed(e.to_string()))?;

        // Drive the socket; the task ends when the client side is dropped
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(error = %e, "connection task terminated");
            }
        });

        tracing::debug!("session established");
        Ok(Self { client })
    }
}

#[async_trait]
impl DatabaseDriver for TokioPostgresDriver {
    async fn execute(&self, sql: &str) -> Result<RawQueryResult> {
        let messages = self
            .client
            .simple_query(sql)
            .await
            .map_err(|e| PgBridgeError::QueryFailed(e.to_string()))?;

        let mut columns: Option<Vec<String>> = None;
        let mut rows: Vec<Vec<String>> = Vec::new();
        let mut rows_affected = 0;

        for message in messages {
            match message {
                SimpleQueryMessage::RowDescription(description) => {
                    columns = Some(
                        description
                            .iter()
                            .map(|column| column.name().to_string())
                            .collect(),
                    );
                }
                SimpleQueryMessage::Row(row) => {
                    if columns.is_none() {
                        columns = Some(
                            row.columns()
                                .iter()
                                .map(|column| column.name().to_string())
                                .collect(),
                        );
                    }
                    // SQL NULL arrives as None; render it as the empty
                    // string, matching the wrapped library's text accessor
                    let values = (0..row.len())
                        .map(|i| row.get(i).unwrap_or("").to_string())
                        .collect();
                    rows.push(values);
                }
                SimpleQueryMessage::CommandComplete(n) => rows_affected = n,
                _ => {}
            }
        }

        match columns {
            Some(columns) => {
                tracing::debug!(rows = rows.len(), "query returned a tuple set");
                Ok(RawQueryResult::new(columns, rows))
            }
            None => Err(PgBridgeError::NoTuples(rows_affected)),
        }
    }
}
