use std::sync::{Arc, Mutex};

use tokio::runtime::{Builder, Runtime};

use crate::drivers::TokioPostgresDriver;
use crate::error::Result;
use crate::traits::DatabaseDriver;
use crate::types::QueryResult;

/// A live database session.
///
/// Owns the driver and a current-thread runtime that resolves the driver's
/// futures, so every operation blocks the calling thread until the
/// underlying library call returns. The session is released when the value
/// drops.
///
/// A `Connection` is not safe for unserialized concurrent use from multiple
/// threads; callers sharing one must serialize access themselves.
pub struct Connection {
    runtime: Runtime,
    driver: Arc<dyn DatabaseDriver>,
    last_error: Mutex<String>,
}

impl Connection {
    /// Open a session using the provided connection string.
    ///
    /// Accepts both key/value and URL forms, as the wrapped library defines.
    ///
    /// # Example
    /// ```ignore
    /// let conn = Connection::connect("host=localhost user=postgres dbname=mydb")?;
    /// ```
    pub fn connect(conninfo: &str) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let driver = runtime.block_on(TokioPostgresDriver::connect(conninfo))?;
        Ok(Self {
            runtime,
            driver: Arc::new(driver),
            last_error: Mutex::new(String::new()),
        })
    }

    /// Create a session with a custom driver.
    /// Useful for testing or using alternative database drivers.
    pub fn with_driver(driver: Arc<dyn DatabaseDriver>) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self {
            runtime,
            driver,
            last_error: Mutex::new(String::new()),
        })
    }

    /// Run one SQL string and return its tuple set.
    ///
    /// Statements that complete without producing tuples fail under this
    /// contract. A failure records its display text on the session; a
    /// success clears it.
    pub fn execute(&self, sql: &str) -> Result<QueryResult> {
        match self.runtime.block_on(self.driver.execute(sql)) {
            Ok(raw) => {
                self.last_error.lock().unwrap().clear();
                Ok(QueryResult::from_raw(raw))
            }
            Err(e) => {
                *self.last_error.lock().unwrap() = e.to_string();
                Err(e)
            }
        }
    }

    /// Last error text recorded on the session; empty when none. Never fails.
    pub fn last_error(&self) -> String {
        self.last_error.lock().unwrap().clone()
    }
}
