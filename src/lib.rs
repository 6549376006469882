//! pgbridge - a C-ABI binding layer over a PostgreSQL client
//!
//! Re-exposes the client's connect/exec/result-inspection/free API as a flat
//! exported function table, for a host process that cannot call the client
//! library directly. Underneath the C surface sits a safe core whose two
//! handle types release themselves on every exit path.
//!
//! # Example
//! ```ignore
//! use pgbridge::Connection;
//!
//! let conn = Connection::connect("host=localhost user=postgres dbname=mydb")?;
//! let result = conn.execute("SELECT id, name FROM users")?;
//! for row in 0..result.row_count() {
//!     let id = result.value(row, 0);
//!     let name = result.value(row, 1);
//! }
//! // the result and the session release themselves on drop
//! ```
//!
//! The `ffi` module exports the same operations with C linkage:
//! `ConnectDatabase`, `DisconnectDatabase`, `ExecuteQuery`,
//! `GetErrorMessage`, `GetRowCount`, `GetValue`, `ClearResult`.

pub mod drivers;
pub mod error;
pub mod ffi;
pub mod traits;
pub mod types;

mod connection;

// Re-export main types for convenient access
pub use connection::Connection;
pub use error::{PgBridgeError, Result};
pub use traits::DatabaseDriver;
pub use types::{QueryResult, RawQueryResult};
