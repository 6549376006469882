mod tokio_postgres;

pub use self::in_memory_test::{InMemoryTestDriver, InMemoryTestResponseBuilder, ScriptedResponse};
pub use self::tokio_postgres::TokioPostgresDriver;
