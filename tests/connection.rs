use std::sync::Arc;

use pgbridge::drivers::{InMemoryTestDriver, InMemoryTestResponseBuilder};
use pgbridge::error::PgBridgeError;
use pgbridge::traits::DatabaseDriver;
use pgbridge::Connection;

fn users_fixture() -> InMemoryTestDriver {
    InMemoryTestDriver::new().with_tuples(
        InMemoryTestResponseBuilder::new()
            .columns(&["id", "name"])
            .row(&["1", "Alice"])
            .row(&["2", "Bob"])
            .build(),
    )
}

#[test]
fn test_execute_returns_tuple_set() {
    let driver = Arc::new(users_fixture());
    let conn = Connection::with_driver(Arc::clone(&driver) as Arc<dyn DatabaseDriver>).unwrap();

    let result = conn.execute("SELECT id, name FROM users").unwrap();

    driver.assert_last_query("SELECT id, name FROM users");
    driver.assert_query_count(1);
    assert_eq!(result.row_count(), 2);
    assert_eq!(result.column_count(), 2);
    assert_eq!(result.value(0, 1), Some("Alice"));
    assert_eq!(result.value(1, 0), Some("2"));
}

#[test]
fn test_zero_row_select_is_a_valid_result() {
    let driver = Arc::new(
        InMemoryTestDriver::new()
            .with_tuples(InMemoryTestResponseBuilder::new().columns(&["id"]).build()),
    );
    let conn = Connection::with_driver(driver as Arc<dyn DatabaseDriver>).unwrap();

    let result = conn.execute("SELECT id FROM users WHERE false").unwrap();

    assert_eq!(result.row_count(), 0);
    assert_eq!(result.column_count(), 1);
    assert!(result.is_empty());
}

#[test]
fn test_statement_without_tuples_fails() {
    let driver = Arc::new(InMemoryTestDriver::new().with_command(3));
    let conn = Connection::with_driver(driver as Arc<dyn DatabaseDriver>).unwrap();

    let err = conn.execute("UPDATE users SET name = 'x'").unwrap_err();

    match err {
        PgBridgeError::NoTuples(rows_affected) => assert_eq!(rows_affected, 3),
        other => panic!("Expected NoTuples error, got {:?}", other),
    }
    assert!(!conn.last_error().is_empty());
    assert!(conn.last_error().contains("no tuple set"));
}

#[test]
fn test_last_error_starts_empty_and_clears_on_success() {
    let driver = Arc::new(
        InMemoryTestDriver::new()
            .with_failure("relation \"users\" does not exist")
            .with_tuples(
                InMemoryTestResponseBuilder::new()
                    .columns(&["id"])
                    .row(&["1"])
                    .build(),
            ),
    );
    let conn = Connection::with_driver(driver as Arc<dyn DatabaseDriver>).unwrap();

    assert_eq!(conn.last_error(), "");

    assert!(conn.execute("SELECT id FROM users").is_err());
    assert!(conn.last_error().contains("does not exist"));

    conn.execute("SELECT 1").unwrap();
    assert_eq!(conn.last_error(), "");
}

#[test]
fn test_query_failure_records_error_text() {
    let driver = Arc::new(InMemoryTestDriver::new().with_failure("syntax error at or near \"SELEC\""));
    let conn = Connection::with_driver(driver as Arc<dyn DatabaseDriver>).unwrap();

    let err = conn.execute("SELEC 1").unwrap_err();

    assert!(matches!(err, PgBridgeError::QueryFailed(_)));
    assert!(conn.last_error().contains("syntax error"));
}

#[tokio::test]
async fn test_scripted_responses_are_consumed_in_order() {
    let driver = InMemoryTestDriver::new()
        .with_tuples(
            InMemoryTestResponseBuilder::new()
                .columns(&["n"])
                .row(&["1"])
                .build(),
        )
        .with_command(0);

    let first = driver.execute("SELECT 1").await.unwrap();
    assert_eq!(first.rows, vec![vec!["1".to_string()]]);

    let second = driver.execute("DELETE FROM users").await.unwrap_err();
    assert!(matches!(second, PgBridgeError::NoTuples(0)));

    // Queue drained; the default response is an empty tuple set
    let third = driver.execute("SELECT 2").await.unwrap();
    assert!(third.rows.is_empty());

    driver.assert_query_count(3);
}
