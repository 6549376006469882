//! The exported C function table.
//!
//! Handles cross the boundary as raw pointers to boxed opaque structs. The
//! host owns a handle between its create call and its release call; this
//! layer never tracks handles. Callers must serialize use of one handle
//! across threads and must not use a handle after its release call; a stale
//! or foreign pointer is undefined behavior, as with the wrapped library.
//! Null handles are tolerated: the release calls are no-ops and every other
//! call returns the failure value for its type.

#![allow(non_snake_case)]

use std::ffi::{c_char, c_int, CStr, CString};
use std::ptr;

use crate::connection::Connection;
use crate::types::QueryResult;

/// Opaque session handle, owned by the host between `ConnectDatabase` and
/// `DisconnectDatabase`.
pub struct ConnectionHandle {
    conn: Connection,
    // Backing storage for the pointer returned by GetErrorMessage;
    // refreshed on each call, valid until the next call on this handle.
    error_buf: CString,
}

impl ConnectionHandle {
    /// Wrap an already-open session into a raw handle the C surface accepts.
    /// Useful for testing or for embedding hosts that build their own
    /// `Connection`. The caller releases it with `DisconnectDatabase`.
    pub fn into_raw(conn: Connection) -> *mut ConnectionHandle {
        Box::into_raw(Box::new(ConnectionHandle {
            conn,
            error_buf: CString::default(),
        }))
    }
}

/// Opaque result handle, owned by the host between `ExecuteQuery` and
/// `ClearResult`. Field values are materialized as C strings up front so
/// pointers returned by `GetValue` stay valid until the handle is released.
pub struct ResultHandle {
    rows: Vec<Vec<CString>>,
}

impl ResultHandle {
    fn from_result(result: &QueryResult) -> ResultHandle {
        let rows = (0..result.row_count())
            .map(|row| {
                (0..result.column_count())
                    .map(|col| c_string_lossy(result.value(row, col).unwrap_or("")))
                    .collect()
            })
            .collect();
        ResultHandle { rows }
    }
}

// Interior NULs cannot arrive over the text protocol, but the conversion
// still must not panic on a hostile string.
fn c_string_lossy(value: &str) -> CString {
    match CString::new(value) {
        Ok(s) => s,
        Err(_) => CString::new(value.replace('\0', "")).unwrap_or_default(),
    }
}

/// Open a session. Returns null on failure (bad or unreachable conninfo,
/// null or non-UTF-8 input); the partially-created session is released
/// before returning.
///
/// # Safety
/// `conninfo` must be null or a valid NUL-terminated C string.
#[no_mangle]
pub unsafe extern "C" fn ConnectDatabase(conninfo: *const c_char) -> *mut ConnectionHandle {
    if conninfo.is_null() {
        return ptr::null_mut();
    }
    let conninfo = match CStr::from_ptr(conninfo).to_str() {
        Ok(s) => s,
        Err(_) => return ptr::null_mut(),
    };
    match Connection::connect(conninfo) {
        Ok(conn) => ConnectionHandle::into_raw(conn),
        Err(e) => {
            tracing::debug!(error = %e, "connect failed");
            ptr::null_mut()
        }
    }
}

/// Release the session unconditionally. Null is a no-op.
///
/// # Safety
/// `conn` must be null or a live handle from `ConnectDatabase`, not used
/// again after this call.
#[no_mangle]
pub unsafe extern "C" fn DisconnectDatabase(conn: *mut ConnectionHandle) {
    if conn.is_null() {
        return;
    }
    drop(Box::from_raw(conn));
}

/// Run one query. Returns null on failure, including statements that
/// produce no tuple set; the error text is recorded on the session and
/// readable through `GetErrorMessage`.
///
/// # Safety
/// `conn` must be null or a live handle from `ConnectDatabase`; `query`
/// must be null or a valid NUL-terminated C string.
#[no_mangle]
pub unsafe extern "C" fn ExecuteQuery(
    conn: *mut ConnectionHandle,
    query: *const c_char,
) -> *mut ResultHandle {
    if conn.is_null() || query.is_null() {
        return ptr::null_mut();
    }
    let handle = &mut *conn;
    let query = match CStr::from_ptr(query).to_str() {
        Ok(s) => s,
        Err(_) => return ptr::null_mut(),
    };
    match handle.conn.execute(query) {
        Ok(result) => Box::into_raw(Box::new(ResultHandle::from_result(&result))),
        Err(_) => ptr::null_mut(),
    }
}

/// Last error text recorded on the session; the empty string when none or
/// when the handle is null. The pointer is valid until the next call on the
/// same handle.
///
/// # Safety
/// `conn` must be null or a live handle from `ConnectDatabase`.
#[no_mangle]
pub unsafe extern "C" fn GetErrorMessage(conn: *mut ConnectionHandle) -> *const c_char {
    if conn.is_null() {
        return c"".as_ptr();
    }
    let handle = &mut *conn;
    handle.error_buf = c_string_lossy(&handle.conn.last_error());
    handle.error_buf.as_ptr()
}

/// Number of tuples in the result; 0 for a null handle.
///
/// # Safety
/// `res` must be null or a live handle from `ExecuteQuery`.
#[no_mangle]
pub unsafe extern "C" fn GetRowCount(res: *const ResultHandle) -> c_int {
    if res.is_null() {
        return 0;
    }
    (*res).rows.len() as c_int
}

/// Field value at the given coordinates as text; null when the handle is
/// null or a coordinate is out of range. SQL NULL is the empty string. The
/// pointer is valid until `ClearResult` on the same handle.
///
/// # Safety
/// `res` must be null or a live handle from `ExecuteQuery`.
#[no_mangle]
pub unsafe extern "C" fn GetValue(
    res: *const ResultHandle,
    row: c_int,
    col: c_int,
) -> *const c_char {
    if res.is_null() || row < 0 || col < 0 {
        return ptr::null();
    }
    let handle = &*res;
    match handle
        .rows
        .get(row as usize)
        .and_then(|values| values.get(col as usize))
    {
        Some(value) => value.as_ptr(),
        None => ptr::null(),
    }
}

/// Release the result set unconditionally. Null is a no-op.
///
/// # Safety
/// `res` must be null or a live handle from `ExecuteQuery`, not used again
/// after this call.
#[no_mangle]
pub unsafe extern "C" fn ClearResult(res: *mut ResultHandle) {
    if res.is_null() {
        return;
    }
    drop(Box::from_raw(res));
}
