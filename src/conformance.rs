//! Structural conformance checks for driver implementations.
//!
//! These checks exercise the mandatory operation signatures and the error
//! discipline of the contract without touching backend behavior: no SQL is
//! executed against an open connection, so any driver can run them with no
//! fixture data. Each check consumes fresh connections from a caller-supplied
//! factory and panics with a descriptive message on violation, so they slot
//! directly into a driver's `#[test]` functions.
//!
//! The two size hints (`setinputsizes`/`setoutputsize`) are not asserted on
//! after close: their default bodies are sanctioned no-ops with no state to
//! check, and drivers are allowed to keep them that way.

use crate::connection::Connection;
use crate::cursor::Cursor;
use crate::types::{ParamSet, Params};

/// After `close()`, every operation on the connection and on any cursor
/// created before the close must fail with the misuse-after-close kind.
pub fn check_connection_lifecycle<C, F>(mut factory: F)
where
    C: Connection,
    C::Cursor: std::fmt::Debug,
    F: FnMut() -> C,
{
    let mut conn = factory();
    let mut earlier_cursor = conn
        .cursor()
        .expect("cursor() must succeed on an open connection");
    conn.close().expect("close() must succeed on an open connection");

    let err = conn.cursor().expect_err("cursor() after close must fail");
    assert!(err.is_closed(), "cursor() after close: wrong kind: {err}");

    let err = conn.commit().expect_err("commit() after close must fail");
    assert!(err.is_closed(), "commit() after close: wrong kind: {err}");

    let err = earlier_cursor
        .execute("SELECT 1", &Params::none())
        .expect_err("execute on a cursor of a closed connection must fail");
    assert!(
        err.is_closed(),
        "derived-cursor execute after connection close: wrong kind: {err}"
    );
    let err = earlier_cursor
        .fetchone()
        .expect_err("fetch on a cursor of a closed connection must fail");
    assert!(
        err.is_closed(),
        "derived-cursor fetch after connection close: wrong kind: {err}"
    );

    // A never-used connection must close cleanly.
    factory()
        .close()
        .expect("close() must be safe on a never-used connection");
}

/// A closed cursor rejects every operation with the misuse-after-close kind
/// while its connection stays usable.
pub fn check_cursor_lifecycle<C, F>(mut factory: F)
where
    C: Connection,
    F: FnMut() -> C,
{
    let mut conn = factory();
    let mut cur = conn.cursor().expect("cursor() must succeed");
    cur.close().expect("cursor close() must succeed");

    let err = cur
        .execute("SELECT 1", &Params::none())
        .expect_err("execute on a closed cursor must fail");
    assert!(err.is_closed(), "closed-cursor execute: wrong kind: {err}");

    // One non-empty set, so drivers using the default loop-over-execute
    // implementation still hit their state check.
    let err = cur
        .executemany("SELECT 1", &[ParamSet::Empty])
        .expect_err("executemany on a closed cursor must fail");
    assert!(err.is_closed(), "closed-cursor executemany: wrong kind: {err}");

    for (name, err) in [
        ("fetchone", cur.fetchone().map(|_| ()).expect_err("fetchone on a closed cursor must fail")),
        ("fetchmany", cur.fetchmany(None).map(|_| ()).expect_err("fetchmany on a closed cursor must fail")),
        ("fetchall", cur.fetchall().map(|_| ()).expect_err("fetchall on a closed cursor must fail")),
        ("set_arraysize", cur.set_arraysize(4).expect_err("set_arraysize on a closed cursor must fail")),
    ] {
        assert!(err.is_closed(), "closed-cursor {name}: wrong kind: {err}");
    }

    // The connection itself is unaffected.
    conn.cursor().expect("connection must survive a cursor close");
    conn.close().expect("close() must succeed");
}

/// Fetch operations on a fresh cursor (no execute yet) fail with the
/// precondition-violation kind; `nextset` is allowed to report the
/// unsupported kind instead on drivers without multi-set support.
pub fn check_fetch_preconditions<C, F>(mut factory: F)
where
    C: Connection,
    F: FnMut() -> C,
{
    let mut conn = factory();
    let mut cur = conn.cursor().expect("cursor() must succeed");

    let err = cur.fetchone().expect_err("fetchone before execute must fail");
    assert!(err.is_no_result_set(), "fresh fetchone: wrong kind: {err}");

    let err = cur
        .fetchmany(Some(2))
        .expect_err("fetchmany before execute must fail");
    assert!(err.is_no_result_set(), "fresh fetchmany: wrong kind: {err}");

    let err = cur.fetchall().expect_err("fetchall before execute must fail");
    assert!(err.is_no_result_set(), "fresh fetchall: wrong kind: {err}");

    let err = cur.nextset().expect_err("nextset before execute must fail");
    assert!(
        err.is_no_result_set() || err.is_unsupported(),
        "fresh nextset: wrong kind: {err}"
    );

    assert!(
        cur.description().is_none(),
        "description must be absent before any execute"
    );
    assert!(
        cur.rowcount().is_none(),
        "rowcount must be unknown before any execute"
    );
}

/// `arraysize` starts at 1, accepts positive writes, rejects zero.
pub fn check_arraysize_discipline<C, F>(mut factory: F)
where
    C: Connection,
    F: FnMut() -> C,
{
    let mut conn = factory();
    let mut cur = conn.cursor().expect("cursor() must succeed");

    assert_eq!(cur.arraysize(), 1, "arraysize must default to 1");
    cur.set_arraysize(7).expect("positive arraysize must be accepted");
    assert_eq!(cur.arraysize(), 7, "arraysize write must be observable");
    let err = cur
        .set_arraysize(0)
        .expect_err("zero arraysize must be rejected");
    assert!(err.is_parameter(), "zero arraysize: wrong kind: {err}");
    assert_eq!(cur.arraysize(), 7, "rejected write must not take effect");
}

/// Optional operations either work or fail with the unsupported kind; they
/// never report a misleading success. The hint operations are exempt (no-op
/// allowed by the contract).
pub fn check_optional_op_signaling<C, F>(mut factory: F)
where
    C: Connection,
    F: FnMut() -> C,
{
    let mut conn = factory();
    if let Err(err) = conn.rollback() {
        assert!(
            err.is_unsupported(),
            "rollback on an open connection may only fail as unsupported: {err}"
        );
    }

    let mut cur = conn.cursor().expect("cursor() must succeed");
    if let Err(err) = cur.callproc("conformance_probe", &[]) {
        assert!(
            err.is_unsupported() || err.is_backend(),
            "callproc may only fail as unsupported or as a backend error: {err}"
        );
    }

    cur.setinputsizes(&[Some(16), None])
        .expect("setinputsizes must succeed on an open cursor");
    cur.setoutputsize(1024, Some(0))
        .expect("setoutputsize must succeed on an open cursor");
}

/// Run the full structural suite.
pub fn check_all<C, F>(mut factory: F)
where
    C: Connection,
    C::Cursor: std::fmt::Debug,
    F: FnMut() -> C,
{
    check_connection_lifecycle(&mut factory);
    check_cursor_lifecycle(&mut factory);
    check_fetch_preconditions(&mut factory);
    check_arraysize_discipline(&mut factory);
    check_optional_op_signaling(&mut factory);
}
