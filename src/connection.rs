use crate::cursor::Cursor;
use crate::error::DbApiError;

/// Capability contract for one open logical session to a database backend.
///
/// How a connection is constructed (credentials, file or network target,
/// backend options) is entirely driver-specific and outside the contract;
/// everything after construction goes through this trait. Application code
/// written against `Connection`/[`Cursor`] swaps drivers without touching
/// call sites.
///
/// If the backend has an auto-commit mode it must default to *off*; turning
/// it on is a driver extension.
///
/// All methods are blocking and run to completion or failure before
/// returning. A connection may back several live cursors at once (they share
/// its session and observe each other's uncommitted writes); thread-safety
/// under concurrent use is a driver extension, not a contract guarantee.
pub trait Connection {
    /// Concrete cursor type produced by this driver.
    type Cursor: Cursor;

    /// Return a new cursor bound to this connection.
    ///
    /// Succeeds any number of times while the connection is open. The cursor
    /// keeps a non-owning reference to the session, so closing the
    /// connection later makes every derived cursor fail too.
    ///
    /// # Errors
    ///
    /// `DbApiError::Closed` once the connection is closed.
    fn cursor(&mut self) -> Result<Self::Cursor, DbApiError>;

    /// Make all changes since the last commit/rollback durable and visible
    /// to other sessions per the backend's isolation rules.
    ///
    /// Backends without transactions implement this as a successful no-op.
    ///
    /// # Errors
    ///
    /// `DbApiError::Closed` on a closed connection, `DbApiError::Backend`
    /// for engine failures.
    fn commit(&mut self) -> Result<(), DbApiError>;

    /// Discard changes since the last commit/rollback. OPTIONAL.
    ///
    /// Backends without transaction support must signal the absence rather
    /// than silently no-op, so callers can feature-detect at the call site;
    /// that is what the default implementation does.
    ///
    /// # Errors
    ///
    /// `DbApiError::Unsupported` by default; supporting drivers return
    /// `DbApiError::Closed`/`DbApiError::Backend` as applicable.
    fn rollback(&mut self) -> Result<(), DbApiError> {
        Err(DbApiError::unsupported("rollback"))
    }

    /// Close the session now rather than whenever the value is dropped.
    ///
    /// After return, any operation on this connection or on any cursor
    /// derived from it fails with `DbApiError::Closed`. Uncommitted changes
    /// are implicitly rolled back. Must be safe to call on a connection that
    /// was never used. A second `close` must not silently succeed while
    /// producing observable side effects; whether it errors is
    /// driver-defined.
    ///
    /// # Errors
    ///
    /// Driver-defined for double-close; `DbApiError::Backend` for engine
    /// failures during teardown.
    fn close(&mut self) -> Result<(), DbApiError>;
}
