use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::connection::Connection;
use crate::error::DbApiError;
use crate::scripted::cursor::ScriptedCursor;
use crate::scripted::script::Script;

/// Transaction-boundary events recorded by the scripted session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxEvent {
    Commit,
    Rollback,
    /// Rollback performed by `close()` because uncommitted writes existed.
    ImplicitRollback,
}

/// Session state shared between a connection and every cursor it created.
///
/// Cursors hold an `Arc` to this rather than a borrow of the connection, so
/// any number of them can be live at once and closing the connection is
/// observable from all of them.
#[derive(Debug)]
pub(crate) struct Session {
    pub(crate) open: bool,
    pub(crate) script: Script,
    /// Rows written since the last commit/rollback. Shared session state:
    /// sibling cursors see each other's uncommitted writes through it.
    pub(crate) pending_writes: u64,
    pub(crate) tx_log: Vec<TxEvent>,
}

pub(crate) fn lock(session: &Arc<Mutex<Session>>) -> MutexGuard<'_, Session> {
    session
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// In-memory reference driver: a [`Connection`] whose behavior is entirely
/// canned by a [`Script`].
///
/// It exists to exercise contract-generic code and the conformance kit
/// without a database engine. Auto-commit is off, as the contract requires:
/// scripted writes accumulate as pending until `commit`/`rollback`, and
/// `close` with pending writes performs the implicit rollback.
#[derive(Debug)]
pub struct ScriptedConnection {
    session: Arc<Mutex<Session>>,
}

impl ScriptedConnection {
    /// Open a session behaving per `script`.
    #[must_use]
    pub fn new(script: Script) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session {
                open: true,
                script,
                pending_writes: 0,
                tx_log: Vec::new(),
            })),
        }
    }

    /// Writes executed since the last commit/rollback.
    ///
    /// Extension for tests; observable regardless of open/closed state.
    #[must_use]
    pub fn pending_writes(&self) -> u64 {
        lock(&self.session).pending_writes
    }

    /// Transaction-boundary events in occurrence order.
    ///
    /// Extension for tests; observable regardless of open/closed state.
    #[must_use]
    pub fn transaction_log(&self) -> Vec<TxEvent> {
        lock(&self.session).tx_log.clone()
    }

    fn guard_open(&self) -> Result<(), DbApiError> {
        if lock(&self.session).open {
            Ok(())
        } else {
            Err(DbApiError::closed("connection"))
        }
    }
}

impl Connection for ScriptedConnection {
    type Cursor = ScriptedCursor;

    fn cursor(&mut self) -> Result<Self::Cursor, DbApiError> {
        self.guard_open()?;
        Ok(ScriptedCursor::new(self.session.clone()))
    }

    fn commit(&mut self) -> Result<(), DbApiError> {
        self.guard_open()?;
        let mut session = lock(&self.session);
        debug!(pending = session.pending_writes, "commit");
        session.pending_writes = 0;
        session.tx_log.push(TxEvent::Commit);
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), DbApiError> {
        self.guard_open()?;
        let mut session = lock(&self.session);
        if !session.script.supports_rollback() {
            return Err(DbApiError::unsupported("rollback"));
        }
        debug!(pending = session.pending_writes, "rollback");
        session.pending_writes = 0;
        session.tx_log.push(TxEvent::Rollback);
        Ok(())
    }

    fn close(&mut self) -> Result<(), DbApiError> {
        let mut session = lock(&self.session);
        if !session.open {
            return Err(DbApiError::closed("connection"));
        }
        if session.pending_writes > 0 {
            warn!(
                pending = session.pending_writes,
                "closing with uncommitted writes, rolling back"
            );
            session.pending_writes = 0;
            session.tx_log.push(TxEvent::ImplicitRollback);
        }
        session.open = false;
        Ok(())
    }
}
