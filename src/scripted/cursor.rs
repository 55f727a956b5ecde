use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::column::ColumnDesc;
use crate::cursor::Cursor;
use crate::error::DbApiError;
use crate::results::{ResultSet, Row};
use crate::scripted::connection::{Session, lock};
use crate::scripted::script::Outcome;
use crate::types::{ParamSet, Params, Value};

/// Lifecycle of a cursor, checked at the top of every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CursorState {
    /// No operation executed yet.
    Fresh,
    /// An operation has executed; a result set may or may not be pending.
    Active,
    /// Terminal.
    Closed,
}

/// Cursor of the scripted reference driver.
///
/// Carries an explicit state field, the one-shot [`ResultSet`] buffer of the
/// current set, and the queue of further sets for `nextset`. Closing is
/// idempotent here (a driver-defined choice; the connection side errors on
/// double-close to show the other one).
#[derive(Debug)]
pub struct ScriptedCursor {
    session: Arc<Mutex<Session>>,
    state: CursorState,
    arraysize: usize,
    last_operation: Option<String>,
    current: Option<ResultSet>,
    queued: VecDeque<ResultSet>,
    rowcount: Option<u64>,
}

impl ScriptedCursor {
    pub(crate) fn new(session: Arc<Mutex<Session>>) -> Self {
        Self {
            session,
            state: CursorState::Fresh,
            arraysize: 1,
            last_operation: None,
            current: None,
            queued: VecDeque::new(),
            rowcount: None,
        }
    }

    fn guard_open(&self) -> Result<(), DbApiError> {
        if self.state == CursorState::Closed {
            return Err(DbApiError::closed("cursor"));
        }
        if !lock(&self.session).open {
            return Err(DbApiError::closed("connection"));
        }
        Ok(())
    }

    /// Drop all result-set state from the previous operation.
    fn discard_results(&mut self) {
        self.current = None;
        self.queued.clear();
        self.rowcount = None;
    }

    fn retain_operation(&mut self, operation: &str) {
        if self.last_operation.as_deref() == Some(operation) {
            debug!(operation, "re-executing retained operation");
        } else {
            self.last_operation = Some(operation.to_string());
        }
    }

    fn pending_set(&mut self, context: &str) -> Result<&mut ResultSet, DbApiError> {
        match self.state {
            CursorState::Fresh => Err(DbApiError::no_result_set(format!(
                "{context} before any operation was executed"
            ))),
            _ => self.current.as_mut().ok_or_else(|| {
                DbApiError::no_result_set(format!(
                    "{context} but the last operation produced no rows"
                ))
            }),
        }
    }

    fn lookup_outcome(&self, operation: &str) -> Result<Outcome, DbApiError> {
        lock(&self.session)
            .script
            .outcome(operation)
            .cloned()
            .ok_or_else(|| DbApiError::backend(format!("unknown operation: {operation}")))
    }

    fn record_write(&mut self, affected: u64) {
        lock(&self.session).pending_writes += affected;
    }
}

impl Cursor for ScriptedCursor {
    fn description(&self) -> Option<&[ColumnDesc]> {
        self.current.as_ref().map(ResultSet::description)
    }

    fn rowcount(&self) -> Option<u64> {
        self.rowcount
    }

    fn arraysize(&self) -> usize {
        self.arraysize
    }

    fn set_arraysize(&mut self, size: usize) -> Result<(), DbApiError> {
        self.guard_open()?;
        if size == 0 {
            return Err(DbApiError::Parameter(
                "arraysize must be a positive integer".into(),
            ));
        }
        self.arraysize = size;
        Ok(())
    }

    fn execute(&mut self, operation: &str, params: &Params) -> Result<(), DbApiError> {
        self.guard_open()?;

        // Deprecated compatibility path: a batch through execute behaves as
        // executemany.
        if let Params::Batch(sets) = params {
            return self.executemany(operation, sets);
        }

        self.retain_operation(operation);
        self.discard_results();
        let outcome = self.lookup_outcome(operation)?;
        self.state = CursorState::Active;

        match outcome {
            Outcome::ResultSets(specs) => {
                debug!(operation, sets = specs.len(), "scripted query");
                let mut sets: VecDeque<ResultSet> = specs.iter().map(|s| s.build()).collect();
                let first = sets.pop_front().unwrap_or_default();
                self.rowcount = Some(first.remaining() as u64);
                self.current = Some(first);
                self.queued = sets;
                Ok(())
            }
            Outcome::Affected(n) => {
                debug!(operation, affected = n, "scripted write");
                self.rowcount = Some(n);
                self.record_write(n);
                Ok(())
            }
            Outcome::Fail(message) => Err(DbApiError::backend(message)),
        }
    }

    fn executemany(&mut self, operation: &str, param_sets: &[ParamSet]) -> Result<(), DbApiError> {
        self.guard_open()?;
        self.retain_operation(operation);
        self.discard_results();
        let outcome = self.lookup_outcome(operation)?;
        self.state = CursorState::Active;

        match outcome {
            Outcome::ResultSets(_) => Err(DbApiError::Parameter(
                "executemany over a result-producing operation".into(),
            )),
            Outcome::Affected(per_set) => {
                let total = per_set * param_sets.len() as u64;
                debug!(operation, sets = param_sets.len(), affected = total, "scripted batch");
                self.rowcount = Some(total);
                self.record_write(total);
                Ok(())
            }
            Outcome::Fail(message) => Err(DbApiError::backend(message)),
        }
    }

    fn callproc(&mut self, procname: &str, args: &[Value]) -> Result<Vec<Value>, DbApiError> {
        self.guard_open()?;
        let spec = {
            let session = lock(&self.session);
            if !session.script.has_procedures() {
                return Err(DbApiError::unsupported(format!("callproc({procname})")));
            }
            session
                .script
                .procedure(procname)
                .cloned()
                .ok_or_else(|| DbApiError::backend(format!("unknown procedure: {procname}")))?
        };
        if spec.out_args.len() != args.len() {
            return Err(DbApiError::Parameter(format!(
                "procedure {procname} takes {} arguments, {} given",
                spec.out_args.len(),
                args.len()
            )));
        }

        self.discard_results();
        self.state = CursorState::Active;
        if let Some(result) = &spec.result {
            let set = result.build();
            self.rowcount = Some(set.remaining() as u64);
            self.current = Some(set);
        }

        // Output and in/out positions take the scripted value, pure inputs
        // pass through untouched.
        let returned = spec
            .out_args
            .iter()
            .zip(args)
            .map(|(out, input)| out.clone().unwrap_or_else(|| input.clone()))
            .collect();
        Ok(returned)
    }

    fn fetchone(&mut self) -> Result<Option<Row>, DbApiError> {
        self.guard_open()?;
        Ok(self.pending_set("fetchone")?.fetch_one())
    }

    fn fetchmany(&mut self, size: Option<usize>) -> Result<Vec<Row>, DbApiError> {
        self.guard_open()?;
        let size = size.unwrap_or(self.arraysize);
        Ok(self.pending_set("fetchmany")?.fetch_many(size))
    }

    fn fetchall(&mut self) -> Result<Vec<Row>, DbApiError> {
        self.guard_open()?;
        Ok(self.pending_set("fetchall")?.fetch_all())
    }

    fn nextset(&mut self) -> Result<bool, DbApiError> {
        self.guard_open()?;
        if !lock(&self.session).script.supports_nextset() {
            return Err(DbApiError::unsupported("nextset"));
        }
        if self.state == CursorState::Fresh {
            return Err(DbApiError::no_result_set(
                "nextset before any operation was executed",
            ));
        }
        match self.queued.pop_front() {
            Some(set) => {
                self.rowcount = Some(set.remaining() as u64);
                self.current = Some(set);
                Ok(true)
            }
            None => {
                // No more sets; unconsumed rows of the current one are gone.
                self.current = None;
                Ok(false)
            }
        }
    }

    fn setinputsizes(&mut self, _sizes: &[Option<usize>]) -> Result<(), DbApiError> {
        self.guard_open()
    }

    fn setoutputsize(&mut self, _size: usize, _column: Option<usize>) -> Result<(), DbApiError> {
        self.guard_open()
    }

    fn close(&mut self) -> Result<(), DbApiError> {
        self.state = CursorState::Closed;
        self.discard_results();
        Ok(())
    }
}
