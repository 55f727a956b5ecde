use crate::column::ColumnDesc;
use crate::error::DbApiError;
use crate::results::Row;
use crate::types::{ParamSet, Params, Value};

/// Capability contract for a database cursor: one execute/fetch context bound
/// to the connection that created it.
///
/// A cursor moves through three logical states. *Fresh* (nothing executed
/// yet), *Active* (an operation has run, possibly carrying a pending result
/// set), and *Closed* (terminal). Implementations are expected to hold the
/// state in an explicit field checked at the top of every operation rather
/// than rely on drop timing; only an explicit [`close`](Cursor::close) has
/// defined semantics.
///
/// Cursors created from the same connection are not isolated: a change made
/// through one is immediately visible to its siblings. Whether cursors from
/// *different* connections see each other's uncommitted work depends on the
/// backend's transaction support.
///
/// Every method is a blocking call that runs to completion or failure before
/// returning. Thread-safety of a single cursor under concurrent use is not
/// part of the contract; a driver that offers it documents it as an
/// extension.
pub trait Cursor {
    /// Per-column metadata of the pending result set.
    ///
    /// `Some` only after an execute that produced rows; `None` on a fresh
    /// cursor or after a row-less operation. Reflects the most recent
    /// operation only.
    fn description(&self) -> Option<&[ColumnDesc]>;

    /// Rows produced (DQL) or affected (DML) by the last operation.
    ///
    /// `None` when no operation has run yet or the driver cannot determine
    /// the count. Note that for updates some engines report rows *matched*
    /// by the WHERE clause rather than rows actually changed; the contract
    /// does not paper over that difference.
    fn rowcount(&self) -> Option<u64>;

    /// Default batch size for [`fetchmany`](Cursor::fetchmany) when no
    /// explicit size is given. Starts at 1.
    fn arraysize(&self) -> usize;

    /// Change the default batch size.
    ///
    /// # Errors
    ///
    /// `DbApiError::Parameter` if `size` is zero, `DbApiError::Closed` on a
    /// closed cursor.
    fn set_arraysize(&mut self, size: usize) -> Result<(), DbApiError>;

    /// Bind `params` into `operation` and run it.
    ///
    /// Placeholder notation is driver-defined. Any result-set state from a
    /// previous operation is discarded before the new outcome becomes
    /// observable. The cursor retains the operation text, so a driver may
    /// reuse a prepared form when the same text is executed again. Bind
    /// values are never mutated.
    ///
    /// There is no return payload; callers observe the outcome through
    /// [`description`](Cursor::description), [`rowcount`](Cursor::rowcount)
    /// and the fetch methods.
    ///
    /// Passing [`Params::Batch`] here is accepted for backward compatibility
    /// and behaves as [`executemany`](Cursor::executemany); new code should
    /// call `executemany` directly.
    ///
    /// # Errors
    ///
    /// `DbApiError::Closed` on a closed cursor or connection,
    /// `DbApiError::Backend` for engine failures.
    fn execute(&mut self, operation: &str, params: &Params) -> Result<(), DbApiError>;

    /// Run `operation` once per entry of `param_sets`.
    ///
    /// The provided implementation loops over [`execute`](Cursor::execute);
    /// drivers are free to override it with a single batched call. Running a
    /// result-set-producing operation here is undefined by the contract and
    /// drivers may reject it.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`execute`](Cursor::execute).
    fn executemany(&mut self, operation: &str, param_sets: &[ParamSet]) -> Result<(), DbApiError> {
        for set in param_sets {
            self.execute(operation, &Params::Set(set.clone()))?;
        }
        Ok(())
    }

    /// Call a stored procedure. OPTIONAL.
    ///
    /// On success, returns a copy of `args` with output and in/out positions
    /// replaced by the procedure's results, input positions untouched. A
    /// result set produced by the procedure becomes available through the
    /// standard fetch methods.
    ///
    /// # Errors
    ///
    /// `DbApiError::Unsupported` when the driver has no stored-procedure
    /// support (the default), `DbApiError::Closed` on a closed handle.
    fn callproc(&mut self, procname: &str, args: &[Value]) -> Result<Vec<Value>, DbApiError> {
        let _ = args;
        Err(DbApiError::unsupported(format!("callproc({procname})")))
    }

    /// Next unconsumed row, or `Ok(None)` once the result set is exhausted.
    ///
    /// # Errors
    ///
    /// `DbApiError::NoResultSet` if no execute has run or the last one
    /// produced no rows, `DbApiError::Closed` on a closed handle.
    fn fetchone(&mut self) -> Result<Option<Row>, DbApiError>;

    /// Next `size` rows (or [`arraysize`](Cursor::arraysize) rows when
    /// `size` is `None`); fewer at the tail and an empty vector once the set
    /// is exhausted.
    ///
    /// The provided implementation loops over [`fetchone`](Cursor::fetchone);
    /// drivers that can drain a batch in one step should override it.
    ///
    /// # Errors
    ///
    /// Same preconditions as [`fetchone`](Cursor::fetchone).
    fn fetchmany(&mut self, size: Option<usize>) -> Result<Vec<Row>, DbApiError> {
        let size = size.unwrap_or_else(|| self.arraysize());
        let mut rows = Vec::with_capacity(size);
        while rows.len() < size {
            match self.fetchone()? {
                Some(row) => rows.push(row),
                None => break,
            }
        }
        Ok(rows)
    }

    /// All remaining unconsumed rows; empty if none remain.
    ///
    /// # Errors
    ///
    /// Same preconditions as [`fetchone`](Cursor::fetchone).
    fn fetchall(&mut self) -> Result<Vec<Row>, DbApiError> {
        let mut rows = Vec::new();
        while let Some(row) = self.fetchone()? {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Advance to the next result set of a multi-set operation, discarding
    /// unconsumed rows of the current one. OPTIONAL.
    ///
    /// `Ok(true)` when a new set is now active; `Ok(false)` when there are
    /// no more sets (fetches then fail with `NoResultSet`).
    ///
    /// # Errors
    ///
    /// `DbApiError::Unsupported` when the driver has no multi-set support
    /// (the default), `DbApiError::NoResultSet` if no operation has
    /// executed, `DbApiError::Closed` on a closed handle.
    fn nextset(&mut self) -> Result<bool, DbApiError> {
        Err(DbApiError::unsupported("nextset"))
    }

    /// Predeclare parameter sizes ahead of an execute. Pure hint; doing
    /// nothing is a conforming implementation and is the default.
    ///
    /// # Errors
    ///
    /// `DbApiError::Closed` on a closed handle, if the driver checks.
    fn setinputsizes(&mut self, sizes: &[Option<usize>]) -> Result<(), DbApiError> {
        let _ = sizes;
        Ok(())
    }

    /// Set a fetch buffer size for a large column (`column`) or for all
    /// large columns (`None`). Pure hint; doing nothing is a conforming
    /// implementation and is the default.
    ///
    /// # Errors
    ///
    /// `DbApiError::Closed` on a closed handle, if the driver checks.
    fn setoutputsize(&mut self, size: usize, column: Option<usize>) -> Result<(), DbApiError> {
        let _ = (size, column);
        Ok(())
    }

    /// Close the cursor now rather than whenever it is dropped.
    ///
    /// Terminal: every later operation fails with `DbApiError::Closed`.
    /// Whether a second `close` errors is driver-defined, but it must not
    /// corrupt state either way.
    ///
    /// # Errors
    ///
    /// Driver-defined for double-close.
    fn close(&mut self) -> Result<(), DbApiError>;
}
