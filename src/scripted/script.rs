use std::collections::HashMap;

use crate::column::ColumnDesc;
use crate::results::ResultSet;
use crate::types::Value;

/// One result set's worth of canned data.
#[derive(Debug, Clone, Default)]
pub struct ResultSpec {
    pub description: Vec<ColumnDesc>,
    pub rows: Vec<Vec<Value>>,
}

impl ResultSpec {
    #[must_use]
    pub fn new(description: Vec<ColumnDesc>, rows: Vec<Vec<Value>>) -> Self {
        Self { description, rows }
    }

    pub(crate) fn build(&self) -> ResultSet {
        let mut set = ResultSet::with_capacity(self.description.clone(), self.rows.len());
        for row in &self.rows {
            set.push_values(row.clone());
        }
        set
    }
}

/// What a scripted operation does when executed.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Produce one or more result sets; sets after the first are reached
    /// through `nextset` (when the script enables it).
    ResultSets(Vec<ResultSpec>),
    /// Row-less operation affecting this many rows. Counts as an
    /// uncommitted write on the session until commit/rollback.
    Affected(u64),
    /// Engine-side failure, surfaced as a backend error.
    Fail(String),
}

impl Outcome {
    /// Convenience for the common single-result-set case.
    #[must_use]
    pub fn rows(description: Vec<ColumnDesc>, rows: Vec<Vec<Value>>) -> Self {
        Outcome::ResultSets(vec![ResultSpec::new(description, rows)])
    }
}

/// Canned behavior of a stored procedure.
///
/// `out_args` is matched positionally against the caller's arguments:
/// `Some(v)` positions are output/in-out parameters replaced by `v`, `None`
/// positions are pure inputs passed through untouched. The lengths must
/// agree at call time.
#[derive(Debug, Clone, Default)]
pub struct ProcSpec {
    pub out_args: Vec<Option<Value>>,
    pub result: Option<ResultSpec>,
}

impl ProcSpec {
    #[must_use]
    pub fn new(out_args: Vec<Option<Value>>) -> Self {
        Self {
            out_args,
            result: None,
        }
    }

    /// Also produce a result set, fetchable after the call.
    #[must_use]
    pub fn with_result(mut self, result: ResultSpec) -> Self {
        self.result = Some(result);
        self
    }
}

/// Behavior table for the scripted driver.
///
/// The contract deliberately excludes SQL parsing, so the reference driver
/// does none: every operation string is looked up here verbatim, and
/// executing anything unscripted is a backend error, the same way a real
/// engine rejects SQL it cannot handle.
///
/// Capability flags default to off so the unsupported-operation paths are
/// exercised by default; stored-procedure support is implied by registering
/// at least one procedure.
#[derive(Debug, Clone, Default)]
pub struct Script {
    outcomes: HashMap<String, Outcome>,
    procedures: HashMap<String, ProcSpec>,
    supports_rollback: bool,
    supports_nextset: bool,
}

impl Script {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the outcome of executing `operation`.
    #[must_use]
    pub fn on(mut self, operation: impl Into<String>, outcome: Outcome) -> Self {
        self.outcomes.insert(operation.into(), outcome);
        self
    }

    /// Register a stored procedure (this also turns `callproc` support on).
    #[must_use]
    pub fn on_proc(mut self, name: impl Into<String>, spec: ProcSpec) -> Self {
        self.procedures.insert(name.into(), spec);
        self
    }

    /// Enable transaction rollback support.
    #[must_use]
    pub fn with_rollback(mut self) -> Self {
        self.supports_rollback = true;
        self
    }

    /// Enable multiple-result-set support (`nextset`).
    #[must_use]
    pub fn with_nextset(mut self) -> Self {
        self.supports_nextset = true;
        self
    }

    pub(crate) fn outcome(&self, operation: &str) -> Option<&Outcome> {
        self.outcomes.get(operation)
    }

    pub(crate) fn procedure(&self, name: &str) -> Option<&ProcSpec> {
        self.procedures.get(name)
    }

    pub(crate) fn has_procedures(&self) -> bool {
        !self.procedures.is_empty()
    }

    pub(crate) fn supports_rollback(&self) -> bool {
        self.supports_rollback
    }

    pub(crate) fn supports_nextset(&self) -> bool {
        self.supports_nextset
    }
}
