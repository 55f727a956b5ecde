use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use crate::column::ColumnDesc;
use crate::results::Row;
use crate::types::Value;

/// A materialized result set with one-shot consumption.
///
/// Rows are buffered in arrival order and handed out from the front by the
/// `fetch_*` methods; a row delivered once is never delivered again and the
/// read position never rewinds. Drivers embed one of these per pending result
/// set and rebuild it wholesale on re-execution.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    description: Vec<ColumnDesc>,
    rows: VecDeque<Row>,
    /// Column names shared by all rows (to avoid duplicating in each row)
    column_names: Arc<Vec<String>>,
    column_index_cache: Arc<HashMap<String, usize>>,
}

impl ResultSet {
    /// Create an empty result set carrying the given column metadata.
    #[must_use]
    pub fn new(description: Vec<ColumnDesc>) -> Self {
        let column_names = Arc::new(
            description
                .iter()
                .map(|col| col.name.clone())
                .collect::<Vec<_>>(),
        );
        let cache = Arc::new(
            column_names
                .iter()
                .enumerate()
                .map(|(i, name)| (name.clone(), i))
                .collect::<HashMap<_, _>>(),
        );
        Self {
            description,
            rows: VecDeque::new(),
            column_names,
            column_index_cache: cache,
        }
    }

    /// Create with a known row capacity.
    #[must_use]
    pub fn with_capacity(description: Vec<ColumnDesc>, capacity: usize) -> Self {
        let mut set = Self::new(description);
        set.rows.reserve(capacity);
        set
    }

    /// Append a row from raw values, sharing this set's column names.
    pub fn push_values(&mut self, values: Vec<Value>) {
        let row = Row::with_cache(
            self.column_names.clone(),
            values,
            self.column_index_cache.clone(),
        );
        self.rows.push_back(row);
    }

    /// Append an already-built row.
    pub fn push(&mut self, row: Row) {
        self.rows.push_back(row);
    }

    /// Next unconsumed row, or None once the set is exhausted.
    pub fn fetch_one(&mut self) -> Option<Row> {
        self.rows.pop_front()
    }

    /// Up to `size` unconsumed rows; fewer at the tail, empty once exhausted.
    pub fn fetch_many(&mut self, size: usize) -> Vec<Row> {
        let take = size.min(self.rows.len());
        self.rows.drain(..take).collect()
    }

    /// All remaining unconsumed rows.
    pub fn fetch_all(&mut self) -> Vec<Row> {
        self.rows.drain(..).collect()
    }

    /// Per-column metadata for this set.
    #[must_use]
    pub fn description(&self) -> &[ColumnDesc] {
        &self.description
    }

    /// Rows not yet delivered by a fetch.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.rows.is_empty()
    }
}
