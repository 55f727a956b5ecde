use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Values that can appear in a result row or be bound as query parameters.
///
/// Reuse the same enum across drivers so contract-generic code does not need
/// to branch on backend types:
/// ```rust
/// use dbapi_contract::prelude::*;
///
/// let params = ParamSet::positional([
///     Value::Int(1),
///     Value::Text("alice".into()),
///     Value::Bool(true),
/// ]);
/// # let _ = params;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Boolean value
    Bool(bool),
    /// Timestamp value
    Timestamp(NaiveDateTime),
    /// NULL value
    Null,
    /// JSON value
    Json(JsonValue),
    /// Binary data
    Blob(Vec<u8>),
}

impl Value {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let Value::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let Value::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    /// Boolean view; integer 0/1 coerces, since several engines surface
    /// booleans that way.
    #[must_use]
    pub fn as_bool(&self) -> Option<&bool> {
        if let Value::Bool(value) = self {
            return Some(value);
        } else if let Some(i) = self.as_int() {
            if *i == 1 {
                return Some(&true);
            } else if *i == 0 {
                return Some(&false);
            }
        }
        None
    }

    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        if let Value::Timestamp(value) = self {
            return Some(*value);
        } else if let Some(s) = self.as_text() {
            // Try "YYYY-MM-DD HH:MM:SS"
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
                return Some(dt);
            }
            // Try "YYYY-MM-DD HH:MM:SS.SSS"
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S.%3f") {
                return Some(dt);
            }
        }
        None
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let Value::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let Value::Blob(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

impl From<JsonValue> for Value {
    fn from(v: JsonValue) -> Self {
        Value::Json(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Timestamp(v)
    }
}

/// One set of bind values for a single execution of an operation.
///
/// The placeholder notation the values bind to (`?1`, `$1`, `:name`, ...) is
/// driver-defined; the contract only fixes the two shapes a set can take.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum ParamSet {
    /// No bind values.
    #[default]
    Empty,
    /// Values bound by position.
    Positional(Vec<Value>),
    /// Values bound by placeholder name.
    Named(HashMap<String, Value>),
}

impl ParamSet {
    /// Build a positional set from anything yielding values.
    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Positional(values.into_iter().map(Into::into).collect())
    }

    /// Build a named set from `(name, value)` pairs.
    pub fn named<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self::Named(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Number of bind values in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Positional(v) => v.len(),
            Self::Named(m) => m.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<Value>> for ParamSet {
    fn from(values: Vec<Value>) -> Self {
        ParamSet::Positional(values)
    }
}

impl From<HashMap<String, Value>> for ParamSet {
    fn from(map: HashMap<String, Value>) -> Self {
        ParamSet::Named(map)
    }
}

/// What [`Cursor::execute`](crate::Cursor::execute) accepts as its parameter
/// argument.
///
/// `Batch` carries a list of parameter sets through `execute` for backward
/// compatibility with older callers; it is deprecated in favor of
/// [`Cursor::executemany`](crate::Cursor::executemany) and drivers treat it
/// exactly as an `executemany` call.
#[derive(Debug, Clone, PartialEq)]
pub enum Params {
    /// A single bind set, possibly empty.
    Set(ParamSet),
    /// Deprecated multi-set form; use `executemany` instead.
    Batch(Vec<ParamSet>),
}

impl Params {
    /// An empty single set.
    #[must_use]
    pub fn none() -> Self {
        Params::Set(ParamSet::Empty)
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::none()
    }
}

impl From<ParamSet> for Params {
    fn from(set: ParamSet) -> Self {
        Params::Set(set)
    }
}

impl From<Vec<Value>> for Params {
    fn from(values: Vec<Value>) -> Self {
        Params::Set(ParamSet::Positional(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_coercion_from_int() {
        assert_eq!(Value::Int(1).as_bool(), Some(&true));
        assert_eq!(Value::Int(0).as_bool(), Some(&false));
        assert_eq!(Value::Int(2).as_bool(), None);
        assert_eq!(Value::Text("t".into()).as_bool(), None);
    }

    #[test]
    fn timestamp_parses_both_text_formats() {
        let plain = Value::Text("2024-01-01 08:00:01".into());
        let fractional = Value::Text("2024-01-01 08:00:01.250".into());
        assert!(plain.as_timestamp().is_some());
        assert!(fractional.as_timestamp().is_some());
        assert!(Value::Text("January 1st".into()).as_timestamp().is_none());
    }

    #[test]
    fn param_set_len() {
        assert_eq!(ParamSet::Empty.len(), 0);
        assert!(ParamSet::Empty.is_empty());
        assert_eq!(ParamSet::positional([1i64, 2, 3]).len(), 3);
        assert_eq!(ParamSet::named([("id", 1i64)]).len(), 1);
    }
}
