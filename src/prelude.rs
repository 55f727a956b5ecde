//! Convenient imports for common functionality.
//!
//! Re-exports the types most callers and driver implementations need.

pub use crate::column::ColumnDesc;
pub use crate::connection::Connection;
pub use crate::cursor::Cursor;
pub use crate::error::DbApiError;
pub use crate::results::{ResultSet, Row};
pub use crate::scripted::{
    Outcome, ProcSpec, ResultSpec, Script, ScriptedConnection, ScriptedCursor, TxEvent,
};
pub use crate::types::{ParamSet, Params, Value};
