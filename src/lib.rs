//! Driver-neutral behavioral contract for relational-database client access.
//!
//! Two capability traits, [`Connection`] and [`Cursor`], fix the operations,
//! lifecycle rules, and error-signaling expectations that any concrete
//! database driver must honor, so application code targets the contract and
//! swaps drivers without changing call sites. The crate also ships the
//! shared value/row/metadata model the traits speak in, a scripted in-memory
//! reference driver ([`scripted`]), and a structural conformance kit
//! ([`conformance`]) for driver authors.
//!
//! What the contract deliberately leaves to drivers: SQL dialect and
//! placeholder notation, result `type_code` vocabulary, backend error
//! shapes, pooling, and any threading or cancellation guarantees. Every
//! operation here is a blocking call.
//!
//! ```rust
//! use dbapi_contract::prelude::*;
//!
//! fn load_names<C: Connection>(conn: &mut C) -> Result<Vec<String>, DbApiError> {
//!     let mut cur = conn.cursor()?;
//!     cur.execute("SELECT id, name FROM users", &Params::none())?;
//!     let names = cur
//!         .fetchall()?
//!         .iter()
//!         .filter_map(|row| row.get("name").and_then(Value::as_text).map(String::from))
//!         .collect();
//!     cur.close()?;
//!     Ok(names)
//! }
//!
//! let script = Script::new().on(
//!     "SELECT id, name FROM users",
//!     Outcome::rows(
//!         vec![ColumnDesc::new("id", "INTEGER"), ColumnDesc::new("name", "TEXT")],
//!         vec![vec![Value::Int(1), Value::Text("a".into())]],
//!     ),
//! );
//! let mut conn = ScriptedConnection::new(script);
//! assert_eq!(load_names(&mut conn).unwrap(), vec!["a"]);
//! ```

mod column;
mod connection;
mod cursor;
mod error;
mod types;

pub mod conformance;
pub mod results;
pub mod scripted;

pub mod prelude;

pub use column::ColumnDesc;
pub use connection::Connection;
pub use cursor::Cursor;
pub use error::DbApiError;
pub use results::{ResultSet, Row};
pub use types::{ParamSet, Params, Value};
