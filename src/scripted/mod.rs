//! Scripted in-memory reference driver.
//!
//! The contract excludes SQL parsing, so this driver executes nothing: each
//! operation string maps to a canned [`Outcome`] in a [`Script`]. That is
//! enough to exercise every lifecycle rule, fetch-discipline rule, and
//! error-kind rule of the contract, which is what it is for: driving the
//! conformance checks and testing contract-generic application code.

mod connection;
mod cursor;
mod script;

pub use connection::{ScriptedConnection, TxEvent};
pub use cursor::ScriptedCursor;
pub use script::{Outcome, ProcSpec, ResultSpec, Script};
