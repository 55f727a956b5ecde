//! Row and result-set building blocks shared by driver implementations.

mod result_set;
mod row;

pub use result_set::ResultSet;
pub use row::Row;
