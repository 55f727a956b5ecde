use thiserror::Error;

/// Error type shared by every operation in the contract.
///
/// Each variant is one of the error *kinds* the contract requires callers to
/// be able to branch on. Concrete backend failures stay in their native types
/// and travel inside [`DbApiError::Backend`], so downstream `match`/`downcast`
/// code keeps working.
#[derive(Debug, Error)]
pub enum DbApiError {
    /// Operation invoked on a connection or cursor after `close()`.
    #[error("operation on closed {0}")]
    Closed(String),

    /// Fetch-family operation invoked before any `execute`, or after an
    /// `execute` that produced no result set.
    #[error("no result set available: {0}")]
    NoResultSet(String),

    /// Optional operation invoked against a driver that does not implement
    /// it. Distinct from a plain failure so callers can feature-detect.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// Invalid caller-supplied argument (zero arraysize, wrong procedure
    /// argument count, batch execution of a row-producing operation, ...).
    #[error("parameter error: {0}")]
    Parameter(String),

    /// Failure originating from the database engine, propagated as-is.
    #[error("backend error: {0}")]
    Backend(Box<dyn std::error::Error + Send + Sync>),
}

impl DbApiError {
    /// Misuse-after-close error for the named handle (`"connection"`,
    /// `"cursor"`).
    pub fn closed(handle: impl Into<String>) -> Self {
        Self::Closed(handle.into())
    }

    /// Precondition-violation error with context.
    pub fn no_result_set(context: impl Into<String>) -> Self {
        Self::NoResultSet(context.into())
    }

    /// Unsupported-operation error naming the missing capability.
    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::Unsupported(operation.into())
    }

    /// Backend error from anything convertible to a boxed error (including
    /// plain strings).
    pub fn backend(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Backend(err.into())
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed(_))
    }

    #[must_use]
    pub fn is_no_result_set(&self) -> bool {
        matches!(self, Self::NoResultSet(_))
    }

    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }

    #[must_use]
    pub fn is_parameter(&self) -> bool {
        matches!(self, Self::Parameter(_))
    }

    #[must_use]
    pub fn is_backend(&self) -> bool {
        matches!(self, Self::Backend(_))
    }
}
