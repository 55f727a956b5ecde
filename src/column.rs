use serde::{Deserialize, Serialize};

/// Metadata for one column of a result set.
///
/// `name` and `type_code` are always populated; the remaining five fields are
/// optional and left unset when the driver cannot provide a meaningful value.
/// The `type_code` vocabulary is driver-defined (the contract imposes no
/// type-marshaling rules), it only has to be stable per driver so callers can
/// compare codes across queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDesc {
    /// Column name as produced by the backend.
    pub name: String,
    /// Driver-defined type code.
    pub type_code: String,
    pub display_size: Option<u32>,
    pub internal_size: Option<u32>,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
    pub null_ok: Option<bool>,
}

impl ColumnDesc {
    /// Describe a column by the two mandatory fields, leaving the optional
    /// five unset.
    pub fn new(name: impl Into<String>, type_code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_code: type_code.into(),
            display_size: None,
            internal_size: None,
            precision: None,
            scale: None,
            null_ok: None,
        }
    }

    #[must_use]
    pub fn with_null_ok(mut self, null_ok: bool) -> Self {
        self.null_ok = Some(null_ok);
        self
    }

    #[must_use]
    pub fn with_precision(mut self, precision: u32, scale: u32) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }
}
