use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Rejection of a caller-supplied field. Always raised before the database is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum FieldError {
    #[error("{field}: {reason}")]
    InvalidArgument { field: String, reason: String },
    #[error("{field}: {value} is out of range")]
    OutOfRange { field: String, value: String },
}

impl FieldError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        FieldError::InvalidArgument {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn out_of_range(field: &str, value: impl Into<String>) -> Self {
        FieldError::OutOfRange {
            field: field.to_string(),
            value: value.into(),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            FieldError::InvalidArgument { field, .. } | FieldError::OutOfRange { field, .. } => {
                field
            }
        }
    }
}
