use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid item id: {0}")]
    InvalidItemId(String),

    #[error("invalid pin spec '{spec}': {reason}")]
    InvalidPinSpec { spec: String, reason: String },
}
