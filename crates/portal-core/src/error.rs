use thiserror::Error;

use crate::client::ClientError;

/// Validation and contract errors exposed by `portal-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unknown directory entry type {value}, expected -1, 0 or 1")]
    InvalidDirectoryEntryType { value: i32 },
    #[error("unknown account role {value}")]
    InvalidAccountRole { value: u8 },

    #[error("invalid fixed-point value '{value}'")]
    InvalidFixedPoint { value: String },
    #[error("fixed-point value '{value}' is out of range")]
    FixedPointOverflow { value: String },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },

    #[error("currency must be a 3-letter uppercase ISO code: '{value}'")]
    InvalidCurrency { value: String },

    #[error("unknown compliance value type {which}")]
    InvalidComplianceValueType { which: i64 },
    #[error("compliance value of type {which} has a malformed payload: {reason}")]
    MalformedComplianceValue { which: &'static str, reason: String },
    #[error("unknown compliance rule state {value}")]
    InvalidComplianceRuleState { value: i32 },

    #[error("unknown risk state {value}")]
    InvalidRiskState { value: i32 },
    #[error("unknown account modification type {value}")]
    InvalidModificationType { value: i32 },

    #[error("base url must start with http:// or https://: '{value}'")]
    InvalidBaseUrl { value: String },
    #[error("timeout must be greater than zero")]
    ZeroTimeout,
}

/// Raised by model accessors and model operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("Model not loaded.")]
    NotLoaded,

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
