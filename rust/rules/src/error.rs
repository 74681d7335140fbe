use thiserror::Error;

/// Result type for rule configuration and evaluation
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by rule-configuration validation
///
/// Absence of model data is never an error (missing rooms or
/// furnishings surface as statuses in the results); only structurally
/// invalid configurations fail, and they fail before any model work.
#[derive(Error, Debug)]
pub enum Error {
    #[error("rule `{rule}` defines no coefficient for school type {school_type:?}")]
    MissingCoefficient {
        rule: String,
        school_type: crate::config::SchoolType,
    },

    #[error("rule `{rule}` targets an empty label")]
    EmptyLabel { rule: String },

    #[error("rule `{rule}`: {detail}")]
    InvalidQuantity { rule: String, detail: String },

    #[error("duplicate rule id `{id}`")]
    DuplicateRuleId { id: String },

    #[error("invalid rule configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
