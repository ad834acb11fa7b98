use thiserror::Error;

/// A remote record failed validation while being converted into an
/// internal type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Empty field: {0}")]
    EmptyField(&'static str),

    #[error("Negative count in {field}: {value}")]
    NegativeCount { field: &'static str, value: i64 },

    #[error("Invalid timestamp in {field}: {value}")]
    InvalidTimestamp { field: &'static str, value: String },
}
