//! Error types for matcher construction and formatting.

use thiserror::Error;

use crate::temporal::Representation;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatcherError {
    #[error("Zone required: the {field} of {representation} values cannot be resolved without a zone")]
    ZoneRequired {
        representation: Representation,
        field: &'static str,
    },

    #[error("Empty any-of: at least one member matcher is required")]
    EmptyAnyOf,

    #[error("Multi-valued reference: {0} needs a single expected value")]
    MultiValuedReference(&'static str),

    #[error("Invalid interval: magnitude {0} is negative")]
    NegativeInterval(i64),

    #[error("Unsupported unit: {unit} cannot measure {field}")]
    UnsupportedUnit { unit: String, field: &'static str },

    #[error("Invalid zone: {0}")]
    InvalidZone(String),

    #[error("Invalid locale: {0}")]
    InvalidLocale(String),

    #[error("Not applicable: {operation} has no meaning for a {subject} value")]
    NotApplicable {
        operation: &'static str,
        subject: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, MatcherError>;
