//! Error types for binding, building, and projection
//!
//! Every variant is detected locally, before any network call is made.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A required parameter was not supplied and has no default
    #[error("missing required parameter '{name}' for {operation}")]
    MissingRequiredParameter { operation: String, name: String },

    /// An enum parameter received a value outside its allowed set
    #[error("invalid value '{value}' for parameter '{name}'; allowed values: {allowed}")]
    InvalidEnumValue {
        name: String,
        value: String,
        allowed: String,
    },

    /// A value could not be parsed into the parameter's declared type
    #[error("parameter '{name}' expects {expected}, got {found}")]
    InvalidParameterType {
        name: String,
        expected: &'static str,
        found: String,
    },

    #[error("{operation} has no parameter named '{name}'")]
    UnknownParameter { operation: String, name: String },

    /// The same parameter was supplied more than once (possibly via an alias)
    #[error("parameter '{name}' was supplied more than once")]
    DuplicateParameter { name: String },

    /// The selector names neither an output field nor a bound parameter
    #[error("invalid selector '{selector}' for {operation}; available: {available}")]
    InvalidSelector {
        selector: String,
        operation: String,
        available: String,
    },

    #[error("unknown operation '{name}'")]
    UnknownOperation { name: String },

    #[error("operation '{name}' is ambiguous; use one of: {candidates}")]
    AmbiguousOperation { name: String, candidates: String },

    /// A leaf and a group (or two leaves) claim the same envelope path
    #[error("envelope path '{path}' is claimed twice in {operation}")]
    PathConflict { operation: String, path: String },

    #[error("invalid descriptor for {operation}: {reason}")]
    InvalidDescriptor { operation: String, reason: String },
}

impl CoreError {
    /// Stable error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingRequiredParameter { .. } => "MissingRequiredParameter",
            Self::InvalidEnumValue { .. } => "InvalidEnumValue",
            Self::InvalidParameterType { .. } => "InvalidParameterType",
            Self::UnknownParameter { .. } => "UnknownParameter",
            Self::DuplicateParameter { .. } => "DuplicateParameter",
            Self::InvalidSelector { .. } => "InvalidSelector",
            Self::UnknownOperation { .. } => "UnknownOperation",
            Self::AmbiguousOperation { .. } => "AmbiguousOperation",
            Self::PathConflict { .. } => "PathConflict",
            Self::InvalidDescriptor { .. } => "InvalidDescriptor",
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = CoreError::MissingRequiredParameter {
            operation: "keyspaces:ListTables".into(),
            name: "KeyspaceName".into(),
        };
        assert_eq!(err.error_code(), "MissingRequiredParameter");
        assert!(err.to_string().contains("KeyspaceName"));

        let err = CoreError::InvalidEnumValue {
            name: "ThroughputMode".into(),
            value: "FAST".into(),
            allowed: "PAY_PER_REQUEST, PROVISIONED".into(),
        };
        assert_eq!(err.error_code(), "InvalidEnumValue");
        assert!(err.to_string().contains("PAY_PER_REQUEST, PROVISIONED"));
    }
}
