mod document;
mod report;

pub use document::validate_spec;
pub use report::{SpecValidationResult, ValidationError, ValidationWarning};

use serde::Serialize;

/// Type of validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorType {
    // Document checks
    InvalidFormat,
    MissingField,
    DuplicateServer,

    // Path and operation checks
    InvalidPathKey,
    MissingSuccessResponse,
    DuplicateParameter,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorType::InvalidFormat => write!(f, "Invalid format"),
            ErrorType::MissingField => write!(f, "Missing required field"),
            ErrorType::DuplicateServer => write!(f, "Duplicate server"),
            ErrorType::InvalidPathKey => write!(f, "Invalid path key"),
            ErrorType::MissingSuccessResponse => write!(f, "Missing success response"),
            ErrorType::DuplicateParameter => write!(f, "Duplicate parameter"),
        }
    }
}
