use super::ErrorType;
use serde::Serialize;

/// Result of validating one document
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl SpecValidationResult {
    pub(crate) fn from_findings(
        errors: Vec<ValidationError>,
        warnings: Vec<ValidationWarning>,
    ) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// Validation error with the location it was found at
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub error_type: ErrorType,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl ValidationError {
    pub fn new(error_type: ErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
            path: None,
            method: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_operation(mut self, path: impl Into<String>, method: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self.method = Some(method.into());
        self
    }

    /// Format error message with location context
    pub fn format(&self) -> String {
        format_with_location(&self.path, &self.method, &self.message)
    }
}

/// Validation warning with the location it was found at
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationWarning {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl ValidationWarning {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            method: None,
        }
    }

    /// Format warning message with location context
    pub fn format(&self) -> String {
        format_with_location(&self.path, &self.method, &self.message)
    }
}

fn format_with_location(path: &Option<String>, method: &Option<String>, message: &str) -> String {
    match (path, method) {
        (Some(p), Some(m)) => format!("[{} {}] {}", m.to_uppercase(), p, message),
        (Some(p), None) => format!("[{}] {}", p, message),
        _ => message.to_string(),
    }
}
