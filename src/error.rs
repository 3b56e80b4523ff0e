use thiserror::Error;

#[derive(Error, Debug)]
pub enum Curl2OpenApiError {
    #[error("Failed to parse cURL command: {0}")]
    ParseError(String),

    #[error("Schema inference failed: {0}")]
    SchemaInference(String),

    #[error("Invalid URL in capture: {0}")]
    MalformedUrl(String),

    #[error("No captures found for project")]
    EmptyProject,

    #[error("Capture not found: {0}")]
    CaptureNotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Curl2OpenApiError>;
