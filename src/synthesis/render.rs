use crate::error::Result;
use crate::models::OpenApiDocument;
use serde::{Deserialize, Serialize};

/// Text format of a serialized document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    #[default]
    Yaml,
    Json,
}

pub fn render_document(document: &OpenApiDocument, format: DocumentFormat) -> Result<String> {
    Ok(match format {
        DocumentFormat::Yaml => serde_yaml::to_string(document)?,
        DocumentFormat::Json => serde_json::to_string_pretty(document)?,
    })
}

/// Read a document back from YAML or JSON text
pub fn parse_document(content: &str) -> Result<OpenApiDocument> {
    Ok(serde_yaml::from_str(content)?)
}
