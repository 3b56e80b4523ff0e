//! OpenAPI synthesis from captured requests
//!
//! A run goes: collect origins and group captures ([`aggregate_captures`]),
//! build one operation per group, then fill in project-wide components.
//! Captures with unusable URLs are left out with a warning; only an empty
//! input aborts the run.

pub mod aggregate;
mod operation;
pub mod render;

pub use aggregate::{Aggregation, EndpointGroup, aggregate_captures, group_endpoints};
pub use render::{DocumentFormat, parse_document, render_document};

use crate::error::{Curl2OpenApiError, Result};
use crate::inference::{SchemaRole, infer_schema};
use crate::models::Capture;
use crate::models::openapi::{
    Components, Info, OPENAPI_VERSION, OpenApiDocument, Operation, SecurityScheme,
};
use indexmap::IndexMap;
use operation::OperationBuilder;
use serde::Serialize;

/// Document-level settings for a synthesis run
#[derive(Debug, Clone)]
pub struct SynthesisOptions {
    pub title: String,
    pub description: Option<String>,
    pub version: String,
    /// Attach a `bearerAuth` requirement to operations whose captures carried
    /// an Authorization header
    pub operation_security: bool,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            title: "Generated API".to_string(),
            description: Some("Generated from cURL commands".to_string()),
            version: "1.0.0".to_string(),
            operation_security: false,
        }
    }
}

/// Non-fatal problem met during synthesis
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisWarning {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capture_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    pub message: String,
}

impl SynthesisWarning {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            capture_id: None,
            endpoint: None,
            message: message.into(),
        }
    }

    pub fn with_capture(mut self, capture_id: impl Into<String>) -> Self {
        self.capture_id = Some(capture_id.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Format warning message with its context
    pub fn format(&self) -> String {
        let mut parts = Vec::new();

        match (&self.capture_id, &self.endpoint) {
            (Some(c), Some(e)) => parts.push(format!("[capture: {}, endpoint: {}]", c, e)),
            (Some(c), None) => parts.push(format!("[capture: {}]", c)),
            (None, Some(e)) => parts.push(format!("[endpoint: {}]", e)),
            (None, None) => {}
        }

        parts.push(self.message.clone());

        parts.join(" ")
    }
}

/// Synthesized document plus the warnings collected on the way
#[derive(Debug, Clone)]
pub struct Synthesis {
    pub document: OpenApiDocument,
    pub warnings: Vec<SynthesisWarning>,
}

/// Build an OpenAPI document from a project's captures, in capture order
pub fn synthesize(captures: &[Capture], options: &SynthesisOptions) -> Result<Synthesis> {
    if captures.is_empty() {
        return Err(Curl2OpenApiError::EmptyProject);
    }

    let Aggregation {
        servers,
        groups,
        mut warnings,
    } = aggregate_captures(captures);

    let mut paths: IndexMap<String, IndexMap<String, Operation>> = IndexMap::new();
    {
        let mut builder = OperationBuilder::new(options.operation_security, &mut warnings);
        for group in &groups {
            let operation = builder.build(group);
            paths
                .entry(group.key.path.clone())
                .or_default()
                .insert(group.key.method.clone(), operation);
        }
    }

    let mut schemas = IndexMap::new();
    let bodies: Vec<&str> = captures
        .iter()
        .filter_map(|c| c.request.body.as_deref())
        .filter(|body| !body.trim().is_empty())
        .collect();
    if !bodies.is_empty() {
        match infer_schema(&bodies, SchemaRole::Request) {
            Ok(schema) => {
                schemas.insert("RequestBody".to_string(), schema);
            }
            Err(e) => {
                tracing::warn!("Failed to infer request schema: {}", e);
                warnings.push(SynthesisWarning::new(format!(
                    "Failed to infer shared request schema: {}",
                    e
                )));
            }
        }
    }

    let mut security_schemes = IndexMap::new();
    if captures.iter().any(|c| c.request.has_authorization()) {
        security_schemes.insert(
            SecurityScheme::BEARER_AUTH.to_string(),
            SecurityScheme::bearer_jwt(),
        );
    }

    let document = OpenApiDocument {
        openapi: OPENAPI_VERSION.to_string(),
        info: Info {
            title: options.title.clone(),
            version: options.version.clone(),
            description: options.description.clone(),
        },
        servers,
        paths,
        components: Components {
            schemas,
            security_schemes,
        },
    };

    tracing::info!(
        captures = captures.len(),
        operations = document.operation_count(),
        warnings = warnings.len(),
        "Synthesized OpenAPI document"
    );

    Ok(Synthesis { document, warnings })
}
