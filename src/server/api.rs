use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use super::state::{AppState, StoredSpec};
use crate::error::Curl2OpenApiError;
use crate::models::Capture;
use crate::store::record_capture;
use crate::synthesis::{
    DocumentFormat, SynthesisOptions, SynthesisWarning, render_document, synthesize,
};
use crate::validation::{SpecValidationResult, validate_spec};

type ApiResult<T> = Result<T, (StatusCode, String)>;

fn error_response(e: Curl2OpenApiError) -> (StatusCode, String) {
    let status = match e {
        Curl2OpenApiError::ParseError(_)
        | Curl2OpenApiError::MalformedUrl(_)
        | Curl2OpenApiError::SchemaInference(_)
        | Curl2OpenApiError::EmptyProject
        | Curl2OpenApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
        Curl2OpenApiError::CaptureNotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, e.to_string())
}

/// Request body for /api/captures/convert
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertRequest {
    pub curl: String,
    #[serde(default)]
    pub project_id: Option<String>,
    /// Response body recorded alongside the command
    #[serde(default)]
    pub response: Option<String>,
}

/// POST /api/captures/convert - Parse and store a cURL command
pub async fn convert_capture(
    State(state): State<AppState>,
    Json(request): Json<ConvertRequest>,
) -> ApiResult<(StatusCode, Json<Capture>)> {
    let capture = record_capture(
        state.store.as_ref(),
        &request.curl,
        request.project_id.as_deref(),
        request.response,
    )
    .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(capture)))
}

/// GET /api/captures/project/{project_id}
pub async fn list_project_captures(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Json<Vec<Capture>> {
    Json(state.store.find_many_by_project(&project_id))
}

/// GET /api/captures/{id}
pub async fn get_capture(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Capture>> {
    state
        .store
        .find_by_id(&id)
        .map(Json)
        .map_err(error_response)
}

/// DELETE /api/captures/{id}
pub async fn delete_capture(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.store.delete(&id).map_err(error_response)?;
    tracing::info!(capture_id = %id, "Deleted capture");
    Ok(StatusCode::NO_CONTENT)
}

/// Request body for /api/specs/generate
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSpecRequest {
    pub project_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub operation_security: bool,
}

impl GenerateSpecRequest {
    fn options(&self) -> SynthesisOptions {
        let defaults = SynthesisOptions::default();
        SynthesisOptions {
            title: self.title.clone().unwrap_or(defaults.title),
            description: self.description.clone().or(defaults.description),
            version: self.version.clone().unwrap_or(defaults.version),
            operation_security: self.operation_security,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSpecResponse {
    #[serde(flatten)]
    pub spec: StoredSpec,
    pub operation_count: usize,
    pub warnings: Vec<SynthesisWarning>,
}

/// POST /api/specs/generate - Synthesize a document from a project's captures
pub async fn generate_spec(
    State(state): State<AppState>,
    Json(request): Json<GenerateSpecRequest>,
) -> ApiResult<Json<GenerateSpecResponse>> {
    let captures = state.store.find_many_by_project(&request.project_id);
    let synthesis = synthesize(&captures, &request.options()).map_err(error_response)?;
    let content =
        render_document(&synthesis.document, DocumentFormat::Yaml).map_err(error_response)?;

    let spec = state.store_spec(&request.project_id, &synthesis.document, content);
    tracing::info!(
        project_id = %request.project_id,
        file_name = %spec.file_name,
        "Generated spec"
    );

    Ok(Json(GenerateSpecResponse {
        spec,
        operation_count: synthesis.document.operation_count(),
        warnings: synthesis.warnings,
    }))
}

/// GET /api/specs/project/{project_id} - Active spec of a project
pub async fn get_project_spec(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> ApiResult<Json<StoredSpec>> {
    state
        .specs
        .get(&project_id)
        .map(|entry| Json(entry.value().clone()))
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                format!("No spec generated for project '{}'", project_id),
            )
        })
}

/// Request body for /api/specs/validate
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateSpecRequest {
    pub spec: String,
}

/// POST /api/specs/validate
pub async fn validate_spec_content(
    Json(request): Json<ValidateSpecRequest>,
) -> Json<SpecValidationResult> {
    Json(validate_spec(&request.spec))
}
