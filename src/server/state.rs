use crate::models::OpenApiDocument;
use crate::store::{CaptureStore, InMemoryCaptureStore, now_millis};
use dashmap::DashMap;
use serde::Serialize;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CaptureStore>,

    /// Latest generated document per project id
    pub specs: Arc<DashMap<String, StoredSpec>>,
}

impl AppState {
    pub fn new(store: Arc<dyn CaptureStore>) -> Self {
        Self {
            store,
            specs: Arc::new(DashMap::new()),
        }
    }

    /// Make `document` the active spec of `project_id`, replacing any earlier one
    pub fn store_spec(
        &self,
        project_id: &str,
        document: &OpenApiDocument,
        content: String,
    ) -> StoredSpec {
        let spec = StoredSpec {
            project_id: project_id.to_string(),
            version: document.info.version.clone(),
            file_name: format!("openapi-v{}.yaml", document.info.version),
            content,
            created_at: now_millis(),
        };

        if let Some(previous) = self.specs.insert(project_id.to_string(), spec.clone()) {
            tracing::debug!(
                project_id,
                previous = %previous.file_name,
                "Replaced active spec"
            );
        }
        spec
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(InMemoryCaptureStore::new()))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSpec {
    pub project_id: String,
    pub version: String,
    pub file_name: String,
    /// Rendered YAML
    pub content: String,
    pub created_at: u64,
}
