//! Capture persistence boundary
//!
//! The synthesizer only ever reads captures through [`CaptureStore`]. The
//! in-memory implementation backs the HTTP server and the CLI; anything
//! durable plugs in behind the same trait.

use crate::error::{Curl2OpenApiError, Result};
use crate::models::{Capture, NewCapture};
use crate::parser::parse_curl;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

pub trait CaptureStore: Send + Sync {
    /// Captures of one project, oldest first
    fn find_many_by_project(&self, project_id: &str) -> Vec<Capture>;

    fn find_by_id(&self, id: &str) -> Result<Capture>;

    /// Persist a capture, assigning its id and creation time
    fn create(&self, capture: NewCapture) -> Capture;

    fn delete(&self, id: &str) -> Result<()>;
}

/// Parse a raw command and persist it. Nothing is stored when parsing fails.
pub fn record_capture(
    store: &dyn CaptureStore,
    raw_curl: &str,
    project_id: Option<&str>,
    response: Option<String>,
) -> Result<Capture> {
    let request = parse_curl(raw_curl)?;

    let capture = store.create(NewCapture {
        raw_curl: raw_curl.to_string(),
        request,
        response,
        project_id: project_id.map(str::to_string),
    });

    tracing::info!(
        capture_id = %capture.id,
        method = %capture.request.method,
        url = %capture.request.url,
        "Recorded capture"
    );
    Ok(capture)
}

/// Process-local store keyed by capture id
#[derive(Debug, Default)]
pub struct InMemoryCaptureStore {
    captures: DashMap<String, StoredCapture>,
    next_sequence: AtomicU64,
}

#[derive(Debug, Clone)]
struct StoredCapture {
    /// Insertion order; timestamps alone can tie
    sequence: u64,
    capture: Capture,
}

impl InMemoryCaptureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.captures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.captures.is_empty()
    }
}

impl CaptureStore for InMemoryCaptureStore {
    fn find_many_by_project(&self, project_id: &str) -> Vec<Capture> {
        let mut stored: Vec<StoredCapture> = self
            .captures
            .iter()
            .filter(|entry| entry.value().capture.project_id.as_deref() == Some(project_id))
            .map(|entry| entry.value().clone())
            .collect();
        stored.sort_by_key(|s| s.sequence);
        stored.into_iter().map(|s| s.capture).collect()
    }

    fn find_by_id(&self, id: &str) -> Result<Capture> {
        self.captures
            .get(id)
            .map(|entry| entry.value().capture.clone())
            .ok_or_else(|| Curl2OpenApiError::CaptureNotFound(id.to_string()))
    }

    fn create(&self, capture: NewCapture) -> Capture {
        let sequence = self.next_sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let capture = capture.into_capture(format!("cap_{:06}", sequence), now_millis());

        self.captures.insert(
            capture.id.clone(),
            StoredCapture {
                sequence,
                capture: capture.clone(),
            },
        );
        capture
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.captures
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Curl2OpenApiError::CaptureNotFound(id.to_string()))
    }
}

pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
