pub mod captures;

pub use captures::{CaptureSource, load_capture_sources, parse_capture_lines};

use crate::error::Result;
use crate::store::{CaptureStore, record_capture};
use std::path::Path;

/// Outcome of importing a capture file into a store
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub imported: usize,
    /// `(1-based entry number, error message)` for every rejected command
    pub rejected: Vec<(usize, String)>,
}

/// Parse every command found at `path` and record it under `project_id`.
///
/// Commands that fail to parse are reported and skipped; they never reach
/// the store.
pub fn import_captures<P: AsRef<Path>>(
    path: P,
    store: &dyn CaptureStore,
    project_id: &str,
) -> Result<ImportReport> {
    let sources = load_capture_sources(path)?;
    let mut report = ImportReport::default();

    for (idx, source) in sources.into_iter().enumerate() {
        match record_capture(store, &source.curl, Some(project_id), source.response) {
            Ok(_) => report.imported += 1,
            Err(e) => {
                tracing::warn!("Rejected capture #{}: {}", idx + 1, e);
                report.rejected.push((idx + 1, e.to_string()));
            }
        }
    }

    Ok(report)
}
