use crate::error::{Curl2OpenApiError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One entry of a capture file: a raw command and, optionally, the response
/// body that was recorded for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureSource {
    pub curl: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

impl CaptureSource {
    pub fn new(curl: impl Into<String>) -> Self {
        Self {
            curl: curl.into(),
            response: None,
        }
    }
}

const STRUCTURED_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];
const TEXT_EXTENSIONS: &[&str] = &["curl", "txt", "sh"];

/// Load capture sources from a file or from every supported file in a
/// directory, in file-name order
pub fn load_capture_sources<P: AsRef<Path>>(path: P) -> Result<Vec<CaptureSource>> {
    let path = path.as_ref();

    if path.is_dir() {
        let mut files: Vec<PathBuf> = fs::read_dir(path)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && is_supported(p))
            .collect();
        files.sort();

        let mut sources = Vec::new();
        for file in files {
            sources.extend(load_capture_file(&file)?);
        }
        return Ok(sources);
    }

    if !path.exists() {
        return Err(Curl2OpenApiError::InvalidPath(format!(
            "Capture file not found: {}",
            path.display()
        )));
    }

    load_capture_file(path)
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default()
}

fn is_supported(path: &Path) -> bool {
    let ext = extension(path);
    STRUCTURED_EXTENSIONS.contains(&ext.as_str()) || TEXT_EXTENSIONS.contains(&ext.as_str())
}

fn load_capture_file(path: &Path) -> Result<Vec<CaptureSource>> {
    let content = fs::read_to_string(path).map_err(|e| {
        Curl2OpenApiError::InvalidPath(format!("Failed to read file {}: {}", path.display(), e))
    })?;

    if STRUCTURED_EXTENSIONS.contains(&extension(path).as_str()) {
        let sources: Vec<CaptureSource> = serde_yaml::from_str(&content)?;
        tracing::debug!("Loaded {} capture(s) from {}", sources.len(), path.display());
        Ok(sources)
    } else {
        Ok(parse_capture_lines(&content))
    }
}

/// One command per line; blank lines and `#` comments are skipped
pub fn parse_capture_lines(content: &str) -> Vec<CaptureSource> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(CaptureSource::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_parse_capture_lines() {
        let sources = parse_capture_lines(
            "# users\ncurl https://a.test/users/1\n\n   curl https://a.test/users/2  \n",
        );
        assert_eq!(
            sources,
            vec![
                CaptureSource::new("curl https://a.test/users/1"),
                CaptureSource::new("curl https://a.test/users/2"),
            ]
        );
    }

    #[test]
    fn test_load_yaml_with_responses() {
        let yaml = r#"
- curl: curl https://a.test/me
  response: '{"id": 1}'
- curl: curl -X DELETE https://a.test/me
"#;
        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let sources = load_capture_sources(file.path()).unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].response.as_deref(), Some(r#"{"id": 1}"#));
        assert!(sources[1].response.is_none());
    }

    #[test]
    fn test_load_directory_in_name_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.curl"), "curl https://a.test/b\n").unwrap();
        fs::write(dir.path().join("a.txt"), "curl https://a.test/a\n").unwrap();
        fs::write(dir.path().join("ignored.md"), "curl https://a.test/x\n").unwrap();

        let sources = load_capture_sources(dir.path()).unwrap();
        let curls: Vec<&str> = sources.iter().map(|s| s.curl.as_str()).collect();
        assert_eq!(curls, vec!["curl https://a.test/a", "curl https://a.test/b"]);
    }

    #[test]
    fn test_missing_file() {
        assert!(load_capture_sources("/nonexistent/captures.txt").is_err());
    }
}
