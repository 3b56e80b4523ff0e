use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Structured form of a single cURL invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRequest {
    /// Upper-case HTTP verb
    pub method: String,

    /// Absolute request URL, exactly as written in the command
    pub url: String,

    /// Request headers in the order they were supplied
    #[serde(default)]
    pub headers: IndexMap<String, String>,

    /// Raw request body from `-d`/`--data`/`--data-raw`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Decoded query string, absent when the URL has none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<IndexMap<String, String>>,
}

impl ParsedRequest {
    /// Look up a header value ignoring the case of its name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn has_authorization(&self) -> bool {
        self.header("authorization").is_some()
    }
}

/// A parsed cURL command together with its source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capture {
    pub id: String,

    /// Original command text, kept verbatim
    pub raw_curl: String,

    #[serde(flatten)]
    pub request: ParsedRequest,

    /// Recorded response body, when one was captured alongside the request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    /// Creation time in milliseconds since the Unix epoch
    pub created_at: u64,
}

/// Everything needed to persist a capture except the store-assigned fields
#[derive(Debug, Clone)]
pub struct NewCapture {
    pub raw_curl: String,
    pub request: ParsedRequest,
    pub response: Option<String>,
    pub project_id: Option<String>,
}

impl NewCapture {
    /// Turn into a detached capture, for callers that do not go through a store
    pub fn into_capture(self, id: impl Into<String>, created_at: u64) -> Capture {
        Capture {
            id: id.into(),
            raw_curl: self.raw_curl,
            request: self.request,
            response: self.response,
            project_id: self.project_id,
            created_at,
        }
    }
}
