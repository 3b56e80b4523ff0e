use super::SynthesisWarning;
use crate::inference::endpoint::{EndpointKey, normalize_endpoint_url, origin};
use crate::models::Capture;
use crate::models::openapi::Server;
use indexmap::IndexMap;
use url::Url;

/// Captures that normalize to the same method and path template
#[derive(Debug, Clone)]
pub struct EndpointGroup<'a> {
    pub key: EndpointKey,
    pub members: Vec<GroupMember<'a>>,
}

#[derive(Debug, Clone)]
pub struct GroupMember<'a> {
    pub capture: &'a Capture,
    pub url: Url,
}

impl EndpointGroup<'_> {
    pub fn capture_count(&self) -> usize {
        self.members.len()
    }

    pub fn captures(&self) -> impl Iterator<Item = &Capture> {
        self.members.iter().map(|m| m.capture)
    }
}

/// Result of one pass over a project's captures
#[derive(Debug, Clone, Default)]
pub struct Aggregation<'a> {
    /// Distinct origins in first-seen order
    pub servers: Vec<Server>,
    /// Groups in order of first occurrence
    pub groups: Vec<EndpointGroup<'a>>,
    /// One entry per capture left out because of its URL
    pub warnings: Vec<SynthesisWarning>,
}

/// Collect servers and endpoint groups, skipping captures whose URL is unusable
pub fn aggregate_captures(captures: &[Capture]) -> Aggregation<'_> {
    let mut servers: Vec<Server> = Vec::new();
    let mut groups: IndexMap<EndpointKey, Vec<GroupMember<'_>>> = IndexMap::new();
    let mut warnings = Vec::new();

    for capture in captures {
        let url = match Url::parse(&capture.request.url) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(
                    capture_id = %capture.id,
                    "Invalid URL in capture: {} ({})",
                    capture.request.url,
                    e
                );
                warnings.push(
                    SynthesisWarning::new(format!(
                        "Invalid URL in capture: {} ({})",
                        capture.request.url, e
                    ))
                    .with_capture(&capture.id),
                );
                continue;
            }
        };

        let Some(server_url) = origin(&url) else {
            tracing::warn!(capture_id = %capture.id, "URL has no host: {}", capture.request.url);
            warnings.push(
                SynthesisWarning::new(format!("URL has no host: {}", capture.request.url))
                    .with_capture(&capture.id),
            );
            continue;
        };

        if !servers.iter().any(|s| s.url == server_url) {
            servers.push(Server {
                url: server_url,
                description: Some("API Server".to_string()),
            });
        }

        let key = normalize_endpoint_url(&url, &capture.request.method);
        tracing::debug!(capture_id = %capture.id, endpoint = %key, "Grouped capture");
        groups
            .entry(key)
            .or_default()
            .push(GroupMember { capture, url });
    }

    Aggregation {
        servers,
        groups: groups
            .into_iter()
            .map(|(key, members)| EndpointGroup { key, members })
            .collect(),
        warnings,
    }
}

/// Captures keyed by their rendered endpoint, e.g. `"GET /users/{id}"`.
/// Captures with an unusable URL are left out.
pub fn group_endpoints(captures: &[Capture]) -> IndexMap<String, Vec<&Capture>> {
    aggregate_captures(captures)
        .groups
        .into_iter()
        .map(|group| {
            let key = group.key.to_string();
            (key, group.members.into_iter().map(|m| m.capture).collect())
        })
        .collect()
}
