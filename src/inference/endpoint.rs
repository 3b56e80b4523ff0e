//! Path templating for captured URLs
//!
//! Two independent passes live here:
//!
//! * the *grouping* pass ([`normalize_endpoint`]) turns numeric segments into
//!   `{id}` and UUID-shaped segments into `{uuid}`. Its output is a stable key
//!   used to bucket captures into one operation each.
//! * the *labeling* pass ([`label_path_params`]) additionally treats long
//!   opaque tokens as identifiers and names each placeholder after the literal
//!   segment in front of it (`/users/42` labels `users`). It is informational
//!   only and never feeds grouping.

use crate::error::{Curl2OpenApiError, Result};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use url::Url;

static NUMERIC_SEGMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());
static UUID_SEGMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-f0-9-]{36}$").unwrap());
static OPAQUE_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]{10,}$").unwrap());

/// Grouping key for captures: lower-case method plus templated path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EndpointKey {
    pub method: String,
    pub path: String,
}

impl fmt::Display for EndpointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method.to_uppercase(), self.path)
    }
}

/// Normalize a URL string and method into a grouping key
pub fn normalize_endpoint(url: &str, method: &str) -> Result<EndpointKey> {
    let parsed =
        Url::parse(url).map_err(|e| Curl2OpenApiError::MalformedUrl(format!("{}: {}", url, e)))?;
    Ok(normalize_endpoint_url(&parsed, method))
}

/// Same as [`normalize_endpoint`] for an already parsed URL
pub fn normalize_endpoint_url(url: &Url, method: &str) -> EndpointKey {
    EndpointKey {
        method: method.to_lowercase(),
        path: grouping_template(url.path()),
    }
}

/// Replace numeric segments with `{id}` and UUID-shaped ones with `{uuid}`.
/// The query string is never part of the input.
pub fn grouping_template(path: &str) -> String {
    let templated = path
        .split('/')
        .map(|segment| {
            if NUMERIC_SEGMENT.is_match(segment) {
                "{id}"
            } else if UUID_SEGMENT.is_match(segment) {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/");

    if templated.starts_with('/') {
        templated
    } else {
        format!("/{}", templated)
    }
}

/// Placeholder names of a path template in order of appearance, without duplicates
pub fn template_parameters(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for segment in template.split('/') {
        if let Some(name) = segment
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
        {
            if !name.is_empty() && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }
    names
}

fn looks_like_identifier(segment: &str) -> bool {
    NUMERIC_SEGMENT.is_match(segment)
        || UUID_SEGMENT.is_match(segment)
        || OPAQUE_SEGMENT.is_match(segment)
}

/// Name every identifier-like segment after the preceding literal segment,
/// falling back to `id` when there is none.
///
/// Names are bare (`users`), the form used for parameter names; wrap them
/// in braces to get the path template placeholder.
pub fn label_path_params(path: &str) -> Vec<String> {
    labeled_segments(path)
        .into_iter()
        .filter_map(|(_, label)| label)
        .collect()
}

/// Path with identifier-like segments replaced by their contextual labels
pub fn contextual_template(path: &str) -> String {
    let segments: Vec<String> = labeled_segments(path)
        .into_iter()
        .map(|(segment, label)| match label {
            Some(name) => format!("{{{}}}", name),
            None => segment.to_string(),
        })
        .collect();
    format!("/{}", segments.join("/"))
}

fn labeled_segments(path: &str) -> Vec<(&str, Option<String>)> {
    let mut previous_literal: Option<&str> = None;
    let mut labeled = Vec::new();

    for segment in path.split('/').filter(|s| !s.is_empty()) {
        if looks_like_identifier(segment) {
            let name = previous_literal.unwrap_or("id").to_string();
            labeled.push((segment, Some(name)));
            // A second identifier in a row has no literal context of its own
            previous_literal = None;
        } else {
            previous_literal = Some(segment);
            labeled.push((segment, None));
        }
    }

    labeled
}

/// `scheme://host[:port]` of a URL, `None` when it has no host
pub fn origin(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    })
}
