use super::tokenizer::tokenize;
use crate::error::{Curl2OpenApiError, Result};
use crate::inference::endpoint::{label_path_params, origin};
use crate::models::ParsedRequest;
use indexmap::IndexMap;
use serde::Serialize;
use url::Url;

/// Parse a raw cURL command into a [`ParsedRequest`].
///
/// Only `-X`/`--request`, `-H`/`--header`, `-d`/`--data`/`--data-raw` and a
/// bare `http(s)://` URL are understood. Every other token is skipped on its
/// own, so the argument of an unsupported flag is looked at like any other
/// token.
pub fn parse_curl(raw_curl: &str) -> Result<ParsedRequest> {
    let command = strip_curl_prefix(raw_curl.trim());
    let tokens = tokenize(command);

    let mut explicit_method: Option<String> = None;
    let mut url: Option<String> = None;
    let mut headers = IndexMap::new();
    let mut body: Option<String> = None;

    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let argument = tokens.get(i + 1);

        match token {
            "-X" | "--request" => {
                if let Some(method) = argument {
                    explicit_method = Some(method.to_uppercase());
                    i += 2;
                    continue;
                }
            }
            "-H" | "--header" => {
                if let Some(header) = argument {
                    match header.split_once(':') {
                        Some((name, value)) if !name.trim().is_empty() => {
                            headers.insert(name.trim().to_string(), value.trim().to_string());
                        }
                        _ => tracing::debug!("Ignoring malformed header: {}", header),
                    }
                    i += 2;
                    continue;
                }
            }
            "-d" | "--data" | "--data-raw" => {
                if let Some(data) = argument {
                    body = Some(data.clone());
                    i += 2;
                    continue;
                }
            }
            _ if token.starts_with("http://") || token.starts_with("https://") => {
                if url.is_none() {
                    url = Some(token.to_string());
                }
            }
            _ => tracing::trace!("Skipping token: {}", token),
        }
        i += 1;
    }

    let url = url.ok_or_else(|| {
        Curl2OpenApiError::ParseError("No URL found in cURL command".to_string())
    })?;

    let method = match explicit_method {
        Some(method) => method,
        None if body.is_some() => "POST".to_string(),
        None => "GET".to_string(),
    };

    let query = extract_query(&url);

    Ok(ParsedRequest {
        method,
        url,
        headers,
        body,
        query,
    })
}

/// Whether the command parses at all
pub fn validate_curl(raw_curl: &str) -> bool {
    parse_curl(raw_curl).is_ok()
}

fn strip_curl_prefix(command: &str) -> &str {
    match command.strip_prefix("curl") {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest.trim_start(),
        _ => command,
    }
}

/// Decoded query pairs, `None` when empty or when the URL does not parse
fn extract_query(url: &str) -> Option<IndexMap<String, String>> {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!("Skipping query extraction for {}: {}", url, e);
            return None;
        }
    };

    let query: IndexMap<String, String> = parsed
        .query_pairs()
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    if query.is_empty() { None } else { Some(query) }
}

/// Descriptive breakdown of a parsed request's URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiInfo {
    /// `scheme://host[:port]`
    pub base_url: String,
    pub path: String,
    /// Contextual labels for identifier-like path segments
    pub path_params: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_params: Option<IndexMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

/// Break a parsed request down into origin, path, labeled path parameters,
/// query and content type
pub fn extract_api_info(parsed: &ParsedRequest) -> Result<ApiInfo> {
    let url = Url::parse(&parsed.url)
        .map_err(|e| Curl2OpenApiError::MalformedUrl(format!("{}: {}", parsed.url, e)))?;
    let base_url = origin(&url)
        .ok_or_else(|| Curl2OpenApiError::MalformedUrl(format!("{}: no host", parsed.url)))?;

    let content_type = parsed
        .headers
        .get("Content-Type")
        .or_else(|| parsed.headers.get("content-type"))
        .cloned();

    Ok(ApiInfo {
        base_url,
        path: url.path().to_string(),
        path_params: label_path_params(url.path()),
        query_params: parsed.query.clone(),
        content_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_get() {
        let parsed = parse_curl("curl https://api.example.com/users").unwrap();
        assert_eq!(parsed.method, "GET");
        assert_eq!(parsed.url, "https://api.example.com/users");
        assert!(parsed.headers.is_empty());
        assert!(parsed.body.is_none());
        assert!(parsed.query.is_none());
    }

    #[test]
    fn test_without_curl_prefix() {
        let parsed = parse_curl("-X DELETE https://a.test/items/1").unwrap();
        assert_eq!(parsed.method, "DELETE");
    }

    #[test]
    fn test_curl_prefix_is_case_sensitive() {
        // "CURL" is kept as an unknown token and skipped
        let parsed = parse_curl("CURL https://a.test").unwrap();
        assert_eq!(parsed.url, "https://a.test");
    }

    #[test]
    fn test_method_is_uppercased() {
        let parsed = parse_curl("curl --request patch https://a.test").unwrap();
        assert_eq!(parsed.method, "PATCH");
    }

    #[test]
    fn test_headers_split_on_first_colon() {
        let parsed = parse_curl(
            r#"curl -H "X-Time: 12:30" --header 'Accept:application/json' https://a.test"#,
        )
        .unwrap();
        assert_eq!(parsed.headers.get("X-Time").unwrap(), "12:30");
        assert_eq!(parsed.headers.get("Accept").unwrap(), "application/json");
    }

    #[test]
    fn test_duplicate_header_overwrites() {
        let parsed =
            parse_curl(r#"curl -H "X-A: 1" -H "X-B: 2" -H "X-A: 3" https://a.test"#).unwrap();
        assert_eq!(parsed.headers.len(), 2);
        assert_eq!(parsed.headers.get("X-A").unwrap(), "3");
        assert_eq!(parsed.headers.get_index(0).unwrap().0, "X-A");
    }

    #[test]
    fn test_header_without_colon_is_ignored() {
        let parsed = parse_curl(r#"curl -H "garbage" https://a.test"#).unwrap();
        assert!(parsed.headers.is_empty());
    }

    #[test]
    fn test_body_promotes_to_post() {
        let parsed = parse_curl(r#"curl https://a.test -d '{"a":1}'"#).unwrap();
        assert_eq!(parsed.method, "POST");
        assert_eq!(parsed.body.as_deref(), Some(r#"{"a":1}"#));
    }

    #[test]
    fn test_explicit_method_wins_over_body() {
        let parsed = parse_curl(r#"curl -d 'x=1' -X PUT https://a.test"#).unwrap();
        assert_eq!(parsed.method, "PUT");

        let parsed = parse_curl(r#"curl -X GET --data-raw 'x=1' https://a.test"#).unwrap();
        assert_eq!(parsed.method, "GET");
    }

    #[test]
    fn test_first_url_wins() {
        let parsed = parse_curl("curl https://first.test https://second.test").unwrap();
        assert_eq!(parsed.url, "https://first.test");
    }

    #[test]
    fn test_flag_argument_is_not_a_url() {
        let parsed = parse_curl("curl -d https://body.test https://real.test").unwrap();
        assert_eq!(parsed.url, "https://real.test");
        assert_eq!(parsed.body.as_deref(), Some("https://body.test"));
    }

    #[test]
    fn test_unknown_flags_are_skipped_one_token_at_a_time() {
        let parsed = parse_curl("curl -u user:pass -k -L https://a.test").unwrap();
        assert_eq!(parsed.url, "https://a.test");
        assert_eq!(parsed.method, "GET");
    }

    #[test]
    fn test_trailing_flag_without_argument() {
        let parsed = parse_curl("curl https://a.test -X").unwrap();
        assert_eq!(parsed.method, "GET");
    }

    #[test]
    fn test_query_is_decoded() {
        let parsed = parse_curl("curl 'https://a.test/search?q=hello%20world&page=2'").unwrap();
        let query = parsed.query.unwrap();
        assert_eq!(query.get("q").unwrap(), "hello world");
        assert_eq!(query.get("page").unwrap(), "2");
    }

    #[test]
    fn test_malformed_url_keeps_request_without_query() {
        let parsed = parse_curl("curl http://exa mple.test?x=1").unwrap();
        assert_eq!(parsed.url, "http://exa");
        assert!(parsed.query.is_none());

        let parsed = parse_curl("curl 'http://[bad/path?x=1'").unwrap();
        assert_eq!(parsed.url, "http://[bad/path?x=1");
        assert!(parsed.query.is_none());
    }

    #[test]
    fn test_missing_url_is_parse_error() {
        let result = parse_curl("curl -X POST -d '{}'");
        assert!(matches!(result, Err(Curl2OpenApiError::ParseError(_))));
        assert!(!validate_curl("curl ftp://a.test"));
        assert!(!validate_curl(""));
        assert!(validate_curl("curl http://a.test"));
    }

    #[test]
    fn test_empty_quoted_body_swallows_url() {
        // An empty quoted argument yields no token, so `-d` takes the URL
        let result = parse_curl("curl -X POST -d '' https://api.example.com/users");
        assert!(matches!(result, Err(Curl2OpenApiError::ParseError(_))));

        let parsed = parse_curl("curl -X POST -d '' https://a.test/x https://a.test/y").unwrap();
        assert_eq!(parsed.body.as_deref(), Some("https://a.test/x"));
        assert_eq!(parsed.url, "https://a.test/y");
    }

    #[test]
    fn test_extract_api_info() {
        let parsed = parse_curl(
            r#"curl -H "content-type: application/json" "https://api.example.com:8443/users/42/posts?sort=asc""#,
        )
        .unwrap();
        let info = extract_api_info(&parsed).unwrap();
        assert_eq!(info.base_url, "https://api.example.com:8443");
        assert_eq!(info.path, "/users/42/posts");
        assert_eq!(info.path_params, vec!["users"]);
        assert_eq!(info.query_params.unwrap().get("sort").unwrap(), "asc");
        assert_eq!(info.content_type.as_deref(), Some("application/json"));
    }

    #[test]
    fn test_extract_api_info_rejects_bad_url() {
        let parsed = parse_curl("curl 'http://[bad'").unwrap();
        assert!(matches!(
            extract_api_info(&parsed),
            Err(Curl2OpenApiError::MalformedUrl(_))
        ));
    }
}
