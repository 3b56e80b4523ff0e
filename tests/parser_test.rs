use curl2openapi::Curl2OpenApiError;
use curl2openapi::parser::{extract_api_info, parse_curl, tokenize, validate_curl};

#[test]
fn test_bare_url_defaults() {
    for url in [
        "https://api.example.com",
        "https://api.example.com/users/1",
        "http://localhost:8080/health",
    ] {
        let parsed = parse_curl(&format!("curl {}", url)).unwrap();
        assert_eq!(parsed.method, "GET");
        assert_eq!(parsed.url, url);
        assert!(parsed.headers.is_empty());
        assert!(parsed.body.is_none());
    }
}

#[test]
fn test_explicit_post_regardless_of_flag_order() {
    let commands = [
        "curl -X POST https://a.test/items",
        "curl https://a.test/items -X POST",
        "curl -H 'Accept: */*' -X POST https://a.test/items",
        "curl -X POST -H 'Accept: */*' https://a.test/items -d x",
    ];
    for raw in commands {
        assert_eq!(parse_curl(raw).unwrap().method, "POST", "{}", raw);
    }
}

#[test]
fn test_body_promotion() {
    let parsed = parse_curl("curl -d '{\"a\":1}' https://a.test/items").unwrap();
    assert_eq!(parsed.method, "POST");
    assert_eq!(parsed.body.as_deref(), Some("{\"a\":1}"));

    let parsed = parse_curl("curl -d '{\"a\":1}' -X PUT https://a.test/items/1").unwrap();
    assert_eq!(parsed.method, "PUT");
}

#[test]
fn test_quoted_header_is_one_token() {
    assert_eq!(
        tokenize(r#"-H "Authorization: Bearer abc def""#),
        vec!["-H", "Authorization: Bearer abc def"]
    );
}

#[test]
fn test_no_url_is_parse_error() {
    let err = parse_curl("curl -X GET example.com/users").unwrap_err();
    assert!(matches!(err, Curl2OpenApiError::ParseError(_)));
    assert!(!validate_curl("curl -X GET example.com/users"));
    assert!(validate_curl("curl https://example.com"));
}

#[test]
fn test_api_info_labels_path_segments() {
    let parsed = parse_curl(
        r#"curl -H "Content-Type: application/json" "https://api.example.com:8443/users/42/orders/7?expand=items""#,
    )
    .unwrap();
    let info = extract_api_info(&parsed).unwrap();

    assert_eq!(info.base_url, "https://api.example.com:8443");
    assert_eq!(info.path, "/users/42/orders/7");
    assert_eq!(info.path_params, vec!["users", "orders"]);
    assert_eq!(
        info.query_params.unwrap().get("expand").map(String::as_str),
        Some("items")
    );
    assert_eq!(info.content_type.as_deref(), Some("application/json"));
}
