use curl2openapi::Curl2OpenApiError;
use curl2openapi::models::Capture;
use curl2openapi::store::{CaptureStore, InMemoryCaptureStore, record_capture};
use curl2openapi::synthesis::{
    DocumentFormat, SynthesisOptions, parse_document, render_document, synthesize,
};
use curl2openapi::validation::validate_spec;
use serde_json::json;

fn project_captures(project: &str, commands: &[&str]) -> Vec<Capture> {
    let store = InMemoryCaptureStore::new();
    for raw in commands {
        record_capture(&store, raw, Some(project), None).unwrap();
    }
    store.find_many_by_project(project)
}

#[test]
fn test_authorized_id_paths_collapse_into_one_operation() {
    let captures = project_captures(
        "p1",
        &[
            r#"curl -H "Authorization: Bearer x" https://api.example.com/users/1"#,
            r#"curl -H "Authorization: Bearer x" https://api.example.com/users/2"#,
        ],
    );

    let synthesis = synthesize(&captures, &SynthesisOptions::default()).unwrap();
    let doc = &synthesis.document;

    assert_eq!(doc.paths.len(), 1);
    let item = &doc.paths["/users/{id}"];
    assert_eq!(item.len(), 1);
    assert!(item.contains_key("get"));
    assert_eq!(
        item["get"].description.as_deref(),
        Some("Generated from 2 cURL command(s)")
    );
    assert!(doc.components.security_schemes.contains_key("bearerAuth"));
    let servers: Vec<&str> = doc.servers.iter().map(|s| s.url.as_str()).collect();
    assert_eq!(servers, vec!["https://api.example.com"]);
    assert!(synthesis.warnings.is_empty());

    // Global scheme only, unless asked otherwise
    assert!(item["get"].security.is_empty());
}

#[test]
fn test_request_bodies_merge_required_fields() {
    let captures = project_captures(
        "p2",
        &[
            r#"curl -X POST -d '{"name":"a"}' https://api.example.com/people"#,
            r#"curl -X POST -d '{"name":"b","age":5}' https://api.example.com/people"#,
        ],
    );

    let synthesis = synthesize(&captures, &SynthesisOptions::default()).unwrap();
    let operation = synthesis.document.operation("/people", "post").unwrap();
    let schema = &operation.request_body.as_ref().unwrap().content["application/json"].schema;

    assert_eq!(schema["properties"]["name"], json!({ "type": "string" }));
    assert_eq!(schema["properties"]["age"], json!({ "type": "integer" }));
    assert_eq!(schema["required"], json!(["name"]));
}

#[test]
fn test_empty_project_aborts() {
    let err = synthesize(&[], &SynthesisOptions::default()).unwrap_err();
    assert!(matches!(err, Curl2OpenApiError::EmptyProject));
}

#[test]
fn test_operation_security_opt_in() {
    let captures = project_captures(
        "p3",
        &[
            r#"curl -H "Authorization: Bearer x" https://api.example.com/me"#,
            "curl https://api.example.com/public",
        ],
    );
    let options = SynthesisOptions {
        operation_security: true,
        ..SynthesisOptions::default()
    };

    let doc = synthesize(&captures, &options).unwrap().document;
    let me = doc.operation("/me", "get").unwrap();
    assert_eq!(me.security.len(), 1);
    assert!(me.security[0].contains_key("bearerAuth"));
    assert!(doc.operation("/public", "get").unwrap().security.is_empty());
}

#[test]
fn test_rendered_document_validates_and_reads_back() {
    let captures = project_captures(
        "p4",
        &[
            "curl https://api.example.com/users?page=1",
            "curl https://api.example.com/users?page=2",
            "curl -X DELETE https://api.example.com/users/550e8400-e29b-41d4-a716-446655440000",
        ],
    );
    let doc = synthesize(&captures, &SynthesisOptions::default())
        .unwrap()
        .document;

    for format in [DocumentFormat::Yaml, DocumentFormat::Json] {
        let text = render_document(&doc, format).unwrap();
        let result = validate_spec(&text);
        assert!(result.is_valid, "{:?}", result.errors);
        assert_eq!(parse_document(&text).unwrap(), doc);
    }

    assert!(doc.paths.contains_key("/users/{uuid}"));
    let page = &doc.operation("/users", "get").unwrap().parameters[0];
    assert_eq!(page.name, "page");
    assert_eq!(page.schema["type"], "integer");
}
