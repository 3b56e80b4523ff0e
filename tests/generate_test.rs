use curl2openapi::commands::GenerateOptions;
use curl2openapi::commands::generate::generate_document;
use curl2openapi::loader::load_capture_sources;
use curl2openapi::synthesis::{DocumentFormat, parse_document};
use curl2openapi::validation::validate_spec;
use std::path::Path;

fn options(format: DocumentFormat) -> GenerateOptions {
    GenerateOptions {
        title: "Fixture API".to_string(),
        description: "From fixtures".to_string(),
        version: "2.0.0".to_string(),
        format,
        operation_security: false,
    }
}

#[test]
fn test_load_text_fixture() {
    let sources = load_capture_sources(Path::new("tests/fixtures/captures.txt")).unwrap();
    assert_eq!(sources.len(), 8);
    assert!(sources.iter().all(|s| s.response.is_none()));
}

#[test]
fn test_generate_from_text_fixture() {
    let content = generate_document(
        Path::new("tests/fixtures/captures.txt"),
        &options(DocumentFormat::Yaml),
    )
    .unwrap();
    let doc = parse_document(&content).unwrap();

    assert_eq!(doc.info.title, "Fixture API");
    assert_eq!(doc.info.version, "2.0.0");
    assert_eq!(doc.servers.len(), 1);

    let paths: Vec<&str> = doc.paths.keys().map(String::as_str).collect();
    assert_eq!(paths, vec!["/users/{id}", "/users", "/orders/{uuid}"]);

    let list = doc.operation("/users", "get").unwrap();
    let names: Vec<&str> = list.parameters.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["page", "active"]);
    assert_eq!(list.parameters[1].schema["type"], "boolean");

    assert!(doc.operation("/users", "post").unwrap().request_body.is_some());
    assert!(doc.components.schemas.contains_key("RequestBody"));
    assert!(doc.components.security_schemes.contains_key("bearerAuth"));

    assert!(validate_spec(&content).is_valid);
}

#[test]
fn test_generate_response_schemas_from_yaml_fixture() {
    let content = generate_document(
        Path::new("tests/fixtures/captures.yaml"),
        &options(DocumentFormat::Json),
    )
    .unwrap();
    let doc: serde_json::Value = serde_json::from_str(&content).unwrap();

    let schema = &doc["paths"]["/products/{id}"]["get"]["responses"]["200"]["content"]
        ["application/json"]["schema"];
    assert_eq!(schema["type"], "object");
    assert_eq!(schema["properties"]["id"]["type"], "integer");
    assert_eq!(schema["properties"]["price"]["type"], "number");
    assert_eq!(schema["properties"]["tags"]["type"], "array");

    assert!(doc["paths"]["/products/{id}"]["put"]["requestBody"].is_object());
}

#[test]
fn test_validate_fixture_document() {
    let content = std::fs::read_to_string("tests/fixtures/openapi.yaml").unwrap();
    let result = validate_spec(&content);
    assert!(result.is_valid, "{:?}", result.errors);
}

#[test]
fn test_missing_input() {
    assert!(
        generate_document(
            Path::new("tests/fixtures/missing.txt"),
            &options(DocumentFormat::Yaml)
        )
        .is_err()
    );
}
