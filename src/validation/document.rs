use super::{ErrorType, SpecValidationResult, ValidationError, ValidationWarning};
use serde_yaml::{Mapping, Value};
use std::collections::HashSet;

const HTTP_METHODS: &[&str] = &[
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Validate an OpenAPI document given as YAML or JSON text.
///
/// Text that does not parse at all yields an invalid result with a single
/// error rather than an `Err`.
pub fn validate_spec(content: &str) -> SpecValidationResult {
    let document: Value = match serde_yaml::from_str(content) {
        Ok(value) => value,
        Err(e) => {
            return SpecValidationResult::from_findings(
                vec![ValidationError::new(
                    ErrorType::InvalidFormat,
                    format!("Invalid YAML/JSON format: {}", e),
                )],
                vec![],
            );
        }
    };

    let validator = DocumentValidator::new(&document);
    let (errors, mut warnings) = validator.validate();

    if let Err(e) = serde_yaml::from_str::<oas3::OpenApiV3Spec>(content) {
        warnings.push(ValidationWarning::new(format!(
            "Document does not match the OpenAPI object model: {}",
            e
        )));
    }

    SpecValidationResult::from_findings(errors, warnings)
}

/// Structural checks over a parsed document
struct DocumentValidator<'a> {
    document: &'a Value,
}

impl<'a> DocumentValidator<'a> {
    fn new(document: &'a Value) -> Self {
        Self { document }
    }

    fn validate(&self) -> (Vec<ValidationError>, Vec<ValidationWarning>) {
        let mut errors = vec![];
        let mut warnings = vec![];

        self.check_required_fields(&mut errors);
        self.check_servers(&mut errors);
        let has_security_requirements = self.check_paths(&mut errors, &mut warnings);

        let declares_schemes = self
            .document
            .get("components")
            .and_then(|c| c.get("securitySchemes"))
            .and_then(Value::as_mapping)
            .is_some_and(|schemes| !schemes.is_empty());
        let has_global_security = self.document.get("security").is_some();

        if declares_schemes && !has_global_security && !has_security_requirements {
            warnings.push(ValidationWarning::new(
                "Security schemes defined but not used in any operations",
            ));
        }

        (errors, warnings)
    }

    fn check_required_fields(&self, errors: &mut Vec<ValidationError>) {
        if self.document.get("openapi").is_none() {
            errors.push(ValidationError::new(
                ErrorType::MissingField,
                "Missing required field: openapi",
            ));
        }

        match self.document.get("info") {
            None => errors.push(ValidationError::new(
                ErrorType::MissingField,
                "Missing required field: info",
            )),
            Some(info) => {
                for field in ["title", "version"] {
                    if info.get(field).is_none() {
                        errors.push(ValidationError::new(
                            ErrorType::MissingField,
                            format!("Missing required field: info.{}", field),
                        ));
                    }
                }
            }
        }
    }

    fn check_servers(&self, errors: &mut Vec<ValidationError>) {
        let Some(servers) = self.document.get("servers").and_then(Value::as_sequence) else {
            return;
        };

        let mut seen = HashSet::new();
        for url in servers
            .iter()
            .filter_map(|s| s.get("url"))
            .filter_map(Value::as_str)
        {
            if !seen.insert(url) {
                errors.push(ValidationError::new(
                    ErrorType::DuplicateServer,
                    format!("Duplicate server URL: {}", url),
                ));
            }
        }
    }

    /// Returns whether any operation declares a security requirement
    fn check_paths(
        &self,
        errors: &mut Vec<ValidationError>,
        warnings: &mut Vec<ValidationWarning>,
    ) -> bool {
        let paths = match self.document.get("paths").and_then(Value::as_mapping) {
            Some(paths) if !paths.is_empty() => paths,
            _ => {
                warnings.push(ValidationWarning::new(
                    "No paths defined in the document",
                ));
                return false;
            }
        };

        let mut has_security = false;

        for (key, item) in paths {
            let path = key.as_str().unwrap_or_default();
            if !path.starts_with('/') {
                errors.push(
                    ValidationError::new(
                        ErrorType::InvalidPathKey,
                        format!("Path '{}' must begin with '/'", path),
                    )
                    .with_path(path),
                );
            }

            let Some(item) = item.as_mapping() else {
                continue;
            };

            for (method_key, operation) in item {
                let Some(method) = method_key.as_str() else {
                    continue;
                };
                if !HTTP_METHODS.contains(&method) {
                    continue;
                }

                if operation.get("security").is_some() {
                    has_security = true;
                }

                if !has_success_response(operation) {
                    errors.push(
                        ValidationError::new(
                            ErrorType::MissingSuccessResponse,
                            "Operation has no '200' response",
                        )
                        .with_operation(path, method),
                    );
                }

                for name in duplicate_parameters(operation) {
                    errors.push(
                        ValidationError::new(
                            ErrorType::DuplicateParameter,
                            format!("Parameter '{}' is declared more than once", name),
                        )
                        .with_operation(path, method),
                    );
                }
            }
        }

        has_security
    }
}

fn has_success_response(operation: &Value) -> bool {
    operation
        .get("responses")
        .and_then(Value::as_mapping)
        .is_some_and(|responses: &Mapping| {
            responses
                .keys()
                .any(|code| code.as_str() == Some("200") || code.as_u64() == Some(200))
        })
}

fn duplicate_parameters(operation: &Value) -> Vec<String> {
    let Some(parameters) = operation.get("parameters").and_then(Value::as_sequence) else {
        return vec![];
    };

    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for name in parameters
        .iter()
        .filter_map(|p| p.get("name"))
        .filter_map(Value::as_str)
    {
        if !seen.insert(name) && !duplicates.iter().any(|d| d == name) {
            duplicates.push(name.to_string());
        }
    }
    duplicates
}
