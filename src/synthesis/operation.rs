use super::SynthesisWarning;
use super::aggregate::EndpointGroup;
use crate::inference::endpoint::template_parameters;
use crate::inference::{SchemaRole, infer_parameter_type, infer_schema};
use crate::models::openapi::{
    MediaType, Operation, Parameter, ParameterLocation, RequestBody, Response, SecurityScheme,
};
use indexmap::IndexMap;
use serde_json::{Value, json};
use std::collections::HashSet;

/// Builds one operation per endpoint group, keeping operation ids unique
/// across the whole document
pub(crate) struct OperationBuilder<'a> {
    operation_security: bool,
    operation_ids: HashSet<String>,
    warnings: &'a mut Vec<SynthesisWarning>,
}

impl<'a> OperationBuilder<'a> {
    pub fn new(operation_security: bool, warnings: &'a mut Vec<SynthesisWarning>) -> Self {
        Self {
            operation_security,
            operation_ids: HashSet::new(),
            warnings,
        }
    }

    pub fn build(&mut self, group: &EndpointGroup<'_>) -> Operation {
        let key = &group.key;
        let endpoint = key.to_string();

        let parameters = self.parameters(group);
        let request_body = self.request_body(group, &endpoint);
        let responses = self.responses(group, &endpoint);

        let security = if self.operation_security
            && group.captures().any(|c| c.request.has_authorization())
        {
            let mut requirement = IndexMap::new();
            requirement.insert(SecurityScheme::BEARER_AUTH.to_string(), Vec::new());
            vec![requirement]
        } else {
            Vec::new()
        };

        Operation {
            summary: format!("{} {}", key.method.to_uppercase(), key.path),
            operation_id: self.unique_operation_id(&key.method, &key.path),
            description: Some(format!("Generated from {} cURL command(s)", group.capture_count())),
            parameters,
            request_body,
            responses,
            security,
        }
    }

    fn unique_operation_id(&mut self, method: &str, path: &str) -> String {
        let stem: String = path.chars().filter(char::is_ascii_alphanumeric).collect();
        let base = format!("{}{}", method.to_lowercase(), stem);

        let mut candidate = base.clone();
        let mut suffix = 2;
        while !self.operation_ids.insert(candidate.clone()) {
            candidate = format!("{}_{}", base, suffix);
            suffix += 1;
        }
        candidate
    }

    /// Path parameters from the template, then query parameters observed
    /// anywhere in the group. Names are unique; a path parameter wins over a
    /// query parameter of the same name.
    fn parameters(&self, group: &EndpointGroup<'_>) -> Vec<Parameter> {
        let mut parameters: Vec<Parameter> = template_parameters(&group.key.path)
            .into_iter()
            .map(|name| Parameter {
                name,
                location: ParameterLocation::Path,
                required: true,
                schema: json!({ "type": "string" }),
                description: Some("Path parameter".to_string()),
            })
            .collect();

        let mut query_values: IndexMap<String, Vec<String>> = IndexMap::new();
        for member in &group.members {
            for (name, value) in member.url.query_pairs() {
                query_values
                    .entry(name.into_owned())
                    .or_default()
                    .push(value.into_owned());
            }
        }

        for (name, values) in query_values {
            if parameters.iter().any(|p| p.name == name) {
                tracing::debug!(endpoint = %group.key, "Query parameter '{}' shadowed by path parameter", name);
                continue;
            }
            parameters.push(Parameter {
                name,
                location: ParameterLocation::Query,
                required: false,
                schema: infer_parameter_type(&values).to_value(),
                description: Some("Query parameter".to_string()),
            });
        }

        parameters
    }

    fn request_body(&mut self, group: &EndpointGroup<'_>, endpoint: &str) -> Option<RequestBody> {
        let bodies: Vec<&str> = group
            .captures()
            .filter_map(|c| c.request.body.as_deref())
            .filter(|body| !body.trim().is_empty())
            .collect();

        if bodies.is_empty() {
            return None;
        }

        let schema = self.infer_or_default(&bodies, SchemaRole::Request, endpoint);
        Some(RequestBody {
            required: true,
            content: MediaType::json(schema),
        })
    }

    fn responses(&mut self, group: &EndpointGroup<'_>, endpoint: &str) -> IndexMap<String, Response> {
        let samples: Vec<&str> = group
            .captures()
            .filter_map(|c| c.response.as_deref())
            .filter(|response| !response.trim().is_empty())
            .collect();

        let success_schema = if samples.is_empty() {
            json!({ "type": "object" })
        } else {
            self.infer_or_default(&samples, SchemaRole::Response, endpoint)
        };

        let mut responses = IndexMap::new();
        responses.insert(
            "200".to_string(),
            Response {
                description: "Successful response".to_string(),
                content: MediaType::json(success_schema),
            },
        );
        responses.insert(
            "400".to_string(),
            Response {
                description: "Bad request".to_string(),
                content: MediaType::json(json!({
                    "type": "object",
                    "properties": {
                        "error": { "type": "string" },
                        "message": { "type": "string" }
                    }
                })),
            },
        );
        responses
    }

    fn infer_or_default(&mut self, samples: &[&str], role: SchemaRole, endpoint: &str) -> Value {
        match infer_schema(samples, role) {
            Ok(schema) => schema,
            Err(e) => {
                tracing::warn!(endpoint = %endpoint, "Falling back to permissive schema: {}", e);
                self.warnings
                    .push(SynthesisWarning::new(e.to_string()).with_endpoint(endpoint));
                json!({ "type": "object" })
            }
        }
    }
}
