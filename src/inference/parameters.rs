use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::LazyLock;

static INTEGER_VALUE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());
static NUMBER_VALUE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]*\.[0-9]+$").unwrap());

/// Number of observed values kept as examples
pub const MAX_EXAMPLES: usize = 3;

/// Scalar type of a path or query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    String,
    Integer,
    Number,
    Boolean,
}

impl ParameterType {
    fn classify(value: &str) -> Self {
        if value == "true" || value == "false" {
            ParameterType::Boolean
        } else if INTEGER_VALUE.is_match(value) {
            ParameterType::Integer
        } else if NUMBER_VALUE.is_match(value) {
            ParameterType::Number
        } else {
            ParameterType::String
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            ParameterType::String => "string",
            ParameterType::Integer => "integer",
            ParameterType::Number => "number",
            ParameterType::Boolean => "boolean",
        }
    }

    /// Convert a raw observed value into a JSON value of this type
    fn example(&self, raw: &str) -> Value {
        match self {
            ParameterType::Boolean => Value::Bool(raw == "true"),
            ParameterType::Integer => match raw.parse::<i64>() {
                Ok(n) => Value::from(n),
                Err(_) => raw.parse::<f64>().map(Value::from).unwrap_or(Value::Null),
            },
            ParameterType::Number => raw.parse::<f64>().map(Value::from).unwrap_or(Value::Null),
            ParameterType::String => Value::String(raw.to_string()),
        }
    }
}

/// Inferred schema for one parameter: its type and up to three examples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSchema {
    #[serde(rename = "type")]
    pub param_type: ParameterType,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Value>,
}

impl ParameterSchema {
    pub fn to_value(&self) -> Value {
        if self.examples.is_empty() {
            json!({ "type": self.param_type.as_str() })
        } else {
            json!({ "type": self.param_type.as_str(), "examples": self.examples })
        }
    }
}

/// Infer the narrowest scalar type every observed value conforms to.
///
/// A single value of a different kind demotes the whole set to `string`.
pub fn infer_parameter_type<S: AsRef<str>>(values: &[S]) -> ParameterSchema {
    let mut kinds = values.iter().map(|v| ParameterType::classify(v.as_ref()));

    let param_type = match kinds.next() {
        Some(first) => {
            if kinds.all(|kind| kind == first) {
                first
            } else {
                ParameterType::String
            }
        }
        None => ParameterType::String,
    };

    let examples = values
        .iter()
        .take(MAX_EXAMPLES)
        .map(|v| param_type.example(v.as_ref()))
        .collect();

    ParameterSchema {
        param_type,
        examples,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers() {
        let schema = infer_parameter_type(&["1", "2", "3"]);
        assert_eq!(schema.param_type, ParameterType::Integer);
        assert_eq!(schema.examples, vec![json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn test_non_conforming_value_demotes_to_string() {
        let schema = infer_parameter_type(&["1", "abc"]);
        assert_eq!(schema.param_type, ParameterType::String);
        assert_eq!(schema.examples, vec![json!("1"), json!("abc")]);
    }

    #[test]
    fn test_booleans() {
        let schema = infer_parameter_type(&["true", "false"]);
        assert_eq!(schema.param_type, ParameterType::Boolean);
        assert_eq!(schema.examples, vec![json!(true), json!(false)]);
    }

    #[test]
    fn test_numbers() {
        let schema = infer_parameter_type(&["1.5", ".25"]);
        assert_eq!(schema.param_type, ParameterType::Number);
        assert_eq!(schema.examples, vec![json!(1.5), json!(0.25)]);
    }

    #[test]
    fn test_integer_and_number_mix_is_string() {
        let schema = infer_parameter_type(&["1", "2.5"]);
        assert_eq!(schema.param_type, ParameterType::String);
    }

    #[test]
    fn test_examples_are_capped() {
        let schema = infer_parameter_type(&["a", "b", "c", "d"]);
        assert_eq!(schema.examples.len(), MAX_EXAMPLES);
    }

    #[test]
    fn test_no_values() {
        let schema = infer_parameter_type::<&str>(&[]);
        assert_eq!(schema.param_type, ParameterType::String);
        assert!(schema.examples.is_empty());
        assert_eq!(schema.to_value(), json!({ "type": "string" }));
    }

    #[test]
    fn test_unicode_digits_are_strings() {
        let schema = infer_parameter_type(&["١٢٣"]);
        assert_eq!(schema.param_type, ParameterType::String);
    }

    #[test]
    fn test_to_value() {
        let schema = infer_parameter_type(&["10"]);
        assert_eq!(
            schema.to_value(),
            json!({ "type": "integer", "examples": [10] })
        );
    }
}
