//! JSON Schema inference from sample payloads
//!
//! Samples are folded left to right into a [`SchemaNode`] tree. Each fold step
//! can only widen what is already there: a property missing from some object
//! samples becomes optional, `integer` meets `number` as `number`, `null`
//! turns the other side nullable, and anything else that does not line up is
//! kept side by side as a `oneOf`. Folding the same sample twice is a no-op on
//! the rendered schema.

use crate::error::{Curl2OpenApiError, Result};
use indexmap::IndexMap;
use serde_json::{Map, Value, json};

/// Deepest nesting the unifier accepts before giving up on a sample
pub const MAX_DEPTH: usize = 64;

/// Which side of the exchange a set of samples came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaRole {
    Request,
    Response,
}

/// Schema used when none of the samples are JSON
pub fn fallback_schema(role: SchemaRole) -> Value {
    match role {
        SchemaRole::Request => json!({ "type": "object", "description": "Request body" }),
        SchemaRole::Response => json!({ "type": "string", "description": "Response content" }),
    }
}

/// Infer a schema covering every sample that parses as JSON.
///
/// Samples that are not JSON are dropped. When nothing is left the
/// role-specific [`fallback_schema`] is returned.
pub fn infer_schema<S: AsRef<str>>(samples: &[S], role: SchemaRole) -> Result<Value> {
    let mut builder = SchemaBuilder::new();
    for sample in samples {
        builder.add_sample(sample.as_ref())?;
    }

    match builder.build() {
        Some(schema) => Ok(schema),
        None => Ok(fallback_schema(role)),
    }
}

/// Incremental schema inference over parsed JSON values
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    root: Option<SchemaNode>,
    samples: usize,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one JSON value into the schema
    pub fn add_value(&mut self, value: &Value) -> Result<()> {
        let node = SchemaNode::from_value(value, 0)?;
        self.root = Some(match self.root.take() {
            Some(root) => root.merge(node),
            None => node,
        });
        self.samples += 1;
        Ok(())
    }

    /// Parse and fold a text sample. Returns `false` when the text is not JSON.
    pub fn add_sample(&mut self, text: &str) -> Result<bool> {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => {
                self.add_value(&value)?;
                Ok(true)
            }
            Err(e) => {
                tracing::debug!("Skipping non-JSON sample: {}", e);
                Ok(false)
            }
        }
    }

    /// Render the unified schema, `None` if no sample was added
    pub fn build(&self) -> Option<Value> {
        self.root.as_ref().map(SchemaNode::to_value)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct SchemaNode {
    nullable: bool,
    kind: Kind,
}

#[derive(Debug, Clone, Default, PartialEq)]
enum Kind {
    /// Nothing observed yet (only nulls, or items of empty arrays)
    #[default]
    Unknown,
    Boolean,
    Integer,
    Number,
    String,
    Array(Box<SchemaNode>),
    Object(ObjectShape),
    /// Incompatible shapes, none of them `Unknown` or `OneOf`
    OneOf(Vec<Kind>),
}

#[derive(Debug, Clone, Default, PartialEq)]
struct ObjectShape {
    /// How many object samples were folded in
    samples: usize,
    properties: IndexMap<String, Property>,
}

#[derive(Debug, Clone, PartialEq)]
struct Property {
    /// How many of those samples carried the property
    seen: usize,
    schema: SchemaNode,
}

impl SchemaNode {
    fn from_value(value: &Value, depth: usize) -> Result<Self> {
        if depth > MAX_DEPTH {
            return Err(Curl2OpenApiError::SchemaInference(format!(
                "sample nesting exceeds {} levels",
                MAX_DEPTH
            )));
        }

        let kind = match value {
            Value::Null => {
                return Ok(SchemaNode {
                    nullable: true,
                    kind: Kind::Unknown,
                });
            }
            Value::Bool(_) => Kind::Boolean,
            Value::Number(n) if n.is_i64() || n.is_u64() => Kind::Integer,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(items) => {
                let mut item = SchemaNode::default();
                for value in items {
                    item = item.merge(SchemaNode::from_value(value, depth + 1)?);
                }
                Kind::Array(Box::new(item))
            }
            Value::Object(map) => {
                let mut properties = IndexMap::with_capacity(map.len());
                for (key, value) in map {
                    properties.insert(
                        key.clone(),
                        Property {
                            seen: 1,
                            schema: SchemaNode::from_value(value, depth + 1)?,
                        },
                    );
                }
                Kind::Object(ObjectShape {
                    samples: 1,
                    properties,
                })
            }
        };

        Ok(SchemaNode {
            nullable: false,
            kind,
        })
    }

    fn merge(self, other: SchemaNode) -> SchemaNode {
        SchemaNode {
            nullable: self.nullable || other.nullable,
            kind: self.kind.merge(other.kind),
        }
    }

    fn to_value(&self) -> Value {
        let mut schema = self.kind.to_map();
        if self.nullable {
            schema.insert("nullable".to_string(), Value::Bool(true));
        }
        Value::Object(schema)
    }
}

impl Kind {
    /// Whether two kinds describe the same family and can merge in place
    fn compatible(&self, other: &Kind) -> bool {
        matches!(
            (self, other),
            (Kind::Boolean, Kind::Boolean)
                | (Kind::String, Kind::String)
                | (Kind::Integer | Kind::Number, Kind::Integer | Kind::Number)
                | (Kind::Array(_), Kind::Array(_))
                | (Kind::Object(_), Kind::Object(_))
        )
    }

    fn merge(self, other: Kind) -> Kind {
        match (self, other) {
            (Kind::Unknown, kind) | (kind, Kind::Unknown) => kind,
            (Kind::OneOf(mut variants), Kind::OneOf(others)) => {
                for kind in others {
                    absorb(&mut variants, kind);
                }
                Kind::OneOf(variants)
            }
            (Kind::OneOf(mut variants), kind) | (kind, Kind::OneOf(mut variants)) => {
                absorb(&mut variants, kind);
                Kind::OneOf(variants)
            }
            (a, b) if a.compatible(&b) => a.merge_compatible(b),
            (a, b) => Kind::OneOf(vec![a, b]),
        }
    }

    fn merge_compatible(self, other: Kind) -> Kind {
        match (self, other) {
            (Kind::Array(a), Kind::Array(b)) => Kind::Array(Box::new(a.merge(*b))),
            (Kind::Object(a), Kind::Object(b)) => Kind::Object(a.merge(b)),
            (Kind::Integer, Kind::Integer) => Kind::Integer,
            (Kind::Integer | Kind::Number, Kind::Integer | Kind::Number) => Kind::Number,
            (same, _) => same,
        }
    }

    fn to_map(&self) -> Map<String, Value> {
        let mut schema = Map::new();
        match self {
            Kind::Unknown => {}
            Kind::Boolean => {
                schema.insert("type".into(), "boolean".into());
            }
            Kind::Integer => {
                schema.insert("type".into(), "integer".into());
            }
            Kind::Number => {
                schema.insert("type".into(), "number".into());
            }
            Kind::String => {
                schema.insert("type".into(), "string".into());
            }
            Kind::Array(item) => {
                schema.insert("type".into(), "array".into());
                schema.insert("items".into(), item.to_value());
            }
            Kind::Object(shape) => {
                schema.insert("type".into(), "object".into());
                if !shape.properties.is_empty() {
                    let properties: Map<String, Value> = shape
                        .properties
                        .iter()
                        .map(|(name, prop)| (name.clone(), prop.schema.to_value()))
                        .collect();
                    schema.insert("properties".into(), Value::Object(properties));
                }
                let required: Vec<Value> = shape
                    .properties
                    .iter()
                    .filter(|(_, prop)| prop.seen == shape.samples)
                    .map(|(name, _)| Value::String(name.clone()))
                    .collect();
                if !required.is_empty() {
                    schema.insert("required".into(), Value::Array(required));
                }
            }
            Kind::OneOf(variants) => {
                let variants = variants
                    .iter()
                    .map(|kind| Value::Object(kind.to_map()))
                    .collect();
                schema.insert("oneOf".into(), Value::Array(variants));
            }
        }
        schema
    }
}

fn absorb(variants: &mut Vec<Kind>, kind: Kind) {
    match variants.iter().position(|existing| existing.compatible(&kind)) {
        Some(pos) => {
            let existing = std::mem::take(&mut variants[pos]);
            variants[pos] = existing.merge_compatible(kind);
        }
        None => variants.push(kind),
    }
}

impl ObjectShape {
    fn merge(mut self, other: ObjectShape) -> ObjectShape {
        self.samples += other.samples;
        for (name, prop) in other.properties {
            match self.properties.get_mut(&name) {
                Some(existing) => {
                    existing.seen += prop.seen;
                    let schema = std::mem::take(&mut existing.schema);
                    existing.schema = schema.merge(prop.schema);
                }
                None => {
                    self.properties.insert(name, prop);
                }
            }
        }
        self
    }
}
