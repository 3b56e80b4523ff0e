//! Inference helpers used by the synthesizer
//!
//! All functions here are stateless and safe to call from any thread.

pub mod endpoint;
pub mod parameters;
pub mod schema;

pub use endpoint::{EndpointKey, label_path_params, normalize_endpoint};
pub use parameters::{ParameterSchema, ParameterType, infer_parameter_type};
pub use schema::{SchemaBuilder, SchemaRole, fallback_schema, infer_schema};
