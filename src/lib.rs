pub mod cli;
pub mod commands;
pub mod error;
pub mod inference;
pub mod loader;
pub mod models;
pub mod parser;
pub mod server;
pub mod store;
pub mod synthesis;
pub mod telemetry;
pub mod validation;

pub use error::{Curl2OpenApiError, Result};
