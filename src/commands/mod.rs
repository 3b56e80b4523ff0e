pub mod endpoints;
pub mod generate;
pub mod parse;
pub mod serve;
pub mod validate;

pub use endpoints::execute_endpoints;
pub use generate::{GenerateOptions, execute_generate};
pub use parse::execute_parse;
pub use serve::execute_serve;
pub use validate::execute_validate;

/// Project id used when captures are loaded from disk
pub(crate) const LOCAL_PROJECT: &str = "local";
