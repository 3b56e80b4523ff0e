pub mod curl;
pub mod tokenizer;

pub use curl::{ApiInfo, extract_api_info, parse_curl, validate_curl};
pub use tokenizer::tokenize;
