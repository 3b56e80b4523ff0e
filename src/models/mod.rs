pub mod capture;
pub mod openapi;

pub use capture::{Capture, NewCapture, ParsedRequest};
pub use openapi::OpenApiDocument;
