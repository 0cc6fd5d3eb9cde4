//! Helpers for turning free-form model replies into typed values.

mod parser;
mod response;

pub use parser::{parse_json, parse_with_fallback};
pub use response::LlmResponse;
