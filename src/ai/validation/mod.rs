//! LLM Response Validation
//!
//! The consumption contract for text-generation output: extract a JSON
//! value from whatever came back, or report failure so the caller falls
//! back to rule-based enrichment. Non-conforming output is never fatal
//! to a run.

mod json_repair;

pub use json_repair::extract_json_from_response;
