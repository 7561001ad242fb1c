//! AI Integration Layer
//!
//! LLM integration for the enrichment stage: provider abstraction with
//! fallback, prompt construction from the IR, response validation, and
//! timeouts. Everything here is optional at runtime; the deterministic
//! pipeline never depends on it.

pub mod prompt;
pub mod provider;
pub mod timeout;
pub mod validation;

pub use prompt::{
    EnrichmentPrompt, architecture_prompt, overview_prompt, recommendations_prompt,
};
pub use provider::{
    LlmProvider, LlmResponse, OpenAiProvider, ProviderChain, ProviderConfig, ResponseMetadata,
    SharedProvider, TokenUsage, create_provider,
};
pub use timeout::with_timeout;
pub use validation::extract_json_from_response;
