//! Fallback Provider Chain
//!
//! Ordered cascade over configured providers: try each in turn, return
//! the first success. No retries within a provider and no state between
//! calls; a failed provider is simply passed over for this request.

use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::{LlmResponse, ProviderConfig, SharedProvider, create_provider};
use crate::types::{RepoLensError, Result};

/// Cascading provider chain.
pub struct ProviderChain {
    providers: Vec<SharedProvider>,
}

impl ProviderChain {
    pub fn new(providers: Vec<SharedProvider>) -> Self {
        Self { providers }
    }

    /// Build a chain from provider configs, in order.
    pub fn from_configs(configs: &[ProviderConfig]) -> Result<Self> {
        let providers = configs
            .iter()
            .map(create_provider)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(providers))
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Try each provider in order, returning the first success.
    #[instrument(skip(self, prompt, schema), fields(providers = self.providers.len()))]
    pub async fn execute(&self, prompt: &str, schema: &Value) -> Result<LlmResponse> {
        if self.providers.is_empty() {
            return Err(RepoLensError::Config(
                "No providers configured in chain".to_string(),
            ));
        }

        let mut last_error = None;

        for provider in &self.providers {
            debug!(provider = provider.name(), model = provider.model(), "chain attempt");

            match provider.generate(prompt, schema).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    warn!(provider = provider.name(), error = %e, "provider failed, cascading");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| RepoLensError::llm("all providers exhausted")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::provider::{LlmProvider, ResponseMetadata, TokenUsage};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubProvider {
        fail: bool,
        calls: AtomicUsize,
    }

    impl StubProvider {
        fn ok() -> Arc<Self> {
            Arc::new(Self {
                fail: false,
                calls: AtomicUsize::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                fail: true,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl LlmProvider for StubProvider {
        async fn generate(&self, _prompt: &str, _schema: &Value) -> Result<LlmResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(RepoLensError::llm("stub failure"))
            } else {
                Ok(LlmResponse {
                    content: json!({"ok": true}),
                    usage: TokenUsage::default(),
                    metadata: ResponseMetadata::default(),
                })
            }
        }

        fn name(&self) -> &str {
            "stub"
        }

        fn model(&self) -> &str {
            "stub-model"
        }
    }

    #[tokio::test]
    async fn test_first_success_wins() {
        let first = StubProvider::ok();
        let second = StubProvider::ok();
        let chain = ProviderChain::new(vec![
            first.clone() as SharedProvider,
            second.clone() as SharedProvider,
        ]);

        let response = chain.execute("p", &Value::Null).await.unwrap();
        assert_eq!(response.content, json!({"ok": true}));
        assert_eq!(first.calls.load(Ordering::SeqCst), 1);
        assert_eq!(second.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cascades_past_failure() {
        let first = StubProvider::failing();
        let second = StubProvider::ok();
        let chain = ProviderChain::new(vec![
            first.clone() as SharedProvider,
            second.clone() as SharedProvider,
        ]);

        assert!(chain.execute("p", &Value::Null).await.is_ok());
        assert_eq!(first.calls.load(Ordering::SeqCst), 1);
        assert_eq!(second.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_all_failures_returns_last_error() {
        let chain = ProviderChain::new(vec![
            StubProvider::failing() as SharedProvider,
            StubProvider::failing() as SharedProvider,
        ]);

        assert!(chain.execute("p", &Value::Null).await.is_err());
    }

    #[tokio::test]
    async fn test_empty_chain_is_config_error() {
        let chain = ProviderChain::new(Vec::new());
        let err = chain.execute("p", &Value::Null).await.unwrap_err();
        assert!(matches!(err, RepoLensError::Config(_)));
    }
}
