//! Enrichment Stage
//!
//! Fills the IR fields left unset by deterministic analysis. Two
//! producers exist: the pure rule-based transforms in [`rules`] and an
//! optional LLM pass through the provider chain. The consumption
//! contract for the LLM is strict fallback: any error, timeout, or
//! non-conforming payload yields the rule-based values for that field
//! group, and never fails the run.

pub mod diagram;
pub mod rules;

pub use diagram::build_visualization;

use std::time::Duration;
use tracing::warn;

use crate::ai::{
    ProviderChain, ProviderConfig, architecture_prompt, overview_prompt, recommendations_prompt,
    with_timeout,
};
use crate::config::LlmConfig;
use crate::types::{AnalysisIr, Architecture, EndpointGroup, Overview, Recommendation};

/// Enrichment output consumed by the response assembler.
#[derive(Debug, Clone)]
pub struct Enrichment {
    pub overview: Overview,
    pub architecture: Architecture,
    pub recommendations: Vec<Recommendation>,
}

/// Runs the enrichment transforms, LLM-first when configured.
pub struct Enricher {
    chain: Option<ProviderChain>,
    timeout: Duration,
}

impl Enricher {
    /// Purely rule-based enrichment.
    pub fn rule_based() -> Self {
        Self {
            chain: None,
            timeout: Duration::ZERO,
        }
    }

    /// Enricher with an explicit provider chain (used by tests and
    /// custom wiring).
    pub fn with_chain(chain: ProviderChain, timeout: Duration) -> Self {
        Self {
            chain: Some(chain),
            timeout,
        }
    }

    /// Build from configuration. A misconfigured provider degrades to
    /// rule-based enrichment with a warning rather than failing.
    pub fn from_config(llm: &LlmConfig) -> Self {
        if !llm.enabled {
            return Self::rule_based();
        }

        let mut configs = vec![ProviderConfig::primary(llm)];
        if let Some(fallback) = ProviderConfig::fallback(llm) {
            configs.push(fallback);
        }

        match ProviderChain::from_configs(&configs) {
            Ok(chain) => Self::with_chain(chain, Duration::from_secs(llm.timeout_secs)),
            Err(e) => {
                warn!(error = %e, "LLM enrichment unavailable, using rule-based enrichment");
                Self::rule_based()
            }
        }
    }

    /// Enrich the IR. Always succeeds.
    ///
    /// The three producers are independent, so the LLM calls run
    /// concurrently; each falls back to its rule-based counterpart on
    /// its own.
    pub async fn enrich(&self, ir: &AnalysisIr, endpoints: &[EndpointGroup]) -> Enrichment {
        let (overview, architecture, recommendations) = futures::join!(
            self.llm_overview(ir, endpoints),
            self.llm_architecture(ir, endpoints),
            self.llm_recommendations(ir, endpoints),
        );

        Enrichment {
            overview: overview.unwrap_or_else(|| rules::generate_overview(ir)),
            architecture: architecture.unwrap_or_else(|| rules::generate_architecture(ir)),
            recommendations: recommendations
                .unwrap_or_else(|| rules::generate_recommendations(ir)),
        }
    }

    // =========================================================================
    // LLM Producers (None = fall back to rules)
    // =========================================================================

    async fn execute(
        &self,
        prompt: crate::ai::EnrichmentPrompt,
        operation: &str,
    ) -> Option<serde_json::Value> {
        let chain = self.chain.as_ref()?;

        match with_timeout(self.timeout, chain.execute(&prompt.prompt, &prompt.schema), operation)
            .await
        {
            Ok(response) => Some(response.content),
            Err(e) => {
                warn!(operation, error = %e, "LLM enrichment failed, falling back to rules");
                None
            }
        }
    }

    async fn llm_overview(&self, ir: &AnalysisIr, endpoints: &[EndpointGroup]) -> Option<Overview> {
        let content = self
            .execute(overview_prompt(ir, endpoints), "overview enrichment")
            .await?;

        let description = content.get("description")?.as_str()?.to_string();
        let key_features: Vec<String> = content
            .get("key_features")
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default();

        Some(Overview {
            description: Some(description),
            key_features: (!key_features.is_empty()).then_some(key_features),
            ..ir.overview.clone()
        })
    }

    async fn llm_architecture(
        &self,
        ir: &AnalysisIr,
        endpoints: &[EndpointGroup],
    ) -> Option<Architecture> {
        let content = self
            .execute(architecture_prompt(ir, endpoints), "architecture enrichment")
            .await?;

        let patterns: Vec<String> = content
            .get("patterns")?
            .as_array()?
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect();

        if patterns.is_empty() {
            return None;
        }

        Some(Architecture {
            patterns: Some(patterns),
            ..ir.architecture.clone()
        })
    }

    async fn llm_recommendations(
        &self,
        ir: &AnalysisIr,
        endpoints: &[EndpointGroup],
    ) -> Option<Vec<Recommendation>> {
        let content = self
            .execute(
                recommendations_prompt(ir, endpoints),
                "recommendation enrichment",
            )
            .await?;

        let recommendations: Vec<Recommendation> =
            serde_json::from_value(content.get("recommendations")?.clone()).ok()?;

        (!recommendations.is_empty()).then_some(recommendations)
    }
}
