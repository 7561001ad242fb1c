//! Orchestration Pipeline
//!
//! One analysis run, start to finish: workspace → retrieval → the four
//! deterministic analyzers → IR → enrichment → response. Stages run
//! sequentially; the IR strictly requires all four analyzer outputs.
//! The workspace is dropped (and its tree removed) on every exit path.

use std::time::Instant;
use tracing::{info, warn};

use crate::analyzer::{
    detect_risks, detect_stack, discover_endpoints, extract_dependencies, parse_structure,
};
use crate::config::Config;
use crate::enrich::{Enricher, build_visualization};
use crate::ingest::{RepoLocator, Workspace, retrieve};
use crate::ir::build_ir;
use crate::types::{AnalysisResponse, AnalysisWarning, ResponseMeta, Result};

/// Executes analysis runs against a fixed configuration.
pub struct AnalysisPipeline {
    config: Config,
    enricher: Enricher,
}

impl AnalysisPipeline {
    /// Build a pipeline; enrichment wiring follows `config.llm`.
    pub fn new(config: Config) -> Self {
        let enricher = Enricher::from_config(&config.llm);
        Self { config, enricher }
    }

    /// Pipeline with explicit enrichment (used by tests and custom
    /// wiring).
    pub fn with_enricher(config: Config, enricher: Enricher) -> Self {
        Self { config, enricher }
    }

    /// Run one full analysis for the given locator string.
    pub async fn analyze(&self, locator: &str) -> Result<AnalysisResponse> {
        let locator = RepoLocator::parse(locator)?;
        let workspace = Workspace::create()?;

        info!(
            run_id = %workspace.run_id(),
            locator = %locator.display(),
            "starting analysis run"
        );

        // The workspace outlives the whole run and is removed when this
        // function returns, success or failure.
        self.run(&locator, &workspace).await
    }

    async fn run(&self, locator: &RepoLocator, workspace: &Workspace) -> Result<AnalysisResponse> {
        let started = Instant::now();

        let handle = retrieve(locator, &self.config.retrieval, workspace.path()).await?;

        let stack = detect_stack(&handle);
        let structure = parse_structure(&handle);
        let dependencies = extract_dependencies(&handle);
        let risks = detect_risks(&handle);
        let endpoints = discover_endpoints(&handle);

        let mut warnings = Vec::new();
        for stage in [
            stack.warnings.clone(),
            structure.warnings.clone(),
            dependencies.warnings.clone(),
            risks.warnings.clone(),
            endpoints.warnings.clone(),
        ] {
            warnings.extend(stage);
        }
        log_warnings(&warnings);

        let ir = build_ir(
            locator,
            stack.value,
            structure.value,
            dependencies.value,
            risks.value,
        );

        let visualization = build_visualization(&ir);
        let enrichment = self.enricher.enrich(&ir, &endpoints.value).await;

        let response = AnalysisResponse {
            overview: enrichment.overview,
            architecture: enrichment.architecture,
            visualization,
            modules: ir.modules,
            dependencies: ir.dependencies,
            recommendations: enrichment.recommendations,
            meta: Some(ResponseMeta {
                run_id: workspace.run_id(),
                analyzed_at: chrono::Utc::now(),
                duration_ms: started.elapsed().as_millis() as u64,
                warnings: warnings.len(),
            }),
        };

        info!(
            run_id = %workspace.run_id(),
            total_files = response.overview.total_files,
            modules = response.modules.len(),
            warnings = warnings.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "analysis run complete"
        );

        Ok(response)
    }
}

fn log_warnings(warnings: &[AnalysisWarning]) {
    for warning in warnings {
        match &warning.path {
            Some(path) => {
                warn!(stage = warning.stage, path = %path, "{}", warning.message)
            }
            None => warn!(stage = warning.stage, "{}", warning.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RepoLensError, StructureType};
    use std::path::Path;
    use tempfile::TempDir;

    fn touch(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    /// A small fullstack-looking fixture repository.
    fn fixture_repo() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        touch(&root.join("package.json"), r#"{"dependencies": {"react": "18.0.0"}}"#);
        touch(&root.join("next.config.js"), "");
        touch(&root.join("requirements.txt"), "flask==2.0.1\nclick\n");
        touch(&root.join("readme.md"), "# demo");
        touch(&root.join("api/main.py"), "@app.get(\"/items\")\ndef items(): ...\n");
        touch(&root.join("web/src/index.ts"), "");
        touch(&root.join("web/pages/about.tsx"), "");
        temp
    }

    fn pipeline() -> AnalysisPipeline {
        AnalysisPipeline::new(Config::default())
    }

    #[tokio::test]
    async fn test_full_run_over_local_fixture() {
        let repo = fixture_repo();
        let response = pipeline()
            .analyze(&repo.path().to_string_lossy())
            .await
            .unwrap();

        // Deterministic analysis
        assert_eq!(response.overview.total_files, 7);
        assert_eq!(
            response.architecture.structure_type,
            StructureType::Fullstack
        );
        assert_eq!(response.modules.len(), 2);
        assert!(
            response
                .dependencies
                .external_dependencies
                .iter()
                .any(|d| d.name == "flask")
        );

        // Rule-based enrichment (LLM disabled by default)
        assert!(response.overview.description.is_some());
        assert!(response.architecture.patterns.is_some());

        // README present: first recommendation is about CI, not README
        assert_eq!(
            response.recommendations[0].title,
            "Set up Continuous Integration (CI)"
        );

        // Visualization covers modules and internal folders
        assert!(response.visualization.mermaid.contains("Repo --> api[api]"));

        let meta = response.meta.unwrap();
        assert_eq!(meta.warnings, 0);
    }

    #[tokio::test]
    async fn test_invalid_locator_fails_fast() {
        let err = pipeline().analyze("https://github.com/justowner").await.unwrap_err();
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn test_unsupported_host_fails_fast() {
        let err = pipeline()
            .analyze("https://bitbucket.org/a/b")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RepoLensError::Retrieval(crate::types::RetrievalError::UnsupportedHost(_))
        ));
    }

    #[tokio::test]
    async fn test_response_serializes_to_contract_shape() {
        let repo = fixture_repo();
        let response = pipeline()
            .analyze(&repo.path().to_string_lossy())
            .await
            .unwrap();

        let json = serde_json::to_value(&response).unwrap();
        for field in [
            "overview",
            "architecture",
            "visualization",
            "modules",
            "dependencies",
            "recommendations",
        ] {
            assert!(json.get(field).is_some(), "missing field {}", field);
        }
        assert_eq!(json["architecture"]["structure_type"], "fullstack");
    }
}
