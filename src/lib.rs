//! RepoLens - Repository Analysis & Architectural Insight Service
//!
//! Accepts a public repository locator, obtains a shallow local copy,
//! runs lightweight structural analysis, assembles a canonical
//! intermediate representation, and enriches it into a human-readable
//! summary, an architecture diagram, and improvement recommendations.
//!
//! ## Pipeline
//!
//! retrieval → stack / structure / dependencies / risks → IR →
//! enrichment (rule-based, optionally LLM-backed) → response
//!
//! ## Quick Start
//!
//! ```ignore
//! use repolens::config::Config;
//! use repolens::pipeline::AnalysisPipeline;
//!
//! let pipeline = AnalysisPipeline::new(Config::default());
//! let response = pipeline.analyze("https://github.com/acme/widgets").await?;
//! println!("{}", response.visualization.mermaid);
//! ```
//!
//! ## Modules
//!
//! - [`ingest`]: locator validation, shallow clone, scoped workspace
//! - [`analyzer`]: the deterministic analysis stages
//! - [`ir`]: intermediate-representation assembly
//! - [`enrich`]: rule-based and LLM-backed enrichment
//! - [`ai`]: provider abstraction, prompts, response validation
//! - [`server`]: axum HTTP surface
//! - [`config`]: layered configuration

pub mod ai;
pub mod analyzer;
pub mod cli;
pub mod config;
pub mod constants;
pub mod enrich;
pub mod ingest;
pub mod ir;
pub mod pipeline;
pub mod server;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader};

// Error Types
pub use types::error::{RepoLensError, Result, RetrievalError};

// Pipeline
pub use pipeline::AnalysisPipeline;

// Data Model
pub use types::{AnalysisIr, AnalysisResponse, Recommendation, RiskInfo, StructureType};

// =============================================================================
// AI Re-exports
// =============================================================================

pub use ai::{LlmProvider, LlmResponse, ProviderChain, ProviderConfig, SharedProvider};
