//! Deterministic Repository Analyzers
//!
//! The four analysis stages plus the advisory endpoint scan, all over a
//! read-only [`crate::ingest::RepoHandle`]:
//! - `stack`: languages, frameworks, structure classification
//! - `structure`: folder tree, file count, modules
//! - `dependencies`: manifest extraction
//! - `risks`: hygiene signals
//! - `endpoints`: route discovery (prompt context only)
//!
//! Analyzers never fail. Local problems (unreadable files, malformed
//! manifests) are collected as warnings on the [`crate::types::Degraded`]
//! result and that item's contribution is omitted.

pub mod dependencies;
pub mod endpoints;
pub mod risks;
pub mod stack;
pub mod structure;
pub mod walker;

pub use dependencies::extract_dependencies;
pub use endpoints::discover_endpoints;
pub use risks::detect_risks;
pub use stack::detect_stack;
pub use structure::parse_structure;
