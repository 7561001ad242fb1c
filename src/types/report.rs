//! Analysis Data Model
//!
//! Value records produced by the deterministic analyzers, the canonical
//! intermediate representation (IR) they merge into, and the externally
//! documented response shape.
//!
//! ## Invariant
//!
//! Once built, the IR shape is stable: enrichment and the HTTP response
//! read only documented fields. Fields left `None` are "to be filled by
//! enrichment", never a failure signal.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Analyzer Outputs
// =============================================================================

/// Coarse repository classification derived from detected frameworks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StructureType {
    Frontend,
    Backend,
    Fullstack,
    #[default]
    Unknown,
}

impl fmt::Display for StructureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Frontend => write!(f, "frontend"),
            Self::Backend => write!(f, "backend"),
            Self::Fullstack => write!(f, "fullstack"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Languages, frameworks, and structure classification.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StackInfo {
    /// Up to 3 language names by descending file count
    pub primary_languages: Vec<String>,
    /// Technology tags inferred from marker files and dependencies
    pub frameworks: Vec<String>,
    pub structure_type: StructureType,
}

/// A top-level folder and its characteristic entry-point files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleRecord {
    pub name: String,
    /// Up to 3 repo-relative paths matching known entry-point filenames
    pub key_files: Vec<String>,
}

/// File counts, printable tree, and module candidates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructureInfo {
    /// Non-directory entries encountered in the tree walk
    pub total_files: usize,
    /// Connector-based tree listing, one line per entry
    pub folder_structure: String,
    pub modules: Vec<ModuleRecord>,
}

/// One declared external dependency from a manifest file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalDependency {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ExternalDependency {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
        }
    }

    pub fn with_version(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: Some(version.into()),
        }
    }
}

/// External manifest entries plus the top-level-folder proxy for
/// internal dependencies. Duplicates across manifests are kept as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependencyInfo {
    pub external_dependencies: Vec<ExternalDependency>,
    pub internal_dependencies: Vec<String>,
}

/// Repository hygiene signals. `true` means the signal is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskInfo {
    pub missing_readme: bool,
    pub missing_ci: bool,
    pub missing_tests: bool,
    pub missing_env_example: bool,
}

impl Default for RiskInfo {
    /// Every risk is present until a marker proves otherwise.
    fn default() -> Self {
        Self {
            missing_readme: true,
            missing_ci: true,
            missing_tests: true,
            missing_env_example: true,
        }
    }
}

/// Discovered API routes grouped by framework style. Feeds prompt
/// context only; not part of the response contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointGroup {
    pub style: String,
    pub routes: Vec<String>,
}

// =============================================================================
// Intermediate Representation
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Overview {
    pub repository_name: String,
    pub total_files: usize,
    pub primary_languages: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_features: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Architecture {
    pub structure_type: StructureType,
    pub folder_structure: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patterns: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    pub key_files: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<String>>,
}

/// Canonical merge record consumed by enrichment and the response
/// assembler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisIr {
    pub overview: Overview,
    pub architecture: Architecture,
    pub modules: Vec<ModuleInfo>,
    pub dependencies: DependencyInfo,
    pub risks: RiskInfo,
}

// =============================================================================
// Recommendations
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub impact: String,
    pub category: String,
}

// =============================================================================
// Response Shape
// =============================================================================

/// Diagram description derived locally from the IR.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visualization {
    pub mermaid: String,
}

/// Run metadata. Additive; the documented response fields above it are
/// the stable contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMeta {
    pub run_id: uuid::Uuid,
    pub analyzed_at: chrono::DateTime<chrono::Utc>,
    pub duration_ms: u64,
    pub warnings: usize,
}

/// The externally documented analysis result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub overview: Overview,
    pub architecture: Architecture,
    pub visualization: Visualization,
    pub modules: Vec<ModuleInfo>,
    pub dependencies: DependencyInfo,
    pub recommendations: Vec<Recommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

// =============================================================================
// Degradation Carrier
// =============================================================================

/// A non-fatal problem encountered during analysis. The offending item
/// is omitted from the result; the pipeline continues.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisWarning {
    /// Pipeline stage that degraded (e.g. "stack", "dependencies")
    pub stage: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub message: String,
}

impl AnalysisWarning {
    pub fn new(stage: &'static str, message: impl Into<String>) -> Self {
        Self {
            stage,
            path: None,
            message: message.into(),
        }
    }

    pub fn with_path(
        stage: &'static str,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            stage,
            path: Some(path.into()),
            message: message.into(),
        }
    }
}

/// An analyzer result that may have silently degraded. Analyzers always
/// produce a value; the warnings record what was skipped along the way.
#[derive(Debug, Clone)]
pub struct Degraded<T> {
    pub value: T,
    pub warnings: Vec<AnalysisWarning>,
}

impl<T> Degraded<T> {
    /// A result with nothing skipped.
    pub fn clean(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    pub fn new(value: T, warnings: Vec<AnalysisWarning>) -> Self {
        Self { value, warnings }
    }

    pub fn is_degraded(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_info_defaults_to_all_missing() {
        let risks = RiskInfo::default();
        assert!(risks.missing_readme);
        assert!(risks.missing_ci);
        assert!(risks.missing_tests);
        assert!(risks.missing_env_example);
    }

    #[test]
    fn test_dependency_without_version_omits_field() {
        let dep = ExternalDependency::new("click");
        let json = serde_json::to_value(&dep).unwrap();
        assert_eq!(json, serde_json::json!({"name": "click"}));
    }

    #[test]
    fn test_dependency_with_version_roundtrip() {
        let dep = ExternalDependency::with_version("flask", "2.0.1");
        let json = serde_json::to_string(&dep).unwrap();
        let parsed: ExternalDependency = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, dep);
    }

    #[test]
    fn test_structure_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(StructureType::Fullstack).unwrap(),
            serde_json::json!("fullstack")
        );
        assert_eq!(StructureType::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_priority_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(Priority::High).unwrap(),
            serde_json::json!("high")
        );
    }

    #[test]
    fn test_degraded_carrier() {
        let mut result = Degraded::clean(StackInfo::default());
        assert!(!result.is_degraded());

        result
            .warnings
            .push(AnalysisWarning::with_path("stack", "src", "permission denied"));
        assert!(result.is_degraded());
    }
}
