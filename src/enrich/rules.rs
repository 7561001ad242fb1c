//! Rule-Based Enrichment
//!
//! Three independent pure transforms over the IR that fill the fields
//! deterministic analysis left unset. These are the fallback for (and
//! the default in place of) LLM enrichment: same inputs, same outputs,
//! every time.

use crate::types::{AnalysisIr, Architecture, Overview, Priority, Recommendation, StructureType};

// =============================================================================
// Overview
// =============================================================================

/// Fill `description` and `key_features` from templated conditions.
///
/// No condition matched means the field stays unset, not empty.
pub fn generate_overview(ir: &AnalysisIr) -> Overview {
    let mut sentences = Vec::new();

    if !ir.overview.primary_languages.is_empty() {
        sentences.push(format!(
            "This repository is primarily written in {}.",
            ir.overview.primary_languages.join(", ")
        ));
    }

    if ir.architecture.structure_type != StructureType::Unknown {
        sentences.push(format!(
            "It follows a {} architecture.",
            ir.architecture.structure_type
        ));
    }

    if !ir.modules.is_empty() {
        sentences.push(format!(
            "The codebase is organized into {} main modules.",
            ir.modules.len()
        ));
    }

    let description = if sentences.is_empty() {
        None
    } else {
        Some(sentences.join(" "))
    };

    let mut key_features = Vec::new();
    if !ir.dependencies.external_dependencies.is_empty() {
        key_features.push("Uses modern third-party dependencies".to_string());
    }
    if ir.architecture.structure_type == StructureType::Fullstack {
        key_features
            .push("Full-stack application with frontend and backend components".to_string());
    }
    if !ir.architecture.folder_structure.is_empty() {
        key_features.push("Clearly defined project structure".to_string());
    }

    Overview {
        description,
        key_features: (!key_features.is_empty()).then_some(key_features),
        ..ir.overview.clone()
    }
}

// =============================================================================
// Architecture Patterns
// =============================================================================

/// Copy the architecture record and append heuristic pattern tags.
pub fn generate_architecture(ir: &AnalysisIr) -> Architecture {
    let mut patterns = Vec::new();

    if ir.architecture.structure_type == StructureType::Fullstack {
        patterns.push("Client-Server Architecture".to_string());
    }
    if ir.modules.len() > 3 {
        patterns.push("Modular Architecture".to_string());
    }
    if !ir.dependencies.external_dependencies.is_empty() {
        patterns.push("Dependency-based Composition".to_string());
    }

    Architecture {
        patterns: (!patterns.is_empty()).then_some(patterns),
        ..ir.architecture.clone()
    }
}

// =============================================================================
// Recommendations
// =============================================================================

/// Map each present risk flag to one fixed recommendation.
///
/// Total and deterministic: the same four booleans always yield the
/// same ordered list (readme, CI, tests, env-example).
pub fn generate_recommendations(ir: &AnalysisIr) -> Vec<Recommendation> {
    let risks = &ir.risks;
    let mut recommendations = Vec::new();

    if risks.missing_readme {
        recommendations.push(Recommendation {
            title: "Add a README file".to_string(),
            description: "The repository does not contain a README. Adding one will help new \
                          contributors understand the purpose, setup steps, and usage of the \
                          project."
                .to_string(),
            priority: Priority::High,
            impact: "Improves onboarding and contributor experience".to_string(),
            category: "documentation".to_string(),
        });
    }

    if risks.missing_ci {
        recommendations.push(Recommendation {
            title: "Set up Continuous Integration (CI)".to_string(),
            description: "No CI workflow was detected. Adding a CI pipeline can automatically \
                          run tests and checks on every pull request to prevent regressions."
                .to_string(),
            priority: Priority::High,
            impact: "Improves code reliability and development velocity".to_string(),
            category: "automation".to_string(),
        });
    }

    if risks.missing_tests {
        recommendations.push(Recommendation {
            title: "Introduce automated tests".to_string(),
            description: "The repository does not appear to include automated tests. Adding \
                          unit or integration tests will help ensure correctness as the \
                          codebase evolves."
                .to_string(),
            priority: Priority::Medium,
            impact: "Reduces bugs and increases confidence in changes".to_string(),
            category: "testing".to_string(),
        });
    }

    if risks.missing_env_example {
        recommendations.push(Recommendation {
            title: "Provide an environment variable example file".to_string(),
            description: "No example environment configuration file was found. Including a \
                          `.env.example` file helps contributors configure the project \
                          correctly."
                .to_string(),
            priority: Priority::Low,
            impact: "Simplifies local setup and reduces configuration errors".to_string(),
            category: "configuration".to_string(),
        });
    }

    recommendations
}
