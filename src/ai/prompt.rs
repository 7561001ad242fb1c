//! Prompt Construction
//!
//! Builds the three enrichment prompts from IR fields. Folder-structure
//! and dependency excerpts are size-bounded so a large repository never
//! produces an oversized request.

use serde_json::{Value, json};

use crate::constants::prompt::{MAX_PROMPT_DEPENDENCIES, MAX_PROMPT_MODULES, MAX_TREE_CHARS};
use crate::types::{AnalysisIr, EndpointGroup};

/// Prompt plus the JSON shape the response must match.
pub struct EnrichmentPrompt {
    pub prompt: String,
    pub schema: Value,
}

/// Overview enrichment: description + key features.
pub fn overview_prompt(ir: &AnalysisIr, endpoints: &[EndpointGroup]) -> EnrichmentPrompt {
    let mut prompt = String::from(
        "Analyze this repository and produce a concise description and its key features.\n\n",
    );
    push_context(&mut prompt, ir, endpoints);

    EnrichmentPrompt {
        prompt,
        schema: json!({
            "description": "2-3 sentence overview of what the project does",
            "key_features": ["short feature phrase"]
        }),
    }
}

/// Architecture enrichment: pattern tags.
pub fn architecture_prompt(ir: &AnalysisIr, endpoints: &[EndpointGroup]) -> EnrichmentPrompt {
    let mut prompt = String::from(
        "Identify the architectural patterns evident in this repository. Name only patterns \
         supported by the structure below.\n\n",
    );
    push_context(&mut prompt, ir, endpoints);

    EnrichmentPrompt {
        prompt,
        schema: json!({
            "patterns": ["architectural pattern name"]
        }),
    }
}

/// Recommendation enrichment: prioritized improvements.
pub fn recommendations_prompt(ir: &AnalysisIr, endpoints: &[EndpointGroup]) -> EnrichmentPrompt {
    let mut prompt = String::from(
        "Recommend concrete improvements for this repository, focusing on maintainability and \
         missing best practices.\n\n",
    );
    push_context(&mut prompt, ir, endpoints);

    prompt.push_str("\nDetected hygiene gaps:\n");
    for (flag, label) in [
        (ir.risks.missing_readme, "no README"),
        (ir.risks.missing_ci, "no CI workflow"),
        (ir.risks.missing_tests, "no test directory"),
        (ir.risks.missing_env_example, "no .env example file"),
    ] {
        if flag {
            prompt.push_str("- ");
            prompt.push_str(label);
            prompt.push('\n');
        }
    }

    EnrichmentPrompt {
        prompt,
        schema: json!({
            "recommendations": [{
                "title": "short imperative title",
                "description": "what to do and why",
                "priority": "high | medium | low",
                "impact": "expected benefit",
                "category": "documentation | automation | testing | configuration | other"
            }]
        }),
    }
}

// =============================================================================
// Shared Context Section
// =============================================================================

fn push_context(prompt: &mut String, ir: &AnalysisIr, endpoints: &[EndpointGroup]) {
    prompt.push_str(&format!(
        "Repository: {}\nTotal files: {}\nPrimary languages: {}\nStructure type: {}\n",
        ir.overview.repository_name,
        ir.overview.total_files,
        join_or_none(&ir.overview.primary_languages),
        ir.architecture.structure_type,
    ));

    if !ir.modules.is_empty() {
        let names: Vec<&str> = ir
            .modules
            .iter()
            .take(MAX_PROMPT_MODULES)
            .map(|m| m.name.as_str())
            .collect();
        prompt.push_str(&format!("Modules: {}\n", names.join(", ")));
    }

    let deps = &ir.dependencies.external_dependencies;
    if !deps.is_empty() {
        let listed: Vec<&str> = deps
            .iter()
            .take(MAX_PROMPT_DEPENDENCIES)
            .map(|d| d.name.as_str())
            .collect();
        let suffix = if deps.len() > MAX_PROMPT_DEPENDENCIES {
            format!(" (+{} more)", deps.len() - MAX_PROMPT_DEPENDENCIES)
        } else {
            String::new()
        };
        prompt.push_str(&format!("Dependencies: {}{}\n", listed.join(", "), suffix));
    }

    for group in endpoints {
        prompt.push_str(&format!(
            "API endpoints ({}): {}\n",
            group.style,
            group.routes.join(", ")
        ));
    }

    prompt.push_str(&format!(
        "\nFolder structure:\n{}\n",
        bounded_tree(&ir.architecture.folder_structure)
    ));
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "unknown".to_string()
    } else {
        items.join(", ")
    }
}

/// Truncate the tree at a char boundary, marking the cut.
fn bounded_tree(tree: &str) -> String {
    if tree.chars().count() <= MAX_TREE_CHARS {
        return tree.to_string();
    }
    let truncated: String = tree.chars().take(MAX_TREE_CHARS).collect();
    format!("{}\n… (truncated)", truncated)
}
