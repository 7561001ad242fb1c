//! Diagram Generation
//!
//! Deterministic Mermaid rendering from the IR: one root node, one
//! child per module, one child per internal-dependency folder. Fully
//! local, no external calls.

use crate::types::{AnalysisIr, Visualization};

/// Build the Mermaid diagram description for an IR.
pub fn build_visualization(ir: &AnalysisIr) -> Visualization {
    let mut lines = vec!["graph TD".to_string(), "Repo[Repository]".to_string()];

    for module in &ir.modules {
        lines.push(format!(
            "Repo --> {}[{}]",
            node_id(&module.name),
            module.name
        ));
    }

    for folder in &ir.dependencies.internal_dependencies {
        lines.push(format!("Repo --> {}[{}/]", node_id(folder), folder));
    }

    Visualization {
        mermaid: lines.join("\n"),
    }
}

/// Mermaid node identifiers cannot contain spaces or hyphens; replace
/// both with underscores.
fn node_id(name: &str) -> String {
    name.replace([' ', '-'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        Architecture, DependencyInfo, ModuleInfo, Overview, RiskInfo, StructureType,
    };

    fn ir_with(modules: &[&str], internal: &[&str]) -> AnalysisIr {
        AnalysisIr {
            overview: Overview {
                repository_name: "demo".to_string(),
                total_files: 0,
                primary_languages: Vec::new(),
                description: None,
                key_features: None,
            },
            architecture: Architecture {
                structure_type: StructureType::Unknown,
                folder_structure: String::new(),
                patterns: None,
            },
            modules: modules
                .iter()
                .map(|name| ModuleInfo {
                    name: name.to_string(),
                    purpose: None,
                    key_files: Vec::new(),
                    dependencies: None,
                })
                .collect(),
            dependencies: DependencyInfo {
                external_dependencies: Vec::new(),
                internal_dependencies: internal.iter().map(|s| s.to_string()).collect(),
            },
            risks: RiskInfo::default(),
        }
    }

    #[test]
    fn test_empty_ir_yields_root_only() {
        let viz = build_visualization(&ir_with(&[], &[]));
        assert_eq!(viz.mermaid, "graph TD\nRepo[Repository]");
    }

    #[test]
    fn test_modules_and_internal_folders_become_nodes() {
        let viz = build_visualization(&ir_with(&["api"], &["web"]));
        let lines: Vec<&str> = viz.mermaid.lines().collect();
        assert_eq!(lines[2], "Repo --> api[api]");
        assert_eq!(lines[3], "Repo --> web[web/]");
    }

    #[test]
    fn test_node_ids_neutralize_separators() {
        let viz = build_visualization(&ir_with(&["my-module", "my docs"], &[]));
        assert!(viz.mermaid.contains("Repo --> my_module[my-module]"));
        assert!(viz.mermaid.contains("Repo --> my_docs[my docs]"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let ir = ir_with(&["a", "b"], &["c"]);
        assert_eq!(build_visualization(&ir).mermaid, build_visualization(&ir).mermaid);
    }
}
