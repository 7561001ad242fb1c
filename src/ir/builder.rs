//! IR Builder
//!
//! Pure merge of the four analyzer outputs into the canonical
//! intermediate representation. Always succeeds: upstream components
//! have already normalized their failures into empty or default values.

use crate::ingest::RepoLocator;
use crate::types::{
    AnalysisIr, Architecture, DependencyInfo, ModuleInfo, Overview, RiskInfo, StackInfo,
    StructureInfo,
};

/// Merge analyzer outputs into the canonical IR.
///
/// `description`, `key_features`, `patterns`, and each module's
/// `purpose`/`dependencies` are left unset for the enrichment stage.
pub fn build_ir(
    locator: &RepoLocator,
    stack: StackInfo,
    structure: StructureInfo,
    dependencies: DependencyInfo,
    risks: RiskInfo,
) -> AnalysisIr {
    let overview = Overview {
        repository_name: locator.repository_name(),
        total_files: structure.total_files,
        primary_languages: stack.primary_languages,
        description: None,
        key_features: None,
    };

    let architecture = Architecture {
        structure_type: stack.structure_type,
        folder_structure: structure.folder_structure,
        patterns: None,
    };

    let modules = structure
        .modules
        .into_iter()
        .map(|m| ModuleInfo {
            name: m.name,
            purpose: None,
            key_files: m.key_files,
            dependencies: None,
        })
        .collect();

    AnalysisIr {
        overview,
        architecture,
        modules,
        dependencies,
        risks,
    }
}
