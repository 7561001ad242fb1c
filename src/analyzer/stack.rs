//! Stack Detection
//!
//! Infers primary languages from file-extension counts, frameworks from
//! well-known marker files, and a coarse structure classification from
//! the detected framework set. Best-effort throughout: a repository
//! that cannot be read yields empty results, never an error.

use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use super::walker::TreeWalker;
use crate::constants::analysis::{EXTENSION_LANGUAGES, MAX_PRIMARY_LANGUAGES};
use crate::ingest::RepoHandle;
use crate::types::{AnalysisWarning, Degraded, StackInfo, StructureType};

const STAGE: &str = "stack";

/// Detect languages, frameworks, and structure type.
pub fn detect_stack(repo: &RepoHandle) -> Degraded<StackInfo> {
    let mut warnings = Vec::new();

    let primary_languages = count_languages(repo.root(), &mut warnings);
    let frameworks = detect_frameworks(repo.root(), &mut warnings);
    let structure_type = classify_structure(&frameworks);

    debug!(
        languages = ?primary_languages,
        frameworks = ?frameworks,
        structure = %structure_type,
        "stack detection complete"
    );

    Degraded::new(
        StackInfo {
            primary_languages,
            frameworks,
            structure_type,
        },
        warnings,
    )
}

// =============================================================================
// Language Counting
// =============================================================================

/// Map an extension to its language label via the fixed table.
fn language_for_extension(ext: &str) -> Option<&'static str> {
    EXTENSION_LANGUAGES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, lang)| *lang)
}

/// Count files per language and keep the top entries.
///
/// Ties are broken by the table's declaration order: candidates are
/// seeded in table order and the descending sort is stable.
fn count_languages(root: &Path, warnings: &mut Vec<AnalysisWarning>) -> Vec<String> {
    let walk = TreeWalker::new(root, STAGE).skipping_dirs(&[".git"]).files();
    warnings.extend(walk.warnings);

    let mut counts: HashMap<&'static str, usize> = HashMap::new();
    for path in &walk.value {
        if let Some(ext) = path.extension().and_then(|e| e.to_str())
            && let Some(lang) = language_for_extension(ext)
        {
            *counts.entry(lang).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(&'static str, usize)> = Vec::new();
    for (_, lang) in EXTENSION_LANGUAGES {
        if !ranked.iter().any(|(l, _)| l == lang)
            && let Some(&count) = counts.get(lang)
        {
            ranked.push((*lang, count));
        }
    }
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .take(MAX_PRIMARY_LANGUAGES)
        .map(|(lang, _)| lang.to_string())
        .collect()
}

// =============================================================================
// Framework Markers
// =============================================================================

/// Presence checks for configuration/build markers at fixed paths, plus
/// dependency-name tags from package.json.
fn detect_frameworks(root: &Path, warnings: &mut Vec<AnalysisWarning>) -> Vec<String> {
    let mut frameworks = Vec::new();
    let at_root = |name: &str| root.join(name).exists();

    if at_root("package.json") {
        frameworks.push("Node.js".to_string());

        if at_root("next.config.js") || at_root("next.config.mjs") {
            frameworks.push("Next.js".to_string());
        }
        if at_root("vite.config.js") {
            frameworks.push("Vite".to_string());
        }

        frameworks.extend(dependency_tags(root, warnings));
    }

    if at_root("requirements.txt") || at_root("pyproject.toml") {
        frameworks.push("Python".to_string());

        if at_root("app.py") {
            frameworks.push("Flask".to_string());
        }
        if at_root("main.py") {
            frameworks.push("FastAPI".to_string());
        }
        if at_root("manage.py") {
            frameworks.push("Django".to_string());
        }
    }

    if at_root("Dockerfile") {
        frameworks.push("Docker".to_string());
    }

    frameworks
}

/// Well-known frontend/backend libraries recognized among package.json
/// dependency names.
const DEPENDENCY_TAGS: &[(&str, &str)] = &[
    ("react", "React"),
    ("vue", "Vue"),
    ("angular", "Angular"),
    ("express", "Express"),
    ("fastify", "Fastify"),
];

fn dependency_tags(root: &Path, warnings: &mut Vec<AnalysisWarning>) -> Vec<String> {
    let path = root.join("package.json");

    let parsed: Option<serde_json::Value> = std::fs::read_to_string(&path)
        .map_err(|e| AnalysisWarning::with_path(STAGE, "package.json", e.to_string()))
        .and_then(|text| {
            serde_json::from_str(&text)
                .map_err(|e| AnalysisWarning::with_path(STAGE, "package.json", e.to_string()))
        })
        .map_err(|w| warnings.push(w))
        .ok();

    let Some(parsed) = parsed else {
        return Vec::new();
    };

    let mut names: Vec<&str> = Vec::new();
    for group in ["dependencies", "devDependencies"] {
        if let Some(map) = parsed.get(group).and_then(|v| v.as_object()) {
            names.extend(map.keys().map(|k| k.as_str()));
        }
    }

    DEPENDENCY_TAGS
        .iter()
        .filter(|(dep, _)| names.contains(dep))
        .map(|(_, tag)| tag.to_string())
        .collect()
}

// =============================================================================
// Structure Classification
// =============================================================================

/// Precedence: fullstack > frontend > backend > unknown.
fn classify_structure(frameworks: &[String]) -> StructureType {
    let has = |name: &str| frameworks.iter().any(|f| f == name);

    if has("Next.js") && has("Python") {
        StructureType::Fullstack
    } else if has("Next.js") {
        StructureType::Frontend
    } else if has("Python") {
        StructureType::Backend
    } else {
        StructureType::Unknown
    }
}
