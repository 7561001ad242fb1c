//! Dependency Extraction
//!
//! Reads the well-known manifest files at the repository root and
//! flattens their declarations into external-dependency records.
//! Each manifest is attempted independently; a parse failure drops that
//! manifest's contribution and nothing else.
//!
//! The pyproject scan is deliberately crude: it is a line heuristic,
//! not a TOML parser, and over- and under-collects by design.

use std::path::Path;
use tracing::debug;

use super::walker::top_level_dirs;
use crate::ingest::RepoHandle;
use crate::types::{AnalysisWarning, Degraded, DependencyInfo, ExternalDependency};

const STAGE: &str = "dependencies";

/// Extract external and internal dependencies.
pub fn extract_dependencies(repo: &RepoHandle) -> Degraded<DependencyInfo> {
    let mut warnings = Vec::new();
    let mut external = Vec::new();
    let root = repo.root();

    if let Some(deps) = read_package_json(root, &mut warnings) {
        external.extend(deps);
    }
    if let Some(deps) = read_requirements_txt(root, &mut warnings) {
        external.extend(deps);
    }
    if let Some(deps) = read_pyproject_toml(root, &mut warnings) {
        external.extend(deps);
    }

    // Top-level folders as a coarse proxy; no import resolution.
    let internal = top_level_dirs(root, &[], STAGE);
    warnings.extend(internal.warnings);

    debug!(
        external = external.len(),
        internal = internal.value.len(),
        "dependency extraction complete"
    );

    Degraded::new(
        DependencyInfo {
            external_dependencies: external,
            internal_dependencies: internal.value,
        },
        warnings,
    )
}

// =============================================================================
// Manifest Readers
// =============================================================================

/// Read a manifest file, recording a warning when it exists but cannot
/// be read. A missing manifest is not a warning.
fn read_manifest(
    root: &Path,
    name: &'static str,
    warnings: &mut Vec<AnalysisWarning>,
) -> Option<String> {
    let path = root.join(name);
    if !path.exists() {
        return None;
    }

    match std::fs::read_to_string(&path) {
        Ok(text) => Some(text),
        Err(e) => {
            warnings.push(AnalysisWarning::with_path(STAGE, name, e.to_string()));
            None
        }
    }
}

/// package.json: `dependencies` and `devDependencies` maps, merged
/// without deduplication.
fn read_package_json(
    root: &Path,
    warnings: &mut Vec<AnalysisWarning>,
) -> Option<Vec<ExternalDependency>> {
    let text = read_manifest(root, "package.json", warnings)?;

    let parsed: serde_json::Value = match serde_json::from_str(&text) {
        Ok(v) => v,
        Err(e) => {
            warnings.push(AnalysisWarning::with_path(
                STAGE,
                "package.json",
                e.to_string(),
            ));
            return None;
        }
    };

    let mut deps = Vec::new();
    for group in ["dependencies", "devDependencies"] {
        if let Some(map) = parsed.get(group).and_then(|v| v.as_object()) {
            for (name, version) in map {
                match version.as_str() {
                    Some(version) => deps.push(ExternalDependency::with_version(name, version)),
                    None => deps.push(ExternalDependency::new(name)),
                }
            }
        }
    }

    Some(deps)
}

/// requirements.txt: one dependency per non-empty, non-comment line;
/// `==` splits name and pinned version.
fn read_requirements_txt(
    root: &Path,
    warnings: &mut Vec<AnalysisWarning>,
) -> Option<Vec<ExternalDependency>> {
    let text = read_manifest(root, "requirements.txt", warnings)?;

    let deps = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| match line.split_once("==") {
            Some((name, version)) => ExternalDependency::with_version(name, version),
            None => ExternalDependency::new(line),
        })
        .collect();

    Some(deps)
}

/// pyproject.toml: best-effort scan for `identifier = value` lines
/// outside bracketed section headers; name-only candidates.
fn read_pyproject_toml(
    root: &Path,
    warnings: &mut Vec<AnalysisWarning>,
) -> Option<Vec<ExternalDependency>> {
    let text = read_manifest(root, "pyproject.toml", warnings)?;

    let deps = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with("dependencies") && !line.starts_with('['))
        .filter_map(|line| {
            let (name, _) = line.split_once('=')?;
            let name = name.trim();
            is_identifier(name).then(|| ExternalDependency::new(name))
        })
        .collect();

    Some(deps)
}

/// Python-style identifier check: alphanumeric/underscore, not starting
/// with a digit.
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn handle_with(files: &[(&str, &str)]) -> (TempDir, RepoHandle) {
        let temp = TempDir::new().unwrap();
        for (name, content) in files {
            std::fs::write(temp.path().join(name), content).unwrap();
        }
        let handle = RepoHandle::new(temp.path());
        (temp, handle)
    }

    #[test]
    fn test_package_json_merges_dev_dependencies() {
        let (_temp, handle) = handle_with(&[(
            "package.json",
            r#"{"dependencies": {"left-pad": "1.0.0"}, "devDependencies": {"eslint": "8.0.0"}}"#,
        )]);

        let deps = extract_dependencies(&handle).value.external_dependencies;
        assert_eq!(deps.len(), 2);
        assert!(deps.contains(&ExternalDependency::with_version("left-pad", "1.0.0")));
        assert!(deps.contains(&ExternalDependency::with_version("eslint", "8.0.0")));
    }

    #[test]
    fn test_package_json_duplicate_names_kept() {
        let (_temp, handle) = handle_with(&[(
            "package.json",
            r#"{"dependencies": {"lodash": "4.0.0"}, "devDependencies": {"lodash": "4.17.0"}}"#,
        )]);

        let deps = extract_dependencies(&handle).value.external_dependencies;
        assert_eq!(deps.len(), 2);
    }

    #[test]
    fn test_requirements_pinned_and_unpinned() {
        let (_temp, handle) = handle_with(&[(
            "requirements.txt",
            "flask==2.0.1\n\n# a comment\nclick\n",
        )]);

        let deps = extract_dependencies(&handle).value.external_dependencies;
        assert_eq!(
            deps,
            vec![
                ExternalDependency::with_version("flask", "2.0.1"),
                ExternalDependency::new("click"),
            ]
        );
    }

    #[test]
    fn test_pyproject_line_heuristic() {
        let (_temp, handle) = handle_with(&[(
            "pyproject.toml",
            "[project]\nname = \"demo\"\nversion = \"0.1\"\ndependencies = [\n\"requests\",\n]\nrequires-python = \">=3.9\"\n",
        )]);

        let deps = extract_dependencies(&handle).value.external_dependencies;
        let names: Vec<&str> = deps.iter().map(|d| d.name.as_str()).collect();
        // Section headers, the dependencies line, and hyphenated keys are
        // skipped; plain identifier assignments are collected.
        assert_eq!(names, vec!["name", "version"]);
        assert!(deps.iter().all(|d| d.version.is_none()));
    }

    #[test]
    fn test_malformed_package_json_degrades_partially() {
        let (_temp, handle) = handle_with(&[
            ("package.json", "{broken"),
            ("requirements.txt", "flask==2.0.1\n"),
        ]);

        let result = extract_dependencies(&handle);
        assert!(result.is_degraded());
        // The broken manifest is omitted; the good one still contributes.
        assert_eq!(
            result.value.external_dependencies,
            vec![ExternalDependency::with_version("flask", "2.0.1")]
        );
    }

    #[test]
    fn test_internal_dependencies_are_top_level_dirs() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("api")).unwrap();
        std::fs::create_dir(temp.path().join("web")).unwrap();
        std::fs::create_dir(temp.path().join(".hidden")).unwrap();
        std::fs::write(temp.path().join("file.txt"), "").unwrap();

        let info = extract_dependencies(&RepoHandle::new(temp.path())).value;
        assert_eq!(info.internal_dependencies, vec!["api", "web"]);
    }

    #[test]
    fn test_no_manifests_yields_empty_clean_result() {
        let temp = TempDir::new().unwrap();
        let result = extract_dependencies(&RepoHandle::new(temp.path()));
        assert!(result.value.external_dependencies.is_empty());
        assert!(!result.is_degraded());
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("name"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("name2"));
        assert!(!is_identifier("requires-python"));
        assert!(!is_identifier("2fast"));
        assert!(!is_identifier(""));
    }
}
