//! Structure Parsing
//!
//! Builds the printable folder tree, counts files, and lists top-level
//! modules annotated with their entry-point files. Entries are sorted
//! at every level, so the tree string and file count are deterministic
//! for a fixed filesystem state.

use std::path::Path;
use tracing::debug;

use super::walker::top_level_dirs;
use crate::constants::analysis::{IGNORED_DIRS, KEY_FILENAMES, MAX_KEY_FILES};
use crate::ingest::RepoHandle;
use crate::types::{AnalysisWarning, Degraded, ModuleRecord, StructureInfo};

const STAGE: &str = "structure";

/// Tree connectors
const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE_PREFIX: &str = "│   ";
const BLANK_PREFIX: &str = "    ";

/// Parse the repository's directory structure.
pub fn parse_structure(repo: &RepoHandle) -> Degraded<StructureInfo> {
    let mut warnings = Vec::new();

    let root = repo.root();
    let mut lines = vec![
        root.file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| root.display().to_string()),
    ];
    let mut total_files = 0;

    render_tree(root, "", &mut lines, &mut total_files, &mut warnings);

    let modules = collect_modules(root, &mut warnings);

    debug!(total_files, modules = modules.len(), "structure parse complete");

    Degraded::new(
        StructureInfo {
            total_files,
            folder_structure: lines.join("\n"),
            modules,
        },
        warnings,
    )
}

// =============================================================================
// Tree Rendering
// =============================================================================

/// Sorted directory entries with the ignored set removed. Read failures
/// degrade to an empty list plus a warning.
fn visible_entries(dir: &Path, warnings: &mut Vec<AnalysisWarning>) -> Vec<std::path::PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warnings.push(AnalysisWarning::with_path(
                STAGE,
                dir.display().to_string(),
                e.to_string(),
            ));
            return Vec::new();
        }
    };

    let mut paths: Vec<_> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_none_or(|name| !IGNORED_DIRS.contains(&name))
        })
        .collect();
    paths.sort();
    paths
}

fn render_tree(
    dir: &Path,
    prefix: &str,
    lines: &mut Vec<String>,
    total_files: &mut usize,
    warnings: &mut Vec<AnalysisWarning>,
) {
    let entries = visible_entries(dir, warnings);
    let last_index = entries.len().saturating_sub(1);

    for (idx, path) in entries.iter().enumerate() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let is_last = idx == last_index;

        let connector = if is_last { LAST_BRANCH } else { BRANCH };
        lines.push(format!("{}{}{}", prefix, connector, name));

        if path.is_dir() {
            let child_prefix = format!(
                "{}{}",
                prefix,
                if is_last { BLANK_PREFIX } else { PIPE_PREFIX }
            );
            render_tree(path, &child_prefix, lines, total_files, warnings);
        } else {
            *total_files += 1;
        }
    }
}

// =============================================================================
// Module Inference
// =============================================================================

/// Each top-level non-hidden, non-ignored directory becomes a module,
/// annotated with up to 3 entry-point files found by a bounded sub-walk.
fn collect_modules(root: &Path, warnings: &mut Vec<AnalysisWarning>) -> Vec<ModuleRecord> {
    let top = top_level_dirs(root, IGNORED_DIRS, STAGE);
    warnings.extend(top.warnings);

    top.value
        .into_iter()
        .map(|name| {
            let mut key_files = Vec::new();
            find_key_files(&root.join(&name), root, &mut key_files, warnings);
            ModuleRecord { name, key_files }
        })
        .collect()
}

/// Directory-then-file ordered search, stopping at the first
/// `MAX_KEY_FILES` matches.
fn find_key_files(
    dir: &Path,
    root: &Path,
    found: &mut Vec<String>,
    warnings: &mut Vec<AnalysisWarning>,
) {
    if found.len() >= MAX_KEY_FILES {
        return;
    }

    let entries = visible_entries(dir, warnings);

    for path in entries.iter().filter(|p| !p.is_dir()) {
        if found.len() >= MAX_KEY_FILES {
            return;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str())
            && KEY_FILENAMES.contains(&name)
            && let Ok(relative) = path.strip_prefix(root)
        {
            found.push(relative.to_string_lossy().to_string());
        }
    }

    for path in entries.iter().filter(|p| p.is_dir()) {
        if found.len() >= MAX_KEY_FILES {
            return;
        }
        find_key_files(path, root, found, warnings);
    }
}
