//! Tree Walk Helpers
//!
//! Shared filesystem traversal for the analyzers. Walks never fail: any
//! unreadable entry is recorded as a warning and skipped, and a fixed
//! exclusion set is applied as glob patterns against the relative path.

use glob::Pattern;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use crate::types::{AnalysisWarning, Degraded};

/// Recursive file walker with a fixed directory exclusion set.
pub struct TreeWalker {
    root: PathBuf,
    exclude: Vec<Pattern>,
    stage: &'static str,
}

impl TreeWalker {
    pub fn new<P: AsRef<Path>>(root: P, stage: &'static str) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            exclude: Vec::new(),
            stage,
        }
    }

    /// Exclude every path under any directory with one of these names.
    pub fn skipping_dirs(mut self, dirs: &[&str]) -> Self {
        self.exclude = dirs
            .iter()
            .filter_map(|d| Pattern::new(&format!("**/{}/**", d)).ok())
            .collect();
        self
    }

    /// Collect every non-directory entry under the root.
    ///
    /// Deterministic ordering is not guaranteed; callers that need it
    /// sort the result or walk manually.
    pub fn files(&self) -> Degraded<Vec<PathBuf>> {
        let mut files = Vec::new();
        let mut warnings = Vec::new();

        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .hidden(false)
            .follow_links(false)
            .build();

        for entry in walker {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    if entry.file_type().is_some_and(|t| t.is_file())
                        && !self.is_excluded(path)
                    {
                        files.push(path.to_path_buf());
                    }
                }
                Err(e) => {
                    warnings.push(AnalysisWarning::new(self.stage, e.to_string()));
                }
            }
        }

        Degraded::new(files, warnings)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let Ok(relative) = path.strip_prefix(&self.root) else {
            return false;
        };
        let rel_str = relative.to_string_lossy();

        self.exclude.iter().any(|p| p.matches(&rel_str))
    }
}

/// List top-level directory names, lexicographically sorted.
///
/// Hidden directories are always skipped; `exclude` removes further
/// names (the fixed noise set). Read failures degrade to an empty list
/// plus a warning.
pub fn top_level_dirs(
    root: &Path,
    exclude: &[&str],
    stage: &'static str,
) -> Degraded<Vec<String>> {
    let mut warnings = Vec::new();

    let entries = match std::fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) => {
            warnings.push(AnalysisWarning::with_path(
                stage,
                root.display().to_string(),
                e.to_string(),
            ));
            return Degraded::new(Vec::new(), warnings);
        }
    };

    let mut dirs: Vec<String> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|name| !name.starts_with('.') && !exclude.contains(&name.as_str()))
        .collect();
    dirs.sort();

    Degraded::new(dirs, warnings)
}

/// Depth-first search for a directory whose lower-cased name is in
/// `names`. Short-circuits on the first match; unreadable directories
/// are skipped silently (the caller treats absence as the signal).
pub fn contains_dir_named(root: &Path, names: &[&str]) -> bool {
    let Ok(entries) = std::fs::read_dir(root) else {
        return false;
    };

    let mut subdirs = Vec::new();
    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str())
            && names.contains(&name.to_lowercase().as_str())
        {
            return true;
        }
        subdirs.push(path);
    }

    subdirs.iter().any(|dir| contains_dir_named(dir, names))
}
