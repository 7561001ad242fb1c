//! Risk Detection
//!
//! Four independent presence checks for repository hygiene markers.
//! Every flag starts at "risk present" and is cleared when a marker is
//! found. Purely boolean: no scoring, no severity weighting.

use std::path::Path;
use tracing::debug;

use super::walker::contains_dir_named;
use crate::constants::markers;
use crate::ingest::RepoHandle;
use crate::types::{Degraded, RiskInfo};

/// Detect missing-best-practice signals.
pub fn detect_risks(repo: &RepoHandle) -> Degraded<RiskInfo> {
    let root = repo.root();

    let risks = RiskInfo {
        missing_readme: !has_readme(root),
        missing_ci: !has_ci_workflows(root),
        missing_tests: !contains_dir_named(root, markers::TEST_DIR_NAMES),
        missing_env_example: !has_env_example(root),
    };

    debug!(?risks, "risk detection complete");

    // Absence of a marker is a finding, not a degradation; unreadable
    // directories simply leave the flag set.
    Degraded::clean(risks)
}

fn has_readme(root: &Path) -> bool {
    markers::README_NAMES
        .iter()
        .any(|name| root.join(name).exists())
}

/// True when the CI workflow directory exists and is non-empty.
fn has_ci_workflows(root: &Path) -> bool {
    std::fs::read_dir(root.join(markers::CI_WORKFLOW_DIR))
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}

fn has_env_example(root: &Path) -> bool {
    markers::ENV_EXAMPLE_NAMES
        .iter()
        .any(|name| root.join(name).exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_empty_repository_has_all_risks() {
        let temp = TempDir::new().unwrap();
        let risks = detect_risks(&RepoHandle::new(temp.path())).value;
        assert_eq!(risks, RiskInfo::default());
    }

    #[test]
    fn test_lowercase_readme_clears_only_readme_flag() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("readme.md"));

        let risks = detect_risks(&RepoHandle::new(temp.path())).value;
        assert!(!risks.missing_readme);
        assert!(risks.missing_ci);
        assert!(risks.missing_tests);
        assert!(risks.missing_env_example);
    }

    #[test]
    fn test_uppercase_readme_variants() {
        for name in ["README.md", "README.MD", "Readme.md"] {
            let temp = TempDir::new().unwrap();
            touch(&temp.path().join(name));
            let risks = detect_risks(&RepoHandle::new(temp.path())).value;
            assert!(!risks.missing_readme, "variant {} not recognized", name);
        }
    }

    #[test]
    fn test_ci_requires_nonempty_workflow_dir() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join(".github/workflows")).unwrap();

        let risks = detect_risks(&RepoHandle::new(temp.path())).value;
        assert!(risks.missing_ci);

        touch(&temp.path().join(".github/workflows/ci.yml"));
        let risks = detect_risks(&RepoHandle::new(temp.path())).value;
        assert!(!risks.missing_ci);
    }

    #[test]
    fn test_nested_test_directory_found() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("packages/core/__tests__")).unwrap();

        let risks = detect_risks(&RepoHandle::new(temp.path())).value;
        assert!(!risks.missing_tests);
    }

    #[test]
    fn test_env_example_variants() {
        for name in [".env.example", ".env.sample", ".env.template"] {
            let temp = TempDir::new().unwrap();
            touch(&temp.path().join(name));
            let risks = detect_risks(&RepoHandle::new(temp.path())).value;
            assert!(!risks.missing_env_example, "variant {} not recognized", name);
        }
    }
}
