//! Shallow Repository Retrieval
//!
//! Obtains a local copy of the target repository. Remote locators are
//! fetched with a shallow, no-history git clone into the run workspace;
//! local locators are used as-is.

use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info};

use super::locator::RepoLocator;
use crate::config::RetrievalConfig;
use crate::types::{RepoLensError, Result, RetrievalError};

/// Read-only root of a fetched or supplied repository copy.
///
/// The backing directory is owned by the run's [`super::Workspace`] (or
/// by the caller, for local locators); the handle never deletes it.
#[derive(Debug, Clone)]
pub struct RepoHandle {
    root: PathBuf,
}

impl RepoHandle {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Retrieve the repository named by `locator` into `workspace`.
///
/// Local locators bypass fetching entirely. Any git failure maps to
/// [`RetrievalError::CloneFailed`]; a clone that leaves no content
/// behind maps to [`RetrievalError::EmptyClone`].
pub async fn retrieve(
    locator: &RepoLocator,
    config: &RetrievalConfig,
    workspace: &Path,
) -> Result<RepoHandle> {
    match locator {
        RepoLocator::Local(path) => {
            info!(path = %path.display(), "analyzing local repository copy");
            Ok(RepoHandle::new(path.clone()))
        }
        RepoLocator::Remote { url, .. } => {
            let clone_path = workspace.join(locator.repository_name());

            info!(url = %url, "shallow cloning repository");

            let output = tokio::time::timeout(
                Duration::from_secs(config.clone_timeout_secs),
                Command::new(&config.git_binary)
                    .arg("clone")
                    .arg("--depth=1")
                    .arg("--no-tags")
                    .arg(url.as_str())
                    .arg(&clone_path)
                    .output(),
            )
            .await
            .map_err(|_| {
                RepoLensError::from(RetrievalError::CloneFailed(format!(
                    "clone timed out after {}s",
                    config.clone_timeout_secs
                )))
            })??;

            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                return Err(RetrievalError::CloneFailed(summarize_git_error(&stderr)).into());
            }

            if !has_content(&clone_path) {
                return Err(RetrievalError::EmptyClone.into());
            }

            debug!(path = %clone_path.display(), "clone complete");
            Ok(RepoHandle::new(clone_path))
        }
    }
}

/// True when the clone directory exists and contains at least one entry.
fn has_content(path: &Path) -> bool {
    std::fs::read_dir(path)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}

/// Keep the last meaningful git stderr line; full output can contain
/// credentials prompts and progress noise.
fn summarize_git_error(stderr: &str) -> String {
    stderr
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("git exited with a non-zero status")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_local_locator_bypasses_fetch() {
        let temp = tempfile::TempDir::new().unwrap();
        let locator = RepoLocator::Local(temp.path().to_path_buf());
        let config = RetrievalConfig::default();
        let workspace = tempfile::TempDir::new().unwrap();

        let handle = retrieve(&locator, &config, workspace.path()).await.unwrap();
        assert_eq!(handle.root(), temp.path());

        // Nothing landed in the workspace
        assert_eq!(std::fs::read_dir(workspace.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_missing_git_binary_is_retrieval_error() {
        let locator = RepoLocator::parse("https://github.com/acme/widgets").unwrap();
        let config = RetrievalConfig {
            git_binary: "definitely-not-a-real-git".to_string(),
            ..RetrievalConfig::default()
        };
        let workspace = tempfile::TempDir::new().unwrap();

        let err = retrieve(&locator, &config, workspace.path())
            .await
            .unwrap_err();
        assert!(err.is_client_error() || matches!(err, RepoLensError::Io(_)));
    }

    #[test]
    fn test_summarize_git_error_takes_last_line() {
        let stderr = "Cloning into 'x'...\nfatal: repository not found\n";
        assert_eq!(summarize_git_error(stderr), "fatal: repository not found");
    }

    #[test]
    fn test_has_content() {
        let temp = tempfile::TempDir::new().unwrap();
        assert!(!has_content(temp.path()));

        std::fs::write(temp.path().join("f"), b"x").unwrap();
        assert!(has_content(temp.path()));

        assert!(!has_content(Path::new("/nonexistent/path/xyz")));
    }
}
