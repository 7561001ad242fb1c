//! Repository Locator Parsing
//!
//! A locator is either a remote URL on the single supported hosting
//! domain or a path to an already-available local copy. Validation
//! happens here, before any network or filesystem side effect.

use std::path::{Path, PathBuf};
use url::Url;

use crate::constants::retrieval;
use crate::types::RetrievalError;

/// A validated repository locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoLocator {
    /// Public repository on the supported hosting domain
    Remote {
        url: Url,
        owner: String,
        repo: String,
    },
    /// Pre-existing local copy, used as-is without fetching
    Local(PathBuf),
}

impl RepoLocator {
    /// Parse and validate a locator string.
    ///
    /// Existing local directories win over URL interpretation; everything
    /// else must be an http(s) URL on the supported host with at least an
    /// owner and a repository-name segment.
    pub fn parse(input: &str) -> Result<Self, RetrievalError> {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Err(RetrievalError::InvalidLocator(
                "locator is empty".to_string(),
            ));
        }

        let as_path = Path::new(trimmed);
        if as_path.is_dir() {
            return Ok(Self::Local(as_path.to_path_buf()));
        }

        let url = Url::parse(trimmed)
            .map_err(|e| RetrievalError::InvalidLocator(format!("{}: {}", trimmed, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(RetrievalError::InvalidLocator(format!(
                "unsupported scheme '{}'",
                url.scheme()
            )));
        }

        let host = url.host_str().unwrap_or_default().to_string();
        if host != retrieval::SUPPORTED_HOST {
            return Err(RetrievalError::UnsupportedHost(host));
        }

        let segments: Vec<&str> = url
            .path()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        if segments.len() < 2 {
            return Err(RetrievalError::InvalidLocator(
                "expected an owner and a repository name".to_string(),
            ));
        }

        let owner = segments[0].to_string();
        let repo = segments[1].trim_end_matches(".git").to_string();
        if repo.is_empty() {
            return Err(RetrievalError::InvalidLocator(
                "repository name is empty".to_string(),
            ));
        }

        Ok(Self::Remote { url, owner, repo })
    }

    /// The repository name: last non-empty locator segment, stripped of
    /// separators and a trailing `.git`.
    pub fn repository_name(&self) -> String {
        match self {
            Self::Remote { repo, .. } => repo.clone(),
            Self::Local(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().trim_end_matches(".git").to_string())
                .unwrap_or_else(|| "repository".to_string()),
        }
    }

    /// The original locator rendered back as a string (for the IR and
    /// prompt context).
    pub fn display(&self) -> String {
        match self {
            Self::Remote { url, .. } => url.to_string(),
            Self::Local(path) => path.display().to_string(),
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }
}
