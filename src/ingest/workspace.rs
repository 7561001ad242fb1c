//! Run Workspace
//!
//! Temporary directory tree exclusively owned by one orchestration run.
//! Removal is scoped to the value's lifetime: dropping the workspace
//! deletes the tree on every exit path, success or failure, best-effort.

use std::path::Path;
use tempfile::TempDir;
use tracing::debug;
use uuid::Uuid;

use crate::constants::retrieval;
use crate::types::Result;

/// Scoped temporary workspace for a single analysis run.
#[derive(Debug)]
pub struct Workspace {
    run_id: Uuid,
    dir: TempDir,
}

impl Workspace {
    pub fn create() -> Result<Self> {
        let run_id = Uuid::new_v4();
        let dir = tempfile::Builder::new()
            .prefix(retrieval::WORKSPACE_PREFIX)
            .tempdir()?;

        debug!(run_id = %run_id, path = %dir.path().display(), "created workspace");

        Ok(Self { run_id, dir })
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_removed_on_drop() {
        let workspace = Workspace::create().unwrap();
        let path = workspace.path().to_path_buf();
        std::fs::write(path.join("marker"), b"x").unwrap();
        assert!(path.exists());

        drop(workspace);
        assert!(!path.exists());
    }

    #[test]
    fn test_workspaces_are_distinct() {
        let a = Workspace::create().unwrap();
        let b = Workspace::create().unwrap();
        assert_ne!(a.path(), b.path());
        assert_ne!(a.run_id(), b.run_id());
    }
}
