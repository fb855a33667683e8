use std::path::{Path, PathBuf};

use edo_git::{CommitInfo, FileStatus, PushAuth, PushOutcome};

use crate::Result;

pub trait GitProvider: Send + Sync {
    /// Paths known to HEAD, the index or the working tree, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or read.
    fn list_paths(&self, project_root: &Path) -> Result<Vec<PathBuf>>;

    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or status check fails.
    fn file_statuses(&self, project_root: &Path, paths: &[PathBuf]) -> Result<Vec<FileStatus>>;

    /// # Errors
    ///
    /// Returns an error if staging any of the files fails.
    fn stage_files(&self, project_root: &Path, paths: &[&Path]) -> Result<()>;

    /// Whether the index differs from HEAD.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or read.
    fn has_staged_changes(&self, project_root: &Path) -> Result<bool>;

    /// # Errors
    ///
    /// Returns an error if the commit cannot be created.
    fn commit(&self, project_root: &Path, message: &str) -> Result<CommitInfo>;

    /// `None` when HEAD is detached.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or HEAD cannot be read.
    fn current_branch(&self, project_root: &Path) -> Result<Option<String>>;

    /// # Errors
    ///
    /// Returns an error if the remote is missing or the transport fails.
    fn push(
        &self,
        project_root: &Path,
        remote: &str,
        branch: &str,
        auth: &PushAuth,
    ) -> Result<PushOutcome>;

    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened.
    fn remote_url(&self, project_root: &Path, remote: &str) -> Result<Option<String>>;
}
