use std::path::{Path, PathBuf};

use edo_git::{CommitInfo, FileStatus, PushAuth, PushOutcome, Repository};

use crate::Result;
use crate::traits::GitProvider;

pub struct Git2Provider;

impl Git2Provider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for Git2Provider {
    fn default() -> Self {
        Self::new()
    }
}

impl GitProvider for Git2Provider {
    fn list_paths(&self, project_root: &Path) -> Result<Vec<PathBuf>> {
        let repo = Repository::open(project_root)?;
        Ok(repo.list_paths()?)
    }

    fn file_statuses(&self, project_root: &Path, paths: &[PathBuf]) -> Result<Vec<FileStatus>> {
        let repo = Repository::open(project_root)?;
        Ok(repo.file_statuses(paths)?)
    }

    fn stage_files(&self, project_root: &Path, paths: &[&Path]) -> Result<()> {
        let repo = Repository::open(project_root)?;
        Ok(repo.stage_files(paths)?)
    }

    fn has_staged_changes(&self, project_root: &Path) -> Result<bool> {
        let repo = Repository::open(project_root)?;
        Ok(repo.has_staged_changes()?)
    }

    fn commit(&self, project_root: &Path, message: &str) -> Result<CommitInfo> {
        let repo = Repository::open(project_root)?;
        Ok(repo.commit(message)?)
    }

    fn current_branch(&self, project_root: &Path) -> Result<Option<String>> {
        let repo = Repository::open(project_root)?;
        Ok(repo.current_branch()?)
    }

    fn push(
        &self,
        project_root: &Path,
        remote: &str,
        branch: &str,
        auth: &PushAuth,
    ) -> Result<PushOutcome> {
        let repo = Repository::open(project_root)?;
        Ok(repo.push(remote, branch, auth)?)
    }

    fn remote_url(&self, project_root: &Path, remote: &str) -> Result<Option<String>> {
        let repo = Repository::open(project_root)?;
        Ok(repo.remote_url(remote)?)
    }
}
