use std::path::Path;

use edo_git::CommitInfo;

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitRunOutcome {
    /// The commit was created in process.
    Committed(CommitInfo),
    /// An external command finished successfully; the commit it made is not
    /// inspected.
    ProcessExited,
    /// The index matched HEAD, so the runner was skipped and only a push is
    /// attempted.
    NothingToCommit,
}

/// Creates the commit once files are staged and the user confirmed.
pub trait CommitRunner: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the commit cannot be created or the user cancels.
    fn run(&self, project_root: &Path) -> Result<CommitRunOutcome>;
}

impl<T: CommitRunner + ?Sized> CommitRunner for Box<T> {
    fn run(&self, project_root: &Path) -> Result<CommitRunOutcome> {
        (**self).run(project_root)
    }
}
