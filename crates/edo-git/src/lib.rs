mod error;
mod repository;
mod types;

pub use error::GitError;
pub use repository::Repository;
pub use types::{CommitInfo, FileStatus, PushAuth, PushOutcome, StatusCode};

use std::path::Path;

pub type Result<T> = std::result::Result<T, GitError>;

/// Lists every known path and its status, in path order.
///
/// # Errors
///
/// Returns an error if the path is not a git repository or if the status scan fails.
pub fn scan_statuses(path: &Path) -> Result<Vec<FileStatus>> {
    let repo = Repository::open(path)?;
    let paths = repo.list_paths()?;
    repo.file_statuses(&paths)
}

/// # Errors
///
/// Returns an error if the path is not a git repository.
pub fn current_branch(path: &Path) -> Result<Option<String>> {
    Repository::open(path)?.current_branch()
}
