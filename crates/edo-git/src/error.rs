use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("git operation failed")]
    Git(#[from] git2::Error),

    #[error("not a git repository: '{path}'")]
    NotARepository { path: PathBuf },

    #[error("repository at '{path}' has no working directory")]
    BareRepository { path: PathBuf },

    #[error("remote '{name}' is not configured")]
    RemoteNotFound { name: String },

    #[error("no commit identity configured; set user.name and user.email")]
    MissingSignature(#[source] git2::Error),

    #[error("nothing staged to commit")]
    NothingToCommit,
}
