use std::path::{Path, PathBuf};

use edo_config::PushAuthFailure;
use edo_git::{FileStatus, PushAuth};

use crate::Result;
use crate::error::OperationError;
use crate::traits::{
    CommitInteraction, CommitPrompt, CommitRunOutcome, CommitRunner, Confirmation, FileSelection,
    GitProvider,
};

#[derive(Debug, Clone)]
pub struct CommitInput {
    /// Stage every actionable file without asking.
    pub all: bool,
    pub remote: String,
    pub auth: PushAuth,
    pub auth_failure: PushAuthFailure,
}

impl Default for CommitInput {
    fn default() -> Self {
        Self {
            all: false,
            remote: edo_config::DEFAULT_REMOTE.to_string(),
            auth: PushAuth::Default,
            auth_failure: PushAuthFailure::Warn,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushSkipReason {
    Declined,
    DetachedHead,
    AuthFailed,
}

#[derive(Debug, PartialEq, Eq)]
pub enum CommitOutcome {
    Pushed {
        staged: Vec<PathBuf>,
        commit: CommitRunOutcome,
        branch: String,
    },
    PushSkipped {
        staged: Vec<PathBuf>,
        commit: CommitRunOutcome,
        reason: PushSkipReason,
    },
    /// The user declined to commit; staged files stay staged.
    CommitDeclined { staged: Vec<PathBuf> },
    /// Changes were offered but none was selected.
    NothingSelected,
}

pub struct CommitOperation<G, I, R> {
    git: G,
    interaction: I,
    runner: R,
}

impl<G, I, R> CommitOperation<G, I, R>
where
    G: GitProvider,
    I: CommitInteraction,
    R: CommitRunner,
{
    pub fn new(git: G, interaction: I, runner: R) -> Self {
        Self {
            git,
            interaction,
            runner,
        }
    }

    /// # Errors
    ///
    /// Returns [`OperationError::Cancelled`] if the user cancels a prompt, or
    /// an error if scanning, staging, committing or pushing fails.
    pub fn execute(&self, project_root: &Path, input: &CommitInput) -> Result<CommitOutcome> {
        let changes = self.scan(project_root)?;
        let staged = self.select(&changes, input)?;
        if staged.is_empty() && !changes.is_empty() {
            tracing::info!("no files selected, nothing committed");
            return Ok(CommitOutcome::NothingSelected);
        }

        if !staged.is_empty() {
            let paths: Vec<&Path> = staged.iter().map(PathBuf::as_path).collect();
            self.git.stage_files(project_root, &paths)?;
            tracing::info!(count = staged.len(), "files staged");
        }

        let prompt = if staged.is_empty() {
            CommitPrompt::NothingToStage
        } else {
            CommitPrompt::Commit
        };
        match self.interaction.confirm(&prompt)? {
            Confirmation::Confirmed => {}
            Confirmation::Declined => {
                tracing::info!("commit declined");
                return Ok(CommitOutcome::CommitDeclined { staged });
            }
            Confirmation::Cancelled => return Err(OperationError::Cancelled),
        }

        let commit = if prompt == CommitPrompt::NothingToStage
            && !self.git.has_staged_changes(project_root)?
        {
            tracing::info!("index matches HEAD, skipping commit");
            CommitRunOutcome::NothingToCommit
        } else {
            self.runner.run(project_root)?
        };

        let Some(branch) = self.git.current_branch(project_root)? else {
            tracing::debug!("HEAD is detached, skipping push");
            return Ok(CommitOutcome::PushSkipped {
                staged,
                commit,
                reason: PushSkipReason::DetachedHead,
            });
        };

        match self.interaction.confirm(&CommitPrompt::Push {
            branch: branch.clone(),
        })? {
            Confirmation::Confirmed => {}
            Confirmation::Declined => {
                return Ok(CommitOutcome::PushSkipped {
                    staged,
                    commit,
                    reason: PushSkipReason::Declined,
                });
            }
            Confirmation::Cancelled => return Err(OperationError::Cancelled),
        }

        let outcome = self
            .git
            .push(project_root, &input.remote, &branch, &input.auth)?;
        let message = outcome.message.unwrap_or_default();

        if outcome.ok {
            tracing::info!(remote = %input.remote, %branch, "pushed");
            return Ok(CommitOutcome::Pushed {
                staged,
                commit,
                branch,
            });
        }
        if !outcome.auth_failed {
            return Err(OperationError::PushRejected { message });
        }
        match input.auth_failure {
            PushAuthFailure::Warn => {
                tracing::warn!(remote = %input.remote, %message, "push authentication failed, commit kept locally");
                Ok(CommitOutcome::PushSkipped {
                    staged,
                    commit,
                    reason: PushSkipReason::AuthFailed,
                })
            }
            PushAuthFailure::Fail => Err(OperationError::PushAuthFailed { message }),
        }
    }

    fn scan(&self, project_root: &Path) -> Result<Vec<FileStatus>> {
        let paths = self.git.list_paths(project_root)?;
        let statuses = self.git.file_statuses(project_root, &paths)?;
        let changes: Vec<FileStatus> = statuses
            .into_iter()
            .filter(|entry| entry.status.is_actionable())
            .collect();
        tracing::debug!(scanned = paths.len(), actionable = changes.len(), "status scan");
        Ok(changes)
    }

    fn select(&self, changes: &[FileStatus], input: &CommitInput) -> Result<Vec<PathBuf>> {
        if changes.is_empty() {
            return Ok(Vec::new());
        }
        if input.all {
            return Ok(changes.iter().map(|entry| entry.path.clone()).collect());
        }

        match self.interaction.select_files(changes)? {
            FileSelection::Selected(paths) => Ok(paths),
            FileSelection::Cancelled => Err(OperationError::Cancelled),
        }
    }
}
