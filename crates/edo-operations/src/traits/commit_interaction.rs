use std::fmt;
use std::path::PathBuf;

use edo_git::FileStatus;

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSelection {
    Selected(Vec<PathBuf>),
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitPrompt {
    /// Files were staged; ask whether to commit them.
    Commit,
    /// Nothing to stage; ask whether to continue with what is already staged.
    NothingToStage,
    Push { branch: String },
}

impl CommitPrompt {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Commit => "Commit the staged files?".to_string(),
            Self::NothingToStage => {
                "No changes to stage. Commit and push already staged files?".to_string()
            }
            Self::Push { branch } => format!("Push branch '{branch}'?"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
    Cancelled,
}

pub trait CommitInteraction: Send + Sync {
    /// Offers the actionable files with every item pre-selected.
    ///
    /// # Errors
    ///
    /// Returns an error if the interaction cannot be completed.
    fn select_files(&self, changes: &[FileStatus]) -> Result<FileSelection>;

    /// # Errors
    ///
    /// Returns an error if the interaction cannot be completed.
    fn confirm(&self, prompt: &CommitPrompt) -> Result<Confirmation>;
}

/// Conventional commit types, in the order they are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Build,
    Ci,
    Chore,
    Revert,
}

impl CommitType {
    pub const ALL: [Self; 11] = [
        Self::Feat,
        Self::Fix,
        Self::Docs,
        Self::Style,
        Self::Refactor,
        Self::Perf,
        Self::Test,
        Self::Build,
        Self::Ci,
        Self::Chore,
        Self::Revert,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Feat => "feat",
            Self::Fix => "fix",
            Self::Docs => "docs",
            Self::Style => "style",
            Self::Refactor => "refactor",
            Self::Perf => "perf",
            Self::Test => "test",
            Self::Build => "build",
            Self::Ci => "ci",
            Self::Chore => "chore",
            Self::Revert => "revert",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Feat => "A new feature",
            Self::Fix => "A bug fix",
            Self::Docs => "Documentation only changes",
            Self::Style => "Changes that do not affect the meaning of the code",
            Self::Refactor => "A code change that neither fixes a bug nor adds a feature",
            Self::Perf => "A code change that improves performance",
            Self::Test => "Adding missing tests or correcting existing tests",
            Self::Build => "Changes that affect the build system or external dependencies",
            Self::Ci => "Changes to CI configuration files and scripts",
            Self::Chore => "Other changes that don't modify src or test files",
            Self::Revert => "Reverts a previous commit",
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Answers of the conventional commit prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConventionalMessage {
    pub kind: CommitType,
    pub scope: Option<String>,
    pub subject: String,
    pub body: Option<String>,
    /// Description of a breaking change, if any.
    pub breaking: Option<String>,
    /// Issue references such as `fix #123`.
    pub issues: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageInput {
    Provided(ConventionalMessage),
    Cancelled,
}

pub trait CommitMessageInteraction: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the interaction cannot be completed.
    fn compose_message(&self) -> Result<MessageInput>;
}
