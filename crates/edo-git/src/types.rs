use std::fmt;
use std::path::PathBuf;

/// Comparison of a path between HEAD, the index and the working tree.
///
/// The `Worktree*` variants describe states where the working tree differs
/// from the index; they print with a leading `*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    Unmodified,
    Modified,
    Deleted,
    Added,
    Absent,
    Ignored,
    WorktreeModified,
    WorktreeDeleted,
    WorktreeAdded,
    WorktreeUnmodified,
    WorktreeAbsent,
    WorktreeUndeleted,
    WorktreeUndeleteModified,
}

impl StatusCode {
    /// Whether the path has an unstaged add, modify or delete that can be staged.
    #[must_use]
    pub fn is_actionable(self) -> bool {
        matches!(
            self,
            Self::WorktreeModified | Self::WorktreeDeleted | Self::WorktreeAdded
        )
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unmodified => "unmodified",
            Self::Modified => "modified",
            Self::Deleted => "deleted",
            Self::Added => "added",
            Self::Absent => "absent",
            Self::Ignored => "ignored",
            Self::WorktreeModified => "*modified",
            Self::WorktreeDeleted => "*deleted",
            Self::WorktreeAdded => "*added",
            Self::WorktreeUnmodified => "*unmodified",
            Self::WorktreeAbsent => "*absent",
            Self::WorktreeUndeleted => "*undeleted",
            Self::WorktreeUndeleteModified => "*undeletemodified",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStatus {
    pub status: StatusCode,
    pub path: PathBuf,
}

impl FileStatus {
    #[must_use]
    pub fn new(status: StatusCode, path: impl Into<PathBuf>) -> Self {
        Self {
            status,
            path: path.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub sha: String,
    pub message: String,
}

/// Credentials offered to the remote during a push.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum PushAuth {
    /// Username/password transports receive this token as the password.
    Token(String),
    /// Git credential helpers for HTTP, the ssh agent for SSH.
    #[default]
    Default,
}

impl fmt::Debug for PushAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(_) => f.write_str("Token(<redacted>)"),
            Self::Default => f.write_str("Default"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushOutcome {
    pub ok: bool,
    pub auth_failed: bool,
    pub message: Option<String>,
}

impl PushOutcome {
    #[must_use]
    pub fn pushed() -> Self {
        Self {
            ok: true,
            auth_failed: false,
            message: None,
        }
    }

    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            auth_failed: false,
            message: Some(message.into()),
        }
    }

    #[must_use]
    pub fn auth_failed(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            auth_failed: true,
            message: Some(message.into()),
        }
    }
}
