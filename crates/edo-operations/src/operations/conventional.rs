use std::path::Path;

use crate::Result;
use crate::error::OperationError;
use crate::traits::{
    CommitMessageInteraction, CommitRunOutcome, CommitRunner, ConventionalMessage, GitProvider,
    MessageInput,
};

pub const MAX_HEADER_WIDTH: usize = 100;
pub const MAX_LINE_WIDTH: usize = 100;

const BREAKING_PREFIX: &str = "BREAKING CHANGE: ";

/// Prompts for a conventional commit message and commits in process.
pub struct ConventionalCommitRunner<G, M> {
    git: G,
    messages: M,
}

impl<G, M> ConventionalCommitRunner<G, M>
where
    G: GitProvider,
    M: CommitMessageInteraction,
{
    pub fn new(git: G, messages: M) -> Self {
        Self { git, messages }
    }
}

impl<G, M> CommitRunner for ConventionalCommitRunner<G, M>
where
    G: GitProvider,
    M: CommitMessageInteraction,
{
    fn run(&self, project_root: &Path) -> Result<CommitRunOutcome> {
        let MessageInput::Provided(message) = self.messages.compose_message()? else {
            return Err(OperationError::Cancelled);
        };
        if message.subject.trim().is_empty() {
            return Err(OperationError::EmptySubject);
        }

        let text = format_message(&message);
        let info = self.git.commit(project_root, &text)?;
        tracing::info!(sha = %info.sha, "committed");
        Ok(CommitRunOutcome::Committed(info))
    }
}

/// Renders the answers as `type(scope): subject`, followed by the wrapped
/// body, breaking change and issue footers separated by blank lines.
#[must_use]
pub fn format_message(message: &ConventionalMessage) -> String {
    let scope = non_empty(message.scope.as_deref())
        .map(|scope| format!("({scope})"))
        .unwrap_or_default();
    let header = format!("{}{scope}: {}", message.kind, message.subject.trim());
    let header: String = header.chars().take(MAX_HEADER_WIDTH).collect();

    let body = non_empty(message.body.as_deref()).map(wrap);
    let breaking = non_empty(message.breaking.as_deref()).map(|text| {
        let text = text.strip_prefix(BREAKING_PREFIX).unwrap_or(text).trim();
        wrap(&format!("{BREAKING_PREFIX}{text}"))
    });
    let issues = non_empty(message.issues.as_deref()).map(wrap);

    std::iter::once(header)
        .chain(body)
        .chain(breaking)
        .chain(issues)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Greedy word wrap; explicit line breaks are kept.
fn wrap(text: &str) -> String {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let width = line.chars().count();
            if width > 0 && width + 1 + word.chars().count() > MAX_LINE_WIDTH {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{MockGitProvider, MockMessageInteraction};
    use crate::traits::CommitType;

    fn message(subject: &str) -> ConventionalMessage {
        ConventionalMessage {
            kind: CommitType::Feat,
            scope: None,
            subject: subject.to_string(),
            body: None,
            breaking: None,
            issues: None,
        }
    }

    #[test]
    fn header_without_scope() {
        assert_eq!(format_message(&message("add pkg command")), "feat: add pkg command");
    }

    #[test]
    fn header_with_scope() {
        let mut msg = message("handle detached head");
        msg.kind = CommitType::Fix;
        msg.scope = Some("commit".to_string());

        assert_eq!(format_message(&msg), "fix(commit): handle detached head");
    }

    #[test]
    fn blank_scope_is_ignored() {
        let mut msg = message("x");
        msg.scope = Some("  ".to_string());

        assert_eq!(format_message(&msg), "feat: x");
    }

    #[test]
    fn header_is_truncated() {
        let msg = message(&"a".repeat(150));

        assert_eq!(format_message(&msg).chars().count(), MAX_HEADER_WIDTH);
    }

    #[test]
    fn body_and_footers() {
        let mut msg = message("drop node 14");
        msg.kind = CommitType::Build;
        msg.body = Some("Node 14 is end of life.".to_string());
        msg.breaking = Some("node 16 is required".to_string());
        msg.issues = Some("closes #12".to_string());

        assert_eq!(
            format_message(&msg),
            "build: drop node 14\n\nNode 14 is end of life.\n\nBREAKING CHANGE: node 16 is required\n\ncloses #12"
        );
    }

    #[test]
    fn breaking_prefix_is_not_doubled() {
        let mut msg = message("x");
        msg.breaking = Some("BREAKING CHANGE: api removed".to_string());

        assert_eq!(
            format_message(&msg),
            "feat: x\n\nBREAKING CHANGE: api removed"
        );
    }

    #[test]
    fn body_is_wrapped() {
        let mut msg = message("x");
        msg.body = Some("word ".repeat(40));

        let formatted = format_message(&msg);

        let body = formatted.split("\n\n").nth(1).unwrap_or_default();
        assert!(body.lines().count() > 1);
        assert!(body.lines().all(|line| line.chars().count() <= MAX_LINE_WIDTH));
    }

    #[test]
    fn runner_commits_formatted_message() -> anyhow::Result<()> {
        let mut msg = message("add init");
        msg.scope = Some("cli".to_string());
        let runner = ConventionalCommitRunner::new(
            MockGitProvider::new(),
            MockMessageInteraction::new(MessageInput::Provided(msg)),
        );

        let outcome = runner.run(Path::new("/mock/repo"))?;

        assert!(matches!(outcome, CommitRunOutcome::Committed(_)));
        assert_eq!(runner.git.commit_messages(), vec!["feat(cli): add init"]);
        Ok(())
    }

    #[test]
    fn cancelled_prompt_does_not_commit() {
        let runner = ConventionalCommitRunner::new(
            MockGitProvider::new(),
            MockMessageInteraction::new(MessageInput::Cancelled),
        );

        let result = runner.run(Path::new("/mock/repo"));

        assert!(matches!(result, Err(OperationError::Cancelled)));
        assert!(runner.git.commit_messages().is_empty());
        assert_eq!(runner.messages.calls(), 1);
    }

    #[test]
    fn empty_subject_is_rejected() {
        let runner = ConventionalCommitRunner::new(
            MockGitProvider::new(),
            MockMessageInteraction::new(MessageInput::Provided(message("   "))),
        );

        let result = runner.run(Path::new("/mock/repo"));

        assert!(matches!(result, Err(OperationError::EmptySubject)));
        assert!(runner.git.commit_messages().is_empty());
    }
}
