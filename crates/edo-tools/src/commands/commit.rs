use std::path::Path;

use edo_config::{ExposeSecret as _, PushAuthFailure, ResolvedConfig};
use edo_git::PushAuth;
use edo_operations::operations::{
    CommitInput, CommitOperation, CommitOutcome, ConventionalCommitRunner, PushSkipReason,
};
use edo_operations::providers::{ExternalCommitRunner, Git2Provider};
use edo_operations::traits::{CommitInteraction, CommitRunOutcome, CommitRunner};

use super::CommitArgs;
use crate::environment::is_interactive;
use crate::error::Result;
use crate::interaction::{NonInteractiveProvider, TerminalInteractionProvider};

pub(super) fn run(args: CommitArgs, config: &ResolvedConfig) -> Result<()> {
    let input = build_input(&args, config);
    let root = config.root.as_path();

    let outcome = match (&config.commit.command, is_interactive()) {
        (Some(command), true) => execute(
            root,
            &input,
            TerminalInteractionProvider,
            external_runner(command, config),
        ),
        (Some(command), false) => execute(
            root,
            &input,
            NonInteractiveProvider,
            external_runner(command, config),
        ),
        (None, true) => execute(
            root,
            &input,
            TerminalInteractionProvider,
            ConventionalCommitRunner::new(Git2Provider::new(), TerminalInteractionProvider),
        ),
        (None, false) => execute(
            root,
            &input,
            NonInteractiveProvider,
            ConventionalCommitRunner::new(Git2Provider::new(), NonInteractiveProvider),
        ),
    }?;

    print_outcome(&outcome, &input.remote);
    Ok(())
}

fn build_input(args: &CommitArgs, config: &ResolvedConfig) -> CommitInput {
    let auth = config
        .commit
        .token
        .as_ref()
        .map_or(PushAuth::Default, |token| {
            PushAuth::Token(token.expose_secret().to_string())
        });
    let auth_failure = if args.strict_push {
        PushAuthFailure::Fail
    } else {
        config.commit.push_auth_failure
    };

    CommitInput {
        all: args.all || config.commit.all,
        remote: args
            .remote
            .clone()
            .unwrap_or_else(|| config.commit.remote.clone()),
        auth,
        auth_failure,
    }
}

fn external_runner(command: &[String], config: &ResolvedConfig) -> ExternalCommitRunner {
    ExternalCommitRunner::new(command.to_vec()).with_timeout(config.commit.timeout)
}

fn execute<I, R>(
    root: &Path,
    input: &CommitInput,
    interaction: I,
    runner: R,
) -> Result<CommitOutcome>
where
    I: CommitInteraction,
    R: CommitRunner,
{
    let operation = CommitOperation::new(Git2Provider::new(), interaction, runner);
    Ok(operation.execute(root, input)?)
}

fn print_outcome(outcome: &CommitOutcome, remote: &str) {
    match outcome {
        CommitOutcome::Pushed { commit, branch, .. } => {
            print_commit(commit);
            println!("Pushed '{branch}' to {remote}");
        }
        CommitOutcome::PushSkipped { commit, reason, .. } => {
            print_commit(commit);
            match reason {
                PushSkipReason::Declined => println!("Push skipped"),
                PushSkipReason::DetachedHead => println!("HEAD is detached, nothing pushed"),
                PushSkipReason::AuthFailed => {
                    println!("Push to {remote} failed to authenticate, commit kept locally");
                }
            }
        }
        CommitOutcome::CommitDeclined { staged } => {
            if staged.is_empty() {
                println!("Nothing committed");
            } else {
                println!("Nothing committed, {} file(s) left staged", staged.len());
            }
        }
        CommitOutcome::NothingSelected => println!("No files selected, nothing committed"),
    }
}

fn print_commit(commit: &CommitRunOutcome) {
    match commit {
        CommitRunOutcome::Committed(info) => {
            let short = info.sha.get(..7).unwrap_or(&info.sha);
            let summary = info.message.lines().next().unwrap_or_default();
            println!("[{short}] {summary}");
        }
        CommitRunOutcome::ProcessExited => println!("Commit command finished"),
        CommitRunOutcome::NothingToCommit => println!("Nothing new to commit"),
    }
}
