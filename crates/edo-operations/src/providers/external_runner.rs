use std::path::Path;
use std::process::{Child, Command, ExitStatus};
use std::thread;
use std::time::{Duration, Instant};

use crate::Result;
use crate::error::OperationError;
use crate::traits::{CommitRunOutcome, CommitRunner};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Hands the commit over to a user-configured command such as `git cz`.
///
/// The child runs in the project root with inherited stdio so it can prompt
/// on the terminal.
pub struct ExternalCommitRunner {
    command: Vec<String>,
    timeout: Option<Duration>,
}

impl ExternalCommitRunner {
    #[must_use]
    pub fn new(command: Vec<String>) -> Self {
        Self {
            command,
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn wait(&self, child: &mut Child) -> Result<ExitStatus> {
        let Some(timeout) = self.timeout else {
            return Ok(child.wait()?);
        };

        let started = Instant::now();
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            if started.elapsed() >= timeout {
                tracing::warn!(seconds = timeout.as_secs(), "commit command timed out, killing it");
                child.kill()?;
                child.wait()?;
                return Err(OperationError::CommitProcessTimedOut {
                    seconds: timeout.as_secs(),
                });
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

impl CommitRunner for ExternalCommitRunner {
    fn run(&self, project_root: &Path) -> Result<CommitRunOutcome> {
        let Some((program, args)) = self.command.split_first() else {
            return Err(OperationError::EmptyCommitCommand);
        };

        tracing::debug!(%program, ?args, "starting commit command");
        let mut child = Command::new(program)
            .args(args)
            .current_dir(project_root)
            .spawn()
            .map_err(|source| OperationError::CommitProcessSpawn {
                program: program.clone(),
                source,
            })?;

        let status = self.wait(&mut child)?;
        match status.code() {
            Some(0) => Ok(CommitRunOutcome::ProcessExited),
            Some(code) => Err(OperationError::CommitProcessFailed { code }),
            None => Err(OperationError::CommitProcessTerminated),
        }
    }
}
