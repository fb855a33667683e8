use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use edo_git::{CommitInfo, FileStatus, GitError, PushAuth, PushOutcome};
use edo_template::{Boilerplate, Question};
use serde_json::Value;

use crate::Result;
use crate::error::OperationError;
use crate::traits::{
    BundleJob, Bundler, ChoiceSelection, CommitInteraction, CommitMessageInteraction,
    CommitPrompt, CommitRunOutcome, CommitRunner, Confirmation, FileSelection, GitProvider,
    InitInteraction, MessageInput, PackageAnswersInput, PackagePrompt, PkgInteraction, Registry,
    TextInput,
};

pub struct MockGitProvider {
    statuses: Vec<FileStatus>,
    branch: Option<String>,
    push_outcome: PushOutcome,
    remote_url: Option<String>,
    fail_stage: bool,
    fail_remote_url: bool,
    staged_changes: bool,
    stage_calls: Mutex<Vec<Vec<PathBuf>>>,
    commits: Mutex<Vec<String>>,
    pushes: Mutex<Vec<(String, String)>>,
}

impl MockGitProvider {
    #[must_use]
    pub fn new() -> Self {
        Self {
            statuses: Vec::new(),
            branch: Some("main".to_string()),
            push_outcome: PushOutcome::pushed(),
            remote_url: None,
            fail_stage: false,
            fail_remote_url: false,
            staged_changes: true,
            stage_calls: Mutex::new(Vec::new()),
            commits: Mutex::new(Vec::new()),
            pushes: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_statuses(mut self, statuses: Vec<FileStatus>) -> Self {
        self.statuses = statuses;
        self
    }

    #[must_use]
    pub fn with_branch(mut self, branch: Option<&str>) -> Self {
        self.branch = branch.map(String::from);
        self
    }

    #[must_use]
    pub fn with_push_outcome(mut self, outcome: PushOutcome) -> Self {
        self.push_outcome = outcome;
        self
    }

    #[must_use]
    pub fn with_remote_url(mut self, url: &str) -> Self {
        self.remote_url = Some(url.to_string());
        self
    }

    #[must_use]
    pub fn with_staged_changes(mut self, staged: bool) -> Self {
        self.staged_changes = staged;
        self
    }

    #[must_use]
    pub fn failing_stage(mut self) -> Self {
        self.fail_stage = true;
        self
    }

    #[must_use]
    pub fn failing_remote_url(mut self) -> Self {
        self.fail_remote_url = true;
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn stage_calls(&self) -> Vec<Vec<PathBuf>> {
        self.stage_calls.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn commit_messages(&self) -> Vec<String> {
        self.commits.lock().expect("lock poisoned").clone()
    }

    /// Recorded `(remote, branch)` pairs.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn pushes(&self) -> Vec<(String, String)> {
        self.pushes.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockGitProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl GitProvider for MockGitProvider {
    fn list_paths(&self, _project_root: &Path) -> Result<Vec<PathBuf>> {
        Ok(self.statuses.iter().map(|s| s.path.clone()).collect())
    }

    fn file_statuses(&self, _project_root: &Path, paths: &[PathBuf]) -> Result<Vec<FileStatus>> {
        Ok(paths
            .iter()
            .filter_map(|path| self.statuses.iter().find(|s| &s.path == path).cloned())
            .collect())
    }

    fn stage_files(&self, _project_root: &Path, paths: &[&Path]) -> Result<()> {
        if self.fail_stage {
            return Err(GitError::Git(git2::Error::from_str("index is locked")).into());
        }
        self.stage_calls
            .lock()
            .expect("lock poisoned")
            .push(paths.iter().map(|p| p.to_path_buf()).collect());
        Ok(())
    }

    fn has_staged_changes(&self, _project_root: &Path) -> Result<bool> {
        Ok(self.staged_changes)
    }

    fn commit(&self, _project_root: &Path, message: &str) -> Result<CommitInfo> {
        self.commits
            .lock()
            .expect("lock poisoned")
            .push(message.to_string());
        Ok(CommitInfo {
            sha: "abc1234".to_string(),
            message: message.to_string(),
        })
    }

    fn current_branch(&self, _project_root: &Path) -> Result<Option<String>> {
        Ok(self.branch.clone())
    }

    fn push(
        &self,
        _project_root: &Path,
        remote: &str,
        branch: &str,
        _auth: &PushAuth,
    ) -> Result<PushOutcome> {
        self.pushes
            .lock()
            .expect("lock poisoned")
            .push((remote.to_string(), branch.to_string()));
        Ok(self.push_outcome.clone())
    }

    fn remote_url(&self, project_root: &Path, _remote: &str) -> Result<Option<String>> {
        if self.fail_remote_url {
            return Err(GitError::NotARepository {
                path: project_root.to_path_buf(),
            }
            .into());
        }
        Ok(self.remote_url.clone())
    }
}

/// Selects every offered file and confirms every prompt unless told otherwise.
pub struct MockCommitInteraction {
    selection: Option<FileSelection>,
    confirmations: Mutex<VecDeque<Confirmation>>,
    offered: Mutex<Vec<Vec<FileStatus>>>,
    prompts: Mutex<Vec<CommitPrompt>>,
}

impl MockCommitInteraction {
    #[must_use]
    pub fn new() -> Self {
        Self {
            selection: None,
            confirmations: Mutex::new(VecDeque::new()),
            offered: Mutex::new(Vec::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_selection(mut self, selection: FileSelection) -> Self {
        self.selection = Some(selection);
        self
    }

    /// Answers for consecutive `confirm` calls; later calls confirm.
    #[must_use]
    pub fn with_confirmations(self, answers: Vec<Confirmation>) -> Self {
        Self {
            confirmations: Mutex::new(answers.into()),
            ..self
        }
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn offered(&self) -> Vec<Vec<FileStatus>> {
        self.offered.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn prompts(&self) -> Vec<CommitPrompt> {
        self.prompts.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockCommitInteraction {
    fn default() -> Self {
        Self::new()
    }
}

impl CommitInteraction for MockCommitInteraction {
    fn select_files(&self, changes: &[FileStatus]) -> Result<FileSelection> {
        self.offered
            .lock()
            .expect("lock poisoned")
            .push(changes.to_vec());
        Ok(self.selection.clone().unwrap_or_else(|| {
            FileSelection::Selected(changes.iter().map(|c| c.path.clone()).collect())
        }))
    }

    fn confirm(&self, prompt: &CommitPrompt) -> Result<Confirmation> {
        self.prompts
            .lock()
            .expect("lock poisoned")
            .push(prompt.clone());
        Ok(self
            .confirmations
            .lock()
            .expect("lock poisoned")
            .pop_front()
            .unwrap_or(Confirmation::Confirmed))
    }
}

pub struct MockMessageInteraction {
    input: MessageInput,
    calls: Mutex<usize>,
}

impl MockMessageInteraction {
    #[must_use]
    pub fn new(input: MessageInput) -> Self {
        Self {
            input,
            calls: Mutex::new(0),
        }
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> usize {
        *self.calls.lock().expect("lock poisoned")
    }
}

impl CommitMessageInteraction for MockMessageInteraction {
    fn compose_message(&self) -> Result<MessageInput> {
        *self.calls.lock().expect("lock poisoned") += 1;
        Ok(self.input.clone())
    }
}

pub struct MockCommitRunner {
    error: Option<fn() -> OperationError>,
    calls: Mutex<Vec<PathBuf>>,
}

impl MockCommitRunner {
    #[must_use]
    pub fn new() -> Self {
        Self {
            error: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn failing_with(mut self, error: fn() -> OperationError) -> Self {
        self.error = Some(error);
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.lock().expect("lock poisoned").len()
    }
}

impl Default for MockCommitRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommitRunner for MockCommitRunner {
    fn run(&self, project_root: &Path) -> Result<CommitRunOutcome> {
        self.calls
            .lock()
            .expect("lock poisoned")
            .push(project_root.to_path_buf());
        match self.error {
            Some(error) => Err(error()),
            None => Ok(CommitRunOutcome::ProcessExited),
        }
    }
}

/// Serves package documents from memory. Tarball downloads write the given
/// files under `<dest>/package`, like an npm tarball.
pub struct MockRegistry {
    packages: HashMap<String, Value>,
    tarballs: HashMap<String, Vec<(String, String)>>,
    requests: Mutex<Vec<(String, String)>>,
    downloads: Mutex<Vec<(String, PathBuf)>>,
}

impl MockRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            packages: HashMap::new(),
            tarballs: HashMap::new(),
            requests: Mutex::new(Vec::new()),
            downloads: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_package(mut self, name: &str, info: Value) -> Self {
        self.packages.insert(name.to_string(), info);
        self
    }

    #[must_use]
    pub fn with_tarball(mut self, url: &str, files: &[(&str, &str)]) -> Self {
        self.tarballs.insert(
            url.to_string(),
            files
                .iter()
                .map(|(path, content)| ((*path).to_string(), (*content).to_string()))
                .collect(),
        );
        self
    }

    /// Recorded `(registry, package)` pairs.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn downloads(&self) -> Vec<(String, PathBuf)> {
        self.downloads.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry for MockRegistry {
    fn package_info(&self, registry: &str, package: &str) -> Result<Value> {
        self.requests
            .lock()
            .expect("lock poisoned")
            .push((registry.to_string(), package.to_string()));
        self.packages
            .get(package)
            .cloned()
            .ok_or_else(|| OperationError::RegistryStatus {
                url: format!("{registry}/{package}/latest"),
                status: 404,
            })
    }

    fn download_tarball(&self, tarball_url: &str, dest: &Path) -> Result<()> {
        self.downloads
            .lock()
            .expect("lock poisoned")
            .push((tarball_url.to_string(), dest.to_path_buf()));
        let files = self
            .tarballs
            .get(tarball_url)
            .ok_or_else(|| OperationError::RegistryStatus {
                url: tarball_url.to_string(),
                status: 404,
            })?;
        for (path, content) in files {
            let target = dest.join("package").join(path);
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(target, content)?;
        }
        Ok(())
    }
}

/// Picks the first choice and answers questions with their defaults unless
/// configured otherwise.
pub struct MockInitInteraction {
    target_dirs: Mutex<VecDeque<TextInput>>,
    non_interactive: bool,
    group: ChoiceSelection,
    boilerplate: ChoiceSelection,
    deprecated: Confirmation,
    answers: HashMap<String, TextInput>,
    rejected_dirs: Mutex<Vec<String>>,
    offered_groups: Mutex<Vec<Vec<String>>>,
    offered_boilerplates: Mutex<Vec<Vec<String>>>,
    asked: Mutex<Vec<(String, String)>>,
}

impl MockInitInteraction {
    #[must_use]
    pub fn new() -> Self {
        Self {
            target_dirs: Mutex::new(VecDeque::new()),
            non_interactive: false,
            group: ChoiceSelection::Selected(0),
            boilerplate: ChoiceSelection::Selected(0),
            deprecated: Confirmation::Confirmed,
            answers: HashMap::new(),
            rejected_dirs: Mutex::new(Vec::new()),
            offered_groups: Mutex::new(Vec::new()),
            offered_boilerplates: Mutex::new(Vec::new()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Behaves like a terminal without a TTY.
    #[must_use]
    pub fn non_interactive(mut self) -> Self {
        self.non_interactive = true;
        self
    }

    #[must_use]
    pub fn with_target_dirs(self, dirs: Vec<TextInput>) -> Self {
        Self {
            target_dirs: Mutex::new(dirs.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_group(mut self, group: ChoiceSelection) -> Self {
        self.group = group;
        self
    }

    #[must_use]
    pub fn with_boilerplate(mut self, boilerplate: ChoiceSelection) -> Self {
        self.boilerplate = boilerplate;
        self
    }

    #[must_use]
    pub fn with_deprecated_answer(mut self, answer: Confirmation) -> Self {
        self.deprecated = answer;
        self
    }

    #[must_use]
    pub fn with_answer(mut self, key: &str, answer: TextInput) -> Self {
        self.answers.insert(key.to_string(), answer);
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn rejected_dirs(&self) -> Vec<String> {
        self.rejected_dirs.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn offered_groups(&self) -> Vec<Vec<String>> {
        self.offered_groups.lock().expect("lock poisoned").clone()
    }

    /// Keys of the boilerplates offered per prompt.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn offered_boilerplates(&self) -> Vec<Vec<String>> {
        self.offered_boilerplates
            .lock()
            .expect("lock poisoned")
            .clone()
    }

    /// Recorded `(key, default)` pairs.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn asked(&self) -> Vec<(String, String)> {
        self.asked.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockInitInteraction {
    fn default() -> Self {
        Self::new()
    }
}

impl InitInteraction for MockInitInteraction {
    fn prompt_target_dir(&self, _initial: &str, rejected: &str) -> Result<TextInput> {
        self.rejected_dirs
            .lock()
            .expect("lock poisoned")
            .push(rejected.to_string());
        if self.non_interactive {
            return Err(OperationError::InteractionRequired);
        }
        Ok(self
            .target_dirs
            .lock()
            .expect("lock poisoned")
            .pop_front()
            .unwrap_or(TextInput::Cancelled))
    }

    fn select_group(&self, groups: &[String]) -> Result<ChoiceSelection> {
        self.offered_groups
            .lock()
            .expect("lock poisoned")
            .push(groups.to_vec());
        Ok(self.group)
    }

    fn select_boilerplate(&self, boilerplates: &[Boilerplate]) -> Result<ChoiceSelection> {
        self.offered_boilerplates
            .lock()
            .expect("lock poisoned")
            .push(boilerplates.iter().map(|b| b.key.clone()).collect());
        Ok(self.boilerplate)
    }

    fn confirm_deprecated(&self, _boilerplate: &Boilerplate) -> Result<Confirmation> {
        Ok(self.deprecated)
    }

    fn ask(&self, key: &str, _question: &Question, default: &str) -> Result<TextInput> {
        self.asked
            .lock()
            .expect("lock poisoned")
            .push((key.to_string(), default.to_string()));
        Ok(self
            .answers
            .get(key)
            .cloned()
            .unwrap_or_else(|| TextInput::Provided(default.to_string())))
    }
}

/// Accepts the offered defaults unless scripted answers are queued.
pub struct MockPkgInteraction {
    responses: Mutex<VecDeque<PackageAnswersInput>>,
    prompts: Mutex<Vec<PackagePrompt>>,
}

impl MockPkgInteraction {
    #[must_use]
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_responses(self, responses: Vec<PackageAnswersInput>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            ..self
        }
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn prompts(&self) -> Vec<PackagePrompt> {
        self.prompts.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockPkgInteraction {
    fn default() -> Self {
        Self::new()
    }
}

impl PkgInteraction for MockPkgInteraction {
    fn ask_package(&self, prompt: &PackagePrompt) -> Result<PackageAnswersInput> {
        self.prompts
            .lock()
            .expect("lock poisoned")
            .push(prompt.clone());
        Ok(self
            .responses
            .lock()
            .expect("lock poisoned")
            .pop_front()
            .unwrap_or_else(|| PackageAnswersInput::Provided(prompt.defaults.clone())))
    }
}

pub struct MockBundler {
    fail_entry: Option<String>,
    calls: Mutex<Vec<(Vec<BundleJob>, bool)>>,
}

impl MockBundler {
    #[must_use]
    pub fn new() -> Self {
        Self {
            fail_entry: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn failing_on(mut self, entry: &str) -> Self {
        self.fail_entry = Some(entry.to_string());
        self
    }

    /// Recorded `(jobs, watch)` per call.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<(Vec<BundleJob>, bool)> {
        self.calls.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockBundler {
    fn default() -> Self {
        Self::new()
    }
}

impl Bundler for MockBundler {
    fn bundle(&self, _project_root: &Path, jobs: &[BundleJob], watch: bool) -> Result<()> {
        self.calls
            .lock()
            .expect("lock poisoned")
            .push((jobs.to_vec(), watch));
        match &self.fail_entry {
            Some(entry) if jobs.iter().any(|job| &job.entry == entry) => {
                Err(OperationError::BundleFailed {
                    entry: entry.clone(),
                    code: Some(1),
                })
            }
            _ => Ok(()),
        }
    }
}
