use std::path::{Path, PathBuf};

use edo_manifest::{PackageManager, WorkspacePackage, detect_package_manager, discover_workspace_packages};
use serde_json::{Map, Value, json};

use crate::Result;
use crate::error::OperationError;
use crate::traits::{GitProvider, PackageAnswers, PackageAnswersInput, PackagePrompt, PkgInteraction};

const DEFAULT_LICENSE: &str = "MIT";
const GITHUB_SSH_PREFIX: &str = "git@github.com:";
const GITHUB_HTTPS_PREFIX: &str = "https://github.com/";

#[derive(Debug, Clone)]
pub struct PkgInput {
    /// Skips lockfile detection when set.
    pub package_manager: Option<PackageManager>,
    pub remote: String,
}

impl Default for PkgInput {
    fn default() -> Self {
        Self {
            package_manager: None,
            remote: edo_config::DEFAULT_REMOTE.to_string(),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum PkgOutcome {
    Updated {
        package_manager: PackageManager,
        /// Rewritten manifests, root first.
        manifests: Vec<PathBuf>,
    },
    Cancelled,
}

pub struct PkgOperation<G, I> {
    git: G,
    interaction: I,
}

impl<G, I> PkgOperation<G, I>
where
    G: GitProvider,
    I: PkgInteraction,
{
    pub fn new(git: G, interaction: I) -> Self {
        Self { git, interaction }
    }

    /// Completes and sorts every workspace `package.json`, asking for the
    /// metadata of each package in turn.
    ///
    /// # Errors
    ///
    /// Returns an error if no manifest exists, a manifest cannot be read or
    /// written, or the interaction fails.
    pub fn execute(&self, project_root: &Path, input: &PkgInput) -> Result<PkgOutcome> {
        let package_manager = input
            .package_manager
            .unwrap_or_else(|| detect_package_manager(project_root));
        tracing::info!(%package_manager, "package manager");

        let packages = discover_workspace_packages(project_root, package_manager)?;
        if packages.is_empty() {
            return Err(OperationError::NoPackageJson {
                path: project_root.to_path_buf(),
            });
        }

        let remote = match self.git.remote_url(project_root, &input.remote) {
            Ok(remote) => remote,
            Err(err) => {
                tracing::warn!(error = %err, "cannot read git remote, repository fields skipped");
                None
            }
        };

        let mut previous = PackageAnswers::default();
        let mut manifests = Vec::with_capacity(packages.len());
        for package in packages {
            let prompt = build_prompt(&package, remote.as_deref(), &previous);
            let answers = match self.interaction.ask_package(&prompt)? {
                PackageAnswersInput::Provided(answers) => answers,
                PackageAnswersInput::Cancelled => return Ok(PkgOutcome::Cancelled),
            };

            let mut manifest = package.manifest;
            apply_answers(
                &mut manifest,
                &answers,
                remote.as_deref(),
                &package.relative_dir,
            );
            manifest.write()?;
            manifests.push(manifest.path().to_path_buf());
            previous = answers;
        }

        Ok(PkgOutcome::Updated {
            package_manager,
            manifests,
        })
    }
}

fn build_prompt(
    package: &WorkspacePackage,
    remote: Option<&str>,
    previous: &PackageAnswers,
) -> PackagePrompt {
    let manifest = &package.manifest;
    let existing = |key: &str| manifest.str_field(key).filter(|v| !v.is_empty());
    let fallback = |value: &str| (!value.is_empty()).then(|| value.to_string());

    let homepage = existing("homepage")
        .map(String::from)
        .or_else(|| remote.map(|url| default_homepage(url, &package.relative_dir)))
        .unwrap_or_default();
    let bugs = manifest
        .bugs_url()
        .map(String::from)
        .or_else(|| remote.map(|url| format!("{}/issues", strip_git_suffix(url))))
        .unwrap_or_default();

    PackagePrompt {
        package_name: manifest
            .name()
            .map_or_else(|| package.relative_dir.display().to_string(), String::from),
        defaults: PackageAnswers {
            private: manifest.bool_field("private").unwrap_or(false),
            author: existing("author")
                .map(String::from)
                .or_else(|| fallback(&previous.author))
                .unwrap_or_default(),
            license: existing("license")
                .map(String::from)
                .or_else(|| fallback(&previous.license))
                .unwrap_or_else(|| DEFAULT_LICENSE.to_string()),
            homepage: normalize_github(&homepage),
            bugs: normalize_github(&bugs),
        },
    }
}

fn apply_answers(
    manifest: &mut edo_manifest::PackageJson,
    answers: &PackageAnswers,
    remote: Option<&str>,
    relative_dir: &Path,
) {
    manifest.set("private", Value::Bool(answers.private));
    for (key, value) in [
        ("author", &answers.author),
        ("license", &answers.license),
        ("homepage", &answers.homepage),
    ] {
        if !value.is_empty() {
            manifest.set(key, Value::String(value.clone()));
        }
    }
    if !answers.bugs.is_empty() {
        manifest.set("bugs", json!({ "url": answers.bugs }));
    }

    if let Some(url) = remote {
        let mut repository = Map::new();
        repository.insert("type".to_string(), json!("git"));
        repository.insert("url".to_string(), json!(url));
        if !relative_dir.as_os_str().is_empty() {
            repository.insert("directory".to_string(), json!(slash_path(relative_dir)));
        }
        manifest.set("repository", Value::Object(repository));
    }
}

fn strip_git_suffix(url: &str) -> &str {
    url.strip_suffix(".git").unwrap_or(url)
}

fn slash_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn default_homepage(remote: &str, relative_dir: &Path) -> String {
    if relative_dir.as_os_str().is_empty() {
        return remote
            .strip_suffix(".git")
            .map_or_else(|| remote.to_string(), |base| format!("{base}#readme"));
    }
    format!(
        "{}/tree/main/{}#readme",
        strip_git_suffix(remote),
        slash_path(relative_dir)
    )
}

/// Rewrites GitHub SSH remotes to their https form.
#[must_use]
pub fn normalize_github(url: &str) -> String {
    url.replacen(GITHUB_SSH_PREFIX, GITHUB_HTTPS_PREFIX, 1)
}
