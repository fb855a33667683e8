use std::path::{Path, PathBuf};

use edo_manifest::{PackageJson, find_nearest_package_json};
use edo_template::{
    BOILERPLATE_DIR, Boilerplate, BoilerplateMapping, Variables, group_by_category, load_questions,
    parse_boilerplate_mapping, render_boilerplate,
};
use serde_json::Value;

use crate::Result;
use crate::error::OperationError;
use crate::traits::{ChoiceSelection, Confirmation, InitInteraction, Registry, TextInput};

pub const NPM_REGISTRY: &str = "https://registry.npmjs.org";
pub const TAOBAO_REGISTRY: &str = "https://registry.npmmirror.com";

const CACHE_DIR_NAME: &str = "edo-init-boilerplate";
const NAME_KEY: &str = "name";
const DIR_NAME_PREFIX: &str = "edo-";
const REGISTRY_ENV_VARS: [&str; 2] = ["npm_registry", "npm_config_registry"];

/// Maps the `--registry` value to a registry base URL without trailing `/`.
///
/// Aliases `taobao` and `npm` and explicit URLs are taken as is. Anything
/// else falls back to the nearest `package.json` `publishConfig.registry`,
/// the npm registry env variables, the project `.npmrc` and finally the
/// public npm registry.
pub fn resolve_registry(
    registry: Option<&str>,
    project_root: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> String {
    let url = match registry.unwrap_or_default() {
        "taobao" => TAOBAO_REGISTRY.to_string(),
        "npm" => NPM_REGISTRY.to_string(),
        value if value.starts_with("http://") || value.starts_with("https://") => {
            value.to_string()
        }
        _ => publish_registry(project_root)
            .or_else(|| REGISTRY_ENV_VARS.iter().find_map(|key| env(key)))
            .or_else(|| npmrc_registry(project_root))
            .unwrap_or_else(|| NPM_REGISTRY.to_string()),
    };
    let url = url.trim_end_matches('/').to_string();
    tracing::info!(registry = %url, "using registry");
    url
}

fn publish_registry(project_root: &Path) -> Option<String> {
    let path = find_nearest_package_json(project_root)?;
    match PackageJson::read(&path) {
        Ok(manifest) => manifest.publish_registry().map(String::from),
        Err(err) => {
            tracing::debug!(error = %err, "ignoring unreadable package.json");
            None
        }
    }
}

fn npmrc_registry(project_root: &Path) -> Option<String> {
    let content = std::fs::read_to_string(project_root.join(".npmrc")).ok()?;
    content.lines().find_map(|line| {
        let line = line.trim();
        if line.starts_with('#') || line.starts_with(';') {
            return None;
        }
        let (key, value) = line.split_once('=')?;
        (key.trim() == "registry").then(|| value.trim().to_string())
    })
}

/// Checks `dir` as a scaffolding target, creating it when missing.
///
/// Returns the reason when the directory cannot be used.
fn prepare_target_dir(dir: &Path, force: bool) -> std::result::Result<(), String> {
    if !dir.exists() {
        return std::fs::create_dir_all(dir).map_err(|err| err.to_string());
    }
    if !dir.is_dir() {
        return Err("already exists as a file".to_string());
    }

    let entries = std::fs::read_dir(dir).map_err(|err| err.to_string())?;
    let mut visible: Vec<String> = entries
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| !name.starts_with('.'))
        .collect();
    if visible.is_empty() {
        return Ok(());
    }
    if force {
        tracing::warn!(dir = %dir.display(), "target is not empty, files will be overwritten due to --force");
        return Ok(());
    }
    visible.sort();
    Err(format!("already exists and is not empty: {}", visible.join(", ")))
}

#[derive(Debug, Clone, Default)]
pub struct InitInput {
    /// Target directory; relative paths resolve against the project root.
    pub dir: PathBuf,
    pub force: bool,
    /// Boilerplate mapping key.
    pub kind: Option<String>,
    /// Local template directory containing `boilerplate/`.
    pub template: Option<PathBuf>,
    /// Boilerplate npm package, bypassing the mapping.
    pub package: Option<String>,
    pub silent: bool,
    /// Registry base URL, see [`resolve_registry`].
    pub registry: String,
    /// Package carrying the boilerplate mapping.
    pub config_name: String,
    pub cache_dir: Option<PathBuf>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum InitOutcome {
    Created {
        target_dir: PathBuf,
        /// Written files relative to `target_dir`.
        files: Vec<PathBuf>,
    },
    /// The user backed out of a boilerplate choice.
    Aborted,
}

pub struct InitOperation<R, I> {
    registry: R,
    interaction: I,
}

impl<R, I> InitOperation<R, I>
where
    R: Registry,
    I: InitInteraction,
{
    pub fn new(registry: R, interaction: I) -> Self {
        Self {
            registry,
            interaction,
        }
    }

    /// # Errors
    ///
    /// Returns an error if the target directory is unusable and no other can
    /// be asked for, the template cannot be found or downloaded, a prompt is
    /// cancelled, or rendering fails.
    pub fn execute(&self, project_root: &Path, input: &InitInput) -> Result<InitOutcome> {
        let target_dir = self.target_dir(project_root, input)?;
        tracing::info!(dir = %target_dir.display(), "target directory");

        let template_dir = match &input.template {
            Some(template) => local_template(project_root, template)?,
            None => {
                let package = match &input.package {
                    Some(package) => package.clone(),
                    None => match self.choose_boilerplate(project_root, input)? {
                        Some(boilerplate) => boilerplate.package,
                        None => return Ok(InitOutcome::Aborted),
                    },
                };
                self.download(&package, input)?
            }
        };

        let vars = self.collect_variables(&template_dir, &target_dir, input.silent)?;
        let files = render_boilerplate(&template_dir, &target_dir, &vars)?;

        Ok(InitOutcome::Created { target_dir, files })
    }

    fn target_dir(&self, project_root: &Path, input: &InitInput) -> Result<PathBuf> {
        let mut target = project_root.join(&input.dir);
        loop {
            let reason = match prepare_target_dir(&target, input.force) {
                Ok(()) => return Ok(target),
                Err(reason) => reason,
            };
            tracing::error!(dir = %target.display(), %reason, "invalid target directory");

            let initial = input.dir.to_string_lossy();
            let initial = if initial.is_empty() { "." } else { &initial };
            match self.interaction.prompt_target_dir(initial, &reason) {
                Ok(TextInput::Provided(dir)) => target = project_root.join(dir),
                Ok(TextInput::Cancelled) => return Err(OperationError::Cancelled),
                Err(OperationError::InteractionRequired) => {
                    return Err(OperationError::InvalidTargetDir {
                        path: target,
                        reason,
                    });
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn choose_boilerplate(
        &self,
        project_root: &Path,
        input: &InitInput,
    ) -> Result<Option<Boilerplate>> {
        let mapping = self.boilerplate_mapping(project_root, input)?;

        let chosen = match input.kind.as_deref().and_then(|kind| mapping.get(kind)) {
            Some(boilerplate) => Some(boilerplate.clone()),
            None => {
                if let Some(kind) = &input.kind {
                    tracing::warn!(%kind, "unknown boilerplate type, please choose one");
                }
                self.prompt_boilerplate(&mapping)?
            }
        };
        let Some(boilerplate) = chosen else {
            return Ok(None);
        };

        if boilerplate.deprecated {
            match self.interaction.confirm_deprecated(&boilerplate)? {
                Confirmation::Confirmed => {}
                Confirmation::Declined | Confirmation::Cancelled => {
                    tracing::error!(package = %boilerplate.package, "boilerplate is deprecated");
                    return Ok(None);
                }
            }
        }

        tracing::info!(name = %boilerplate.name, package = %boilerplate.package, "using boilerplate");
        Ok(Some(boilerplate))
    }

    fn boilerplate_mapping(
        &self,
        project_root: &Path,
        input: &InitInput,
    ) -> Result<BoilerplateMapping> {
        let info = match self
            .registry
            .package_info(&input.registry, &input.config_name)
        {
            Ok(info) => Some(info),
            Err(err) => {
                tracing::warn!(package = %input.config_name, error = %err, "registry unavailable, using installed fallback");
                installed_package_info(project_root, &input.config_name)
            }
        };

        info.as_ref()
            .and_then(parse_boilerplate_mapping)
            .filter(|mapping| !mapping.is_empty())
            .ok_or_else(|| OperationError::MissingBoilerplateMapping {
                package: input.config_name.clone(),
            })
    }

    fn prompt_boilerplate(&self, mapping: &BoilerplateMapping) -> Result<Option<Boilerplate>> {
        let mut groups = group_by_category(mapping);

        let group = if groups.len() > 1 {
            let names: Vec<String> = groups.keys().cloned().collect();
            match self.interaction.select_group(&names)? {
                ChoiceSelection::Selected(index) => groups.swap_remove_index(index),
                ChoiceSelection::Cancelled => return Ok(None),
            }
        } else {
            groups.swap_remove_index(0)
        };
        let Some((_, boilerplates)) = group else {
            return Ok(None);
        };

        match self.interaction.select_boilerplate(&boilerplates)? {
            ChoiceSelection::Selected(index) => Ok(boilerplates.get(index).cloned()),
            ChoiceSelection::Cancelled => Ok(None),
        }
    }

    fn download(&self, package: &str, input: &InitInput) -> Result<PathBuf> {
        let info = self.registry.package_info(&input.registry, package)?;
        let tarball = info
            .pointer("/dist/tarball")
            .and_then(Value::as_str)
            .ok_or_else(|| OperationError::MissingTarball {
                package: package.to_string(),
            })?;

        let save_dir = input
            .cache_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir)
            .join(CACHE_DIR_NAME);
        if save_dir.exists() {
            std::fs::remove_dir_all(&save_dir)?;
        }

        self.registry.download_tarball(tarball, &save_dir)?;
        tracing::info!(dir = %save_dir.display(), "boilerplate downloaded");
        Ok(save_dir.join("package"))
    }

    fn collect_variables(
        &self,
        template_dir: &Path,
        target_dir: &Path,
        silent: bool,
    ) -> Result<Variables> {
        let questions = load_questions(template_dir)?;
        let dir_name = target_dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let default_name = dir_name
            .strip_prefix(DIR_NAME_PREFIX)
            .unwrap_or(&dir_name)
            .to_string();

        let mut vars = Variables::new();
        for (key, question) in &questions {
            let mut default = question.default_answer();
            if key == NAME_KEY && default.is_empty() {
                default.clone_from(&default_name);
            }

            let value = if silent {
                default
            } else {
                match self.interaction.ask(key, question, &default)? {
                    TextInput::Provided(value) => value,
                    TextInput::Cancelled => return Err(OperationError::Cancelled),
                }
            };
            vars.insert(key.clone(), value);
        }

        if !silent
            && questions.contains_key(NAME_KEY)
            && vars.get(NAME_KEY).is_none_or(|name| name.trim().is_empty())
        {
            return Err(OperationError::NameRequired);
        }
        tracing::debug!(?vars, "boilerplate variables");
        Ok(vars)
    }
}

fn local_template(project_root: &Path, template: &Path) -> Result<PathBuf> {
    let dir = project_root.join(template);
    if !dir.is_dir() {
        return Err(OperationError::TemplateNotFound { path: dir });
    }
    if !dir.join(BOILERPLATE_DIR).is_dir() {
        return Err(edo_template::TemplateError::MissingBoilerplate { path: dir }.into());
    }
    tracing::info!(dir = %dir.display(), "using local template");
    Ok(dir)
}

fn installed_package_info(project_root: &Path, package: &str) -> Option<Value> {
    let path = project_root
        .join("node_modules")
        .join(package)
        .join(edo_manifest::PACKAGE_JSON);
    match PackageJson::read(&path) {
        Ok(manifest) => Some(Value::Object(manifest.into_fields())),
        Err(err) => {
            tracing::debug!(error = %err, "no installed fallback");
            None
        }
    }
}
