use std::path::{Path, PathBuf};

use edo_manifest::PackageManager;
use secrecy::SecretString;

use crate::config::{
    CommandKind, DEFAULT_CONFIG_NAME, ResolvedConfig, build_build_config, build_commit_config,
    build_init_config,
};
use crate::env::{LoadedEnv, load_env};
use crate::file::{ConfigFile, EnvPrefix, load_config_file};
use crate::{ConfigError, DEFAULT_CONFIG_FILE, DEFAULT_ENV_PREFIX, Result};

const LOG_LEVEL_VAR: &str = "EDO_LOG_LEVEL";
const REGISTRY_VAR: &str = "EDO_REGISTRY";
const GIT_TOKEN_VAR: &str = "EDO_GIT_TOKEN";
const GIT_REMOTE_VAR: &str = "EDO_GIT_REMOTE";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigFileChoice {
    /// Use `edo.config.toml` in the root directory when present.
    #[default]
    Discover,
    Path(PathBuf),
    Disabled,
}

/// Values given on the command line. They take precedence over everything else.
#[derive(Debug, Clone)]
pub struct InlineConfig {
    pub command: CommandKind,
    pub root: Option<PathBuf>,
    pub mode: Option<String>,
    pub config_file: ConfigFileChoice,
    pub env_file: bool,
    pub log_level: Option<String>,
    pub registry: Option<String>,
    pub package_manager: Option<PackageManager>,
}

impl InlineConfig {
    #[must_use]
    pub fn new(command: CommandKind) -> Self {
        Self {
            command,
            root: None,
            mode: None,
            config_file: ConfigFileChoice::default(),
            env_file: true,
            log_level: None,
            registry: None,
            package_manager: None,
        }
    }
}

/// Resolves the configuration against the current process environment.
///
/// # Errors
///
/// See [`resolve_config_with_env`].
pub fn resolve_config(inline: InlineConfig) -> Result<ResolvedConfig> {
    let process_vars = std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)));
    resolve_config_with_env(inline, process_vars)
}

/// Resolves the configuration with `process_vars` standing in for the
/// process environment.
///
/// # Errors
///
/// Returns an error if an explicitly given config file is missing, the
/// config or an env file fails to parse, or the mode is `local`.
pub fn resolve_config_with_env(
    inline: InlineConfig,
    process_vars: impl IntoIterator<Item = (String, String)>,
) -> Result<ResolvedConfig> {
    let cwd = std::env::current_dir()?;
    let start_root = inline
        .root
        .as_deref()
        .map_or_else(|| cwd.clone(), |root| absolutize(&cwd, root));

    let config_file = match &inline.config_file {
        ConfigFileChoice::Disabled => None,
        ConfigFileChoice::Path(path) => {
            let path = absolutize(&cwd, path);
            if !path.is_file() {
                return Err(ConfigError::ConfigFileNotFound { path });
            }
            Some(path)
        }
        ConfigFileChoice::Discover => {
            let candidate = start_root.join(DEFAULT_CONFIG_FILE);
            if candidate.is_file() {
                Some(candidate)
            } else {
                tracing::debug!(root = %start_root.display(), "no config file found");
                None
            }
        }
    };

    let file = match &config_file {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config file");
            load_config_file(path, inline.mode.as_deref(), inline.command)?
        }
        None => ConfigFile::default(),
    };

    let root = match (&inline.root, &file.root) {
        (None, Some(file_root)) => absolutize(&start_root, file_root),
        _ => start_root,
    };
    let mode = inline
        .mode
        .or(file.mode)
        .unwrap_or_else(|| inline.command.default_mode().to_string());
    if mode == "local" {
        return Err(ConfigError::ReservedMode);
    }

    let prefixes = file
        .env_prefix
        .map_or_else(|| vec![DEFAULT_ENV_PREFIX.to_string()], EnvPrefix::into_vec);
    let env_dir = inline.env_file.then(|| {
        file.env_dir
            .as_deref()
            .map_or_else(|| root.clone(), |dir| absolutize(&root, dir))
    });
    let LoadedEnv { vars, node_env } =
        load_env(&mode, env_dir.as_deref(), &prefixes, process_vars)?;
    let is_production = node_env.as_deref().unwrap_or(&mode) == "production";

    let mut commit = build_commit_config(file.commit);
    if let Some(token) = vars.get(GIT_TOKEN_VAR) {
        commit.token = Some(SecretString::from(token.clone()));
    }
    if let Some(remote) = vars.get(GIT_REMOTE_VAR) {
        commit.remote.clone_from(remote);
    }

    let resolved = ResolvedConfig {
        command: inline.command,
        log_level: inline
            .log_level
            .or_else(|| vars.get(LOG_LEVEL_VAR).cloned())
            .or(file.log_level),
        registry: inline
            .registry
            .or_else(|| vars.get(REGISTRY_VAR).cloned())
            .or(file.registry),
        package_manager: inline.package_manager.or(file.package_manager),
        config_name: file
            .config_name
            .unwrap_or_else(|| DEFAULT_CONFIG_NAME.to_string()),
        cache_dir: file.cache_dir.map(|dir| absolutize(&root, &dir)),
        commit,
        build: build_build_config(file.build)?,
        init: build_init_config(file.init),
        env: vars,
        root,
        mode,
        is_production,
        config_file,
    };
    tracing::debug!(
        root = %resolved.root.display(),
        mode = %resolved.mode,
        production = resolved.is_production,
        "resolved config"
    );
    Ok(resolved)
}

fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
