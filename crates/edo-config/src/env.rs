use std::collections::BTreeMap;
use std::path::Path;

use crate::{ConfigError, Result};

const NODE_ENV: &str = "NODE_ENV";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadedEnv {
    /// Variables whose name starts with one of the configured prefixes.
    pub vars: BTreeMap<String, String>,
    /// `NODE_ENV` as declared by an env file, if any.
    pub node_env: Option<String>,
}

fn env_files(mode: &str) -> [String; 4] {
    [
        format!(".env.{mode}.local"),
        format!(".env.{mode}"),
        ".env.local".to_string(),
        ".env".to_string(),
    ]
}

fn has_prefix(key: &str, prefixes: &[String]) -> bool {
    prefixes
        .iter()
        .any(|prefix| !prefix.is_empty() && key.starts_with(prefix.as_str()))
}

/// Collects prefixed variables from the process environment and, when
/// `env_dir` is given, the env files it contains.
///
/// Files are read from most to least specific. The first definition of a
/// key wins and process variables win over every file.
///
/// # Errors
///
/// Returns [`ConfigError::ReservedMode`] for the mode `local` and
/// [`ConfigError::EnvFile`] if an existing env file cannot be parsed.
pub fn load_env(
    mode: &str,
    env_dir: Option<&Path>,
    prefixes: &[String],
    process_vars: impl IntoIterator<Item = (String, String)>,
) -> Result<LoadedEnv> {
    if mode == "local" {
        return Err(ConfigError::ReservedMode);
    }
    if prefixes.iter().any(String::is_empty) {
        tracing::warn!(
            "env_prefix should not be empty; it would expose every env variable to the tool"
        );
    }

    let mut loaded = LoadedEnv::default();
    for (key, value) in process_vars {
        if has_prefix(&key, prefixes) {
            loaded.vars.entry(key).or_insert(value);
        }
    }

    let Some(env_dir) = env_dir else {
        return Ok(loaded);
    };
    for file in env_files(mode) {
        let path = env_dir.join(&file);
        if !path.is_file() {
            continue;
        }
        tracing::debug!(path = %path.display(), "loading env file");

        let entries = dotenvy::from_path_iter(&path).map_err(|source| ConfigError::EnvFile {
            path: path.clone(),
            source,
        })?;
        for entry in entries {
            let (key, value) = entry.map_err(|source| ConfigError::EnvFile {
                path: path.clone(),
                source,
            })?;
            if has_prefix(&key, prefixes) {
                loaded.vars.entry(key).or_insert(value);
            } else if key == NODE_ENV && loaded.node_env.is_none() {
                loaded.node_env = Some(value);
            }
        }
    }

    Ok(loaded)
}
