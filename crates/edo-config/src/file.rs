use std::path::{Path, PathBuf};

use edo_manifest::PackageManager;
use secrecy::SecretString;
use serde::Deserialize;

use crate::config::{CommandKind, LibraryFormat, PushAuthFailure};
use crate::{ConfigError, Result};

const MODES_TABLE: &str = "modes";
const COMMANDS_TABLE: &str = "commands";

/// Contents of `edo.config.toml` after mode and command overrides are applied.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) struct ConfigFile {
    pub(crate) root: Option<PathBuf>,
    pub(crate) mode: Option<String>,
    pub(crate) env_dir: Option<PathBuf>,
    pub(crate) env_prefix: Option<EnvPrefix>,
    pub(crate) log_level: Option<String>,
    pub(crate) package_manager: Option<PackageManager>,
    pub(crate) config_name: Option<String>,
    pub(crate) registry: Option<String>,
    pub(crate) cache_dir: Option<PathBuf>,
    #[serde(default)]
    pub(crate) commit: CommitSection,
    #[serde(default)]
    pub(crate) build: BuildSection,
    #[serde(default)]
    pub(crate) init: InitSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum EnvPrefix {
    Single(String),
    Many(Vec<String>),
}

impl EnvPrefix {
    pub(crate) fn into_vec(self) -> Vec<String> {
        match self {
            Self::Single(prefix) => vec![prefix],
            Self::Many(prefixes) => prefixes,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CommitSection {
    pub(crate) all: Option<bool>,
    pub(crate) remote: Option<String>,
    pub(crate) token: Option<SecretString>,
    pub(crate) push_auth_failure: Option<PushAuthFailure>,
    pub(crate) command: Option<Vec<String>>,
    pub(crate) timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BuildSection {
    pub(crate) out_dir: Option<PathBuf>,
    pub(crate) assets_dir: Option<PathBuf>,
    pub(crate) sourcemap: Option<SourcemapValue>,
    pub(crate) empty_out_dir: Option<bool>,
    pub(crate) minify: Option<bool>,
    pub(crate) watch: Option<bool>,
    pub(crate) platform: Option<String>,
    pub(crate) entry: Option<Vec<String>>,
    pub(crate) lib: Option<Vec<LibSection>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum SourcemapValue {
    Flag(bool),
    Mode(String),
}

#[derive(Debug, Deserialize)]
pub(crate) struct LibSection {
    pub(crate) entry: String,
    pub(crate) formats: Option<Vec<LibraryFormat>>,
    pub(crate) name: Option<String>,
    pub(crate) out_dir: Option<PathBuf>,
    pub(crate) file_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct InitSection {
    pub(crate) force: Option<bool>,
    pub(crate) silent: Option<bool>,
    #[serde(rename = "type")]
    pub(crate) kind: Option<String>,
    pub(crate) template: Option<PathBuf>,
    pub(crate) package: Option<String>,
}

/// Reads `path` and applies `[modes.<mode>]` then `[commands.<command>]`
/// over the base table.
pub(crate) fn load_config_file(
    path: &Path,
    mode: Option<&str>,
    command: CommandKind,
) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ConfigFileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config_file(&content, mode, command).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn parse_config_file(
    content: &str,
    mode: Option<&str>,
    command: CommandKind,
) -> std::result::Result<ConfigFile, toml::de::Error> {
    let mut table: toml::Table = toml::from_str(content)?;
    let mode = mode
        .or_else(|| table.get("mode").and_then(toml::Value::as_str))
        .unwrap_or(command.default_mode())
        .to_string();
    let modes = take_table(&mut table, MODES_TABLE);
    let commands = take_table(&mut table, COMMANDS_TABLE);

    for (overrides, key) in [(modes, mode.as_str()), (commands, command.as_str())] {
        if let Some(toml::Value::Table(overlay)) = overrides.and_then(|mut t| t.remove(key)) {
            merge_tables(&mut table, overlay);
        }
    }

    toml::Value::Table(table).try_into()
}

fn take_table(table: &mut toml::Table, key: &str) -> Option<toml::Table> {
    match table.remove(key) {
        Some(toml::Value::Table(inner)) => Some(inner),
        _ => None,
    }
}

/// Nested tables merge key by key; any other value replaces the base value.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
