use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use edo_manifest::PackageManager;
use secrecy::SecretString;
use serde::Deserialize;

use crate::file::{BuildSection, CommitSection, InitSection, LibSection, SourcemapValue};
use crate::{ConfigError, Result};

pub const DEFAULT_REMOTE: &str = "origin";
pub const DEFAULT_CONFIG_NAME: &str = "@easydo/init-config";
const DEFAULT_OUT_DIR: &str = "dist";
const DEFAULT_ASSETS_DIR: &str = "assets";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Commit,
    Init,
    Pkg,
    Build,
}

impl CommandKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Commit => "commit",
            Self::Init => "init",
            Self::Pkg => "pkg",
            Self::Build => "build",
        }
    }

    /// Mode used when neither a flag nor the config file names one.
    #[must_use]
    pub fn default_mode(self) -> &'static str {
        match self {
            Self::Commit | Self::Pkg => "development",
            Self::Init | Self::Build => "production",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do when the remote rejects the push credentials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PushAuthFailure {
    #[default]
    Warn,
    Fail,
}

#[derive(Debug)]
pub struct CommitConfig {
    pub all: bool,
    pub remote: String,
    pub token: Option<SecretString>,
    pub push_auth_failure: PushAuthFailure,
    /// External program replacing the built-in conventional commit prompt.
    pub command: Option<Vec<String>>,
    pub timeout: Option<Duration>,
}

impl Default for CommitConfig {
    fn default() -> Self {
        Self {
            all: false,
            remote: DEFAULT_REMOTE.to_string(),
            token: None,
            push_auth_failure: PushAuthFailure::default(),
            command: None,
            timeout: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Sourcemap {
    #[default]
    Disabled,
    External,
    Inline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LibraryFormat {
    #[serde(alias = "es")]
    Esm,
    Cjs,
    Iife,
    Umd,
}

impl LibraryFormat {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Esm => "esm",
            Self::Cjs => "cjs",
            Self::Iife => "iife",
            Self::Umd => "umd",
        }
    }
}

impl fmt::Display for LibraryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryConfig {
    pub entry: String,
    pub formats: Vec<LibraryFormat>,
    pub name: Option<String>,
    pub out_dir: Option<PathBuf>,
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub out_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub sourcemap: Sourcemap,
    pub empty_out_dir: Option<bool>,
    pub minify: bool,
    pub watch: bool,
    pub platform: Option<String>,
    pub entry: Vec<String>,
    pub lib: Vec<LibraryConfig>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            sourcemap: Sourcemap::default(),
            empty_out_dir: None,
            minify: false,
            watch: false,
            platform: None,
            entry: Vec::new(),
            lib: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitConfig {
    pub force: bool,
    pub silent: bool,
    pub kind: Option<String>,
    pub template: Option<PathBuf>,
    pub package: Option<String>,
}

/// Configuration shared by every command, resolved once per invocation.
#[derive(Debug)]
pub struct ResolvedConfig {
    pub command: CommandKind,
    pub root: PathBuf,
    pub mode: String,
    pub is_production: bool,
    pub config_file: Option<PathBuf>,
    pub env: BTreeMap<String, String>,
    pub log_level: Option<String>,
    pub registry: Option<String>,
    pub package_manager: Option<PackageManager>,
    pub config_name: String,
    pub cache_dir: Option<PathBuf>,
    pub commit: CommitConfig,
    pub build: BuildConfig,
    pub init: InitConfig,
}

pub(crate) fn build_commit_config(section: CommitSection) -> CommitConfig {
    let defaults = CommitConfig::default();
    CommitConfig {
        all: section.all.unwrap_or(defaults.all),
        remote: section.remote.unwrap_or(defaults.remote),
        token: section.token,
        push_auth_failure: section
            .push_auth_failure
            .unwrap_or(defaults.push_auth_failure),
        command: section.command.filter(|command| !command.is_empty()),
        timeout: section.timeout_secs.map(Duration::from_secs),
    }
}

pub(crate) fn build_build_config(section: BuildSection) -> Result<BuildConfig> {
    let defaults = BuildConfig::default();
    let sourcemap = match section.sourcemap {
        None | Some(SourcemapValue::Flag(false)) => Sourcemap::Disabled,
        Some(SourcemapValue::Flag(true)) => Sourcemap::External,
        Some(SourcemapValue::Mode(mode)) => match mode.as_str() {
            "inline" => Sourcemap::Inline,
            "external" | "linked" => Sourcemap::External,
            _ => {
                return Err(ConfigError::InvalidValue {
                    key: "build.sourcemap",
                    value: mode,
                });
            }
        },
    };

    Ok(BuildConfig {
        out_dir: section.out_dir.unwrap_or(defaults.out_dir),
        assets_dir: section.assets_dir.unwrap_or(defaults.assets_dir),
        sourcemap,
        empty_out_dir: section.empty_out_dir,
        minify: section.minify.unwrap_or(defaults.minify),
        watch: section.watch.unwrap_or(defaults.watch),
        platform: section.platform,
        entry: section.entry.unwrap_or_default(),
        lib: section
            .lib
            .unwrap_or_default()
            .into_iter()
            .map(build_library_config)
            .collect(),
    })
}

fn build_library_config(section: LibSection) -> LibraryConfig {
    LibraryConfig {
        entry: section.entry,
        formats: section
            .formats
            .filter(|formats| !formats.is_empty())
            .unwrap_or_else(|| vec![LibraryFormat::Esm]),
        name: section.name,
        out_dir: section.out_dir,
        file_name: section.file_name,
    }
}

pub(crate) fn build_init_config(section: InitSection) -> InitConfig {
    InitConfig {
        force: section.force.unwrap_or(false),
        silent: section.silent.unwrap_or(false),
        kind: section.kind,
        template: section.template,
        package: section.package,
    }
}
