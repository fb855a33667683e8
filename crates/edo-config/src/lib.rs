mod config;
mod env;
mod error;
mod file;
mod resolve;

pub use config::{
    BuildConfig, CommandKind, CommitConfig, DEFAULT_CONFIG_NAME, DEFAULT_REMOTE, InitConfig,
    LibraryConfig, LibraryFormat, PushAuthFailure, ResolvedConfig, Sourcemap,
};
pub use env::{LoadedEnv, load_env};
pub use error::ConfigError;
pub use resolve::{ConfigFileChoice, InlineConfig, resolve_config, resolve_config_with_env};
pub use secrecy::{ExposeSecret, SecretString};

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Config file looked up in the project root when no explicit file is given.
pub const DEFAULT_CONFIG_FILE: &str = "edo.config.toml";

/// Prefix of environment variables exposed to the tool.
pub const DEFAULT_ENV_PREFIX: &str = "EDO_";
