use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("config file '{path}' does not exist")]
    ConfigFileNotFound { path: PathBuf },

    #[error("failed to read config file '{path}'")]
    ConfigFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}'")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to load env file '{path}'")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error(
        "\"local\" cannot be used as a mode name because it conflicts with the .local postfix for .env files"
    )]
    ReservedMode,

    #[error("invalid value '{value}' for '{key}'")]
    InvalidValue { key: &'static str, value: String },
}
