use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("failed to walk template directory")]
    Walk(#[from] walkdir::Error),

    #[error("failed to read '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{path}'")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template '{path}' does not contain a boilerplate directory")]
    MissingBoilerplate { path: PathBuf },

    #[error("failed to extract archive into '{path}'")]
    Archive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse questions at '{path}'")]
    Questions {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
