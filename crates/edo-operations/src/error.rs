use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Git(#[from] edo_git::GitError),

    #[error(transparent)]
    Config(#[from] edo_config::ConfigError),

    #[error(transparent)]
    Manifest(#[from] edo_manifest::ManifestError),

    #[error(transparent)]
    Template(#[from] edo_template::TemplateError),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("operation cancelled")]
    Cancelled,

    #[error("interaction required but not available in this environment")]
    InteractionRequired,

    #[error("commit subject cannot be empty")]
    EmptySubject,

    #[error("commit command is empty")]
    EmptyCommitCommand,

    #[error("failed to start commit command '{program}'")]
    CommitProcessSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("commit command exited with code {code}")]
    CommitProcessFailed { code: i32 },

    #[error("commit command was terminated without an exit code")]
    CommitProcessTerminated,

    #[error("commit command did not finish within {seconds}s")]
    CommitProcessTimedOut { seconds: u64 },

    #[error("push authentication failed: {message}")]
    PushAuthFailed { message: String },

    #[error("push rejected: {message}")]
    PushRejected { message: String },

    #[error("failed to initialize HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("request to '{url}' failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to '{url}' returned HTTP {status}")]
    RegistryStatus { url: String, status: u16 },

    #[error("invalid registry URL '{url}'")]
    InvalidRegistryUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("package '{package}' has no dist.tarball in the registry")]
    MissingTarball { package: String },

    #[error("package '{package}' should contain a boilerplate mapping")]
    MissingBoilerplateMapping { package: String },

    #[error("template directory '{path}' does not exist")]
    TemplateNotFound { path: PathBuf },

    #[error("'{path}' cannot be used as target directory: {reason}")]
    InvalidTargetDir { path: PathBuf, reason: String },

    #[error("name is required")]
    NameRequired,

    #[error("no package.json found in '{path}'")]
    NoPackageJson { path: PathBuf },

    #[error("multiple library entries require each to set out_dir")]
    LibraryOutDirRequired,

    #[error("library '{entry}' needs a name; set build.lib.name or package.json name")]
    MissingLibraryName { entry: String },

    #[error("format 'iife' requires build.lib.name for '{entry}'")]
    IifeRequiresName { entry: String },

    #[error("format '{format}' is not supported by the bundler")]
    UnsupportedFormat { format: String },

    #[error("nothing to build: set build.entry or build.lib")]
    NoBuildEntry,

    #[error("esbuild executable not found in node_modules/.bin or PATH")]
    BundlerNotFound,

    #[error("failed to start bundler '{program}'")]
    BundlerSpawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("bundler failed for '{entry}'{}", code.map(|c| format!(" with exit code {c}")).unwrap_or_default())]
    BundleFailed { entry: String, code: Option<i32> },
}

pub type Result<T> = std::result::Result<T, OperationError>;
