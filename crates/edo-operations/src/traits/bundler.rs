use std::fmt;
use std::path::{Path, PathBuf};

use edo_config::Sourcemap;

use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleFormat {
    Esm,
    Cjs,
    Iife,
}

impl BundleFormat {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Esm => "esm",
            Self::Cjs => "cjs",
            Self::Iife => "iife",
        }
    }
}

impl fmt::Display for BundleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleOutput {
    File(PathBuf),
    Dir(PathBuf),
}

/// One bundler invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleJob {
    pub entry: String,
    pub output: BundleOutput,
    pub format: Option<BundleFormat>,
    pub global_name: Option<String>,
    pub sourcemap: Sourcemap,
    pub minify: bool,
    pub platform: Option<String>,
    /// Directory for emitted assets, relative to the output directory.
    pub assets_dir: Option<PathBuf>,
}

pub trait Bundler: Send + Sync {
    /// Runs every job. In watch mode all jobs are started before waiting.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundler cannot be found or a job fails.
    fn bundle(&self, project_root: &Path, jobs: &[BundleJob], watch: bool) -> Result<()>;
}
