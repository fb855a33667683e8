mod esbuild;
mod external_runner;
mod git;
mod registry;

pub use esbuild::EsbuildBundler;
pub use external_runner::ExternalCommitRunner;
pub use git::Git2Provider;
pub use registry::NpmRegistry;
