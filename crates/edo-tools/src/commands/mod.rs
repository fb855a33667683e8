mod build;
mod commit;
mod init;
mod pkg;

use std::path::PathBuf;

use clap::{Args, Subcommand};
use edo_config::{CommandKind, InlineConfig, ResolvedConfig};

use crate::error::Result;

#[derive(Args)]
pub(crate) struct CommitArgs {
    /// Stage every changed file without asking
    #[arg(long, short = 'a')]
    pub all: bool,

    /// Remote to push to (default: origin)
    #[arg(long)]
    pub remote: Option<String>,

    /// Fail instead of warning when the remote rejects the credentials
    #[arg(long)]
    pub strict_push: bool,
}

#[derive(Args)]
pub(crate) struct InitArgs {
    /// Directory to create the project in
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Allow a non-empty target directory
    #[arg(long, short = 'f')]
    pub force: bool,

    /// Boilerplate key from the init config package
    #[arg(long = "type", short = 't', value_name = "TYPE")]
    pub kind: Option<String>,

    /// Local template directory containing `boilerplate/`
    #[arg(long, conflicts_with = "package")]
    pub template: Option<PathBuf>,

    /// Boilerplate npm package to download
    #[arg(long, short = 'p')]
    pub package: Option<String>,

    /// Use the default answer for every question
    #[arg(long, short = 's')]
    pub silent: bool,

    /// Registry URL, or `npm` / `taobao`
    #[arg(long, short = 'r')]
    pub registry: Option<String>,
}

#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Rebuild on change
    #[arg(long, short = 'w')]
    pub watch: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Stage, commit and push changes
    Commit(CommitArgs),
    /// Create a project from a boilerplate
    Init(InitArgs),
    /// Complete and sort every package.json in the workspace
    Pkg,
    /// Bundle the project with esbuild
    Build(BuildArgs),
}

impl Commands {
    pub(crate) fn kind(&self) -> CommandKind {
        match self {
            Self::Commit(_) => CommandKind::Commit,
            Self::Init(_) => CommandKind::Init,
            Self::Pkg => CommandKind::Pkg,
            Self::Build(_) => CommandKind::Build,
        }
    }

    /// Copies command flags that take part in config resolution.
    pub(crate) fn apply_inline(&self, inline: &mut InlineConfig) {
        if let Self::Init(args) = self {
            inline.registry.clone_from(&args.registry);
        }
    }

    pub(crate) fn execute(self, config: ResolvedConfig) -> Result<()> {
        match self {
            Self::Commit(args) => commit::run(args, &config),
            Self::Init(args) => init::run(args, &config),
            Self::Pkg => pkg::run(&config),
            Self::Build(args) => build::run(args, &config),
        }
    }
}
