mod commands;
mod environment;
mod error;
mod interaction;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use edo_config::{ConfigFileChoice, InlineConfig, resolve_config};

use crate::commands::Commands;
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "edo-tools")]
#[command(version = env!("EDO_TOOLS_VERSION"))]
#[command(about = "Commit, scaffold, normalize and build JavaScript projects", long_about = None)]
struct Cli {
    /// Config file to load instead of edo.config.toml in the project root
    #[arg(long, short = 'c', global = true, conflicts_with = "no_config")]
    config: Option<PathBuf>,

    /// Do not load any config file
    #[arg(long, global = true)]
    no_config: bool,

    /// Do not read .env files
    #[arg(long, global = true)]
    no_env_file: bool,

    /// Project root (default: current directory)
    #[arg(long = "path", short = 'C', global = true)]
    path: Option<PathBuf>,

    /// Mode used to select env files and config overrides
    #[arg(long, short = 'm', global = true)]
    mode: Option<String>,

    /// Log at debug level
    #[arg(long, short = 'd', global = true)]
    debug: bool,

    /// Log filter, e.g. `warn` or `edo_operations=debug`
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn inline_config(&self) -> InlineConfig {
        let mut inline = InlineConfig::new(self.command.kind());
        inline.root.clone_from(&self.path);
        inline.mode.clone_from(&self.mode);
        inline.log_level.clone_from(&self.log_level);
        inline.env_file = !self.no_env_file;
        inline.config_file = match (&self.config, self.no_config) {
            (_, true) => ConfigFileChoice::Disabled,
            (Some(path), false) => ConfigFileChoice::Path(path.clone()),
            (None, false) => ConfigFileChoice::Discover,
        };
        self.command.apply_inline(&mut inline);
        inline
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = logging::initial_level(
        cli.debug,
        cli.log_level.as_deref(),
        std::env::var("EDO_LOG_LEVEL").ok(),
    );
    let log_handle = logging::init(&level);

    let config = match resolve_config(cli.inline_config()) {
        Ok(config) => config,
        Err(e) => {
            print_error(&e.into());
            return ExitCode::FAILURE;
        }
    };
    if !cli.debug {
        if let Some(level) = &config.log_level {
            log_handle.set_level(level);
        }
    }
    tracing::debug!(
        command = %config.command,
        root = %config.root.display(),
        mode = %config.mode,
        "configuration resolved"
    );

    match cli.command.execute(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn print_error(error: &CliError) {
    eprintln!("error: {error}");

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("caused by: {cause}");
        source = std::error::Error::source(cause);
    }
}
