use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::{EnvFilter, Registry, fmt, reload};

const DEFAULT_LEVEL: &str = "info";

/// Changes the log filter after the subscriber is installed.
pub struct LogHandle {
    handle: reload::Handle<EnvFilter, Registry>,
}

impl LogHandle {
    pub fn set_level(&self, level: &str) {
        let Some(filter) = parse_filter(level) else {
            return;
        };
        if let Err(err) = self.handle.reload(filter) {
            tracing::warn!(%err, "failed to change log level");
        } else {
            tracing::debug!(level, "log level changed");
        }
    }
}

/// Level used before the configuration is resolved: `--debug`, then
/// `--log-level`, then `EDO_LOG_LEVEL`, then `info`.
pub fn initial_level(debug: bool, log_level: Option<&str>, env_level: Option<String>) -> String {
    if debug {
        return "debug".to_string();
    }
    log_level
        .map(str::to_string)
        .or(env_level)
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string())
}

/// Installs the stderr subscriber.
pub fn init(level: &str) -> LogHandle {
    let filter = parse_filter(level).unwrap_or_else(|| EnvFilter::new(DEFAULT_LEVEL));
    let (filter, handle) = reload::Layer::new(filter);

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
    if let Err(err) = installed {
        eprintln!("warning: logging disabled: {err}");
    }

    LogHandle { handle }
}

fn parse_filter(level: &str) -> Option<EnvFilter> {
    match EnvFilter::try_new(level) {
        Ok(filter) => Some(filter),
        Err(err) => {
            eprintln!("warning: ignoring invalid log level '{level}': {err}");
            None
        }
    }
}
