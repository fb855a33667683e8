use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] edo_config::ConfigError),

    #[error(transparent)]
    Operation(#[from] edo_operations::OperationError),
}

pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use edo_operations::OperationError;

    use super::CliError;

    #[test]
    fn operation_errors_keep_their_message() {
        let err: CliError = OperationError::Cancelled.into();

        assert_eq!(err.to_string(), "operation cancelled");
    }

    #[test]
    fn config_error_keeps_the_path() {
        let config_err = edo_config::ConfigError::ConfigFileNotFound {
            path: PathBuf::from("/missing/edo.config.toml"),
        };

        let cli_err: CliError = config_err.into();

        assert!(cli_err.to_string().contains("/missing/edo.config.toml"));
        assert!(matches!(cli_err, CliError::Config(_)));
    }
}
