//! Server configuration module

use clap::Parser;

use crate::config::{
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;

pub(crate) use observability::LogFormat;

/// Unicart JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "unicart-json", about = "Unicart JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Metrics and request logging settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_only_database_url_is_given() -> Result<(), clap::Error> {
        let config = ServerConfig::try_parse_from([
            "unicart-json",
            "--database-url",
            "postgres://localhost/unicart",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8698");
        assert_eq!(config.database.database_max_connections, 10);
        assert!(!config.database.skip_migrations);
        assert!(config.observability.metrics_enabled);
        assert_eq!(config.observability.slow_request_threshold_ms, 1_000);

        Ok(())
    }

    #[test]
    fn flags_override_defaults() -> Result<(), clap::Error> {
        let config = ServerConfig::try_parse_from([
            "unicart-json",
            "--database-url",
            "postgres://localhost/unicart",
            "--port",
            "9000",
            "--skip-migrations",
            "--log-format",
            "json",
            "--metrics-enabled",
            "false",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:9000");
        assert!(config.database.skip_migrations);
        assert!(matches!(config.logging.log_format, LogFormat::Json));
        assert!(!config.observability.metrics_enabled);

        Ok(())
    }
}
