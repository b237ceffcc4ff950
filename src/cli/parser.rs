//! CLI argument parsing with clap
//!
//! Defines the command-line interface structure, including all commands,
//! arguments, and their documentation.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// User management HTTP service
#[derive(Parser, Debug)]
#[command(name = "user-api")]
#[command(about = "User management HTTP service")]
#[command(long_about = "
user-api serves user creation, lookup, login and token refresh over HTTP
with JSON bodies. Configuration is layered from TOML files and USER_API_*
environment variables; the JWT secret must be supplied through
USER_API_JWT__SECRET or a configuration file.

EXAMPLES:
    # Start the server with default configuration
    user-api serve

    # Start server on custom host and port
    user-api serve --host 0.0.0.0 --port 8080

    # Use custom configuration file
    user-api --config /path/to/config.toml serve

    # Use the production configuration layer with verbose logging
    user-api --env production --verbose serve

    # Check configuration without starting server
    user-api serve --dry-run
")]
#[command(version = crate::pkg_version(), long_version = crate::clap_long_version())]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Load a single TOML file instead of the layered configuration
    /// directory. Environment variable overrides still apply.
    ///
    /// Example: --config /etc/user-api/production.toml
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `{environment}.toml` layer is loaded, taking precedence
    /// over USER_API_APP_ENV.
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server (default)
    ///
    /// Examples:
    ///   user-api serve                           # Start with defaults
    ///   user-api serve --host 0.0.0.0 --port 80 # Bind to all interfaces on port 80
    ///   user-api serve --dry-run                 # Validate config without starting
    Serve {
        /// Host address to bind to
        ///
        /// Default: 127.0.0.1
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on
        ///
        /// Default: 3000
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override
        ///
        /// Takes precedence over configuration files and --verbose/--quiet.
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration (including the JWT secret) and exit
        #[arg(long)]
        dry_run: bool,
    },
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl Cli {
    /// The configuration environment: `--env` if given, else `USER_API_APP_ENV`.
    pub fn environment(&self) -> crate::config::Environment {
        self.env
            .map(Into::into)
            .unwrap_or_else(crate::config::Environment::from_env)
    }

    /// Whether `serve --dry-run` was requested
    pub fn is_dry_run(&self) -> bool {
        matches!(self.command, Some(Commands::Serve { dry_run: true, .. }))
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => "error".to_string(),
            LogLevel::Warn => "warn".to_string(),
            LogLevel::Info => "info".to_string(),
            LogLevel::Debug => "debug".to_string(),
            LogLevel::Trace => "trace".to_string(),
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}
