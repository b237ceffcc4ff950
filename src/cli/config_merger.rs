//! Configuration merger for CLI arguments and config files
//!
//! CLI argument overrides take precedence over file-based configuration.

use std::path::Path;

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Environment, Settings};

/// Applies CLI overrides on top of loaded settings.
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Loads the base configuration.
    ///
    /// With `config_path`, only that file (plus environment variables) is
    /// read; otherwise the layered loader is used with `environment` choosing
    /// the `{environment}.toml` layer.
    pub fn load(config_path: Option<&Path>, environment: Environment) -> Result<Self, ConfigError> {
        let loader = match config_path {
            Some(path) => ConfigLoader::from_file(path),
            None => ConfigLoader::new()?,
        };

        let config = loader.with_environment(environment).load()?;
        Ok(Self::new(config))
    }

    /// Returns a copy of the base configuration with CLI overrides applied
    /// and validated.
    ///
    /// `serve --log-level` beats `--verbose`/`--quiet`, which beat the files.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        Self::apply_global_overrides(&mut config, cli);

        if let Some(ref command) = cli.command {
            Self::apply_command_overrides(&mut config, command);
        }

        config.validate()?;

        Ok(config)
    }

    fn apply_global_overrides(config: &mut Settings, cli: &Cli) {
        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }
    }

    fn apply_command_overrides(config: &mut Settings, command: &Commands) {
        match command {
            Commands::Serve {
                host,
                port,
                log_level,
                dry_run: _,
            } => {
                if let Some(host_addr) = host {
                    config.server.host = host_addr.clone();
                }

                if let Some(port_num) = port {
                    config.server.port = *port_num;
                }

                if let Some(level) = log_level {
                    config.logger.level = (*level).into();
                }
            }
        }
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}
