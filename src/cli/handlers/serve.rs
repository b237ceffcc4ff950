//! Serve command handler
//!
//! Handles the serve command: dry-run validation or server startup.

use crate::config::{Environment, Settings};
use crate::server::Server;

pub struct ServeCommandHandler {
    config: Settings,
    environment: Environment,
}

impl ServeCommandHandler {
    pub fn new(config: Settings, environment: Environment) -> Self {
        Self {
            config,
            environment,
        }
    }

    /// Validates and exits when `dry_run` is set, otherwise runs the server
    /// until shutdown.
    pub async fn execute(self, dry_run: bool) -> anyhow::Result<()> {
        if dry_run {
            self.validate_only()
        } else {
            Server::new(self.config, self.environment).run().await
        }
    }

    /// Runs every startup check without binding a socket.
    pub fn validate_only(&self) -> anyhow::Result<()> {
        self.config.validate()?;
        println!("✓ Configuration is valid");

        self.config.jwt.validate()?;
        println!("✓ JWT secret is configured");

        println!("✓ Server would bind to: {}", self.config.server.address());
        println!("✓ Environment: {}", self.environment);
        println!("Dry run completed successfully - configuration is ready for deployment");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
