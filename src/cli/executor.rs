//! Command executor for dispatching CLI commands

use super::handlers::ServeCommandHandler;
use super::parser::{Cli, Commands};
use crate::config::Settings;

/// Dispatches the parsed command. No subcommand means `serve`.
pub async fn execute_command(cli: &Cli, settings: Settings) -> anyhow::Result<()> {
    let environment = cli.environment();

    match &cli.command {
        Some(Commands::Serve { dry_run, .. }) => {
            ServeCommandHandler::new(settings, environment)
                .execute(*dry_run)
                .await
        }
        None => {
            ServeCommandHandler::new(settings, environment)
                .execute(false)
                .await
        }
    }
}
