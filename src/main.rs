use anyhow::Result;
use clap::Parser;
use log::info;

use forms_cli::cli::{Cli, Commands};
use forms_cli::cli::commands;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    info!("Starting forms-cli");

    match cli.command {
        Commands::Form(args) => commands::handle_form_command(args).await,
        Commands::Responses(args) => commands::handle_responses_command(args).await,
        Commands::Config(args) => commands::handle_config_command(args).await,
    }
}
