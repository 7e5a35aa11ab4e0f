use super::commands::config::ConfigCommands;
use super::commands::form::FormCommands;
use super::commands::responses::ResponsesCommands;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "forms-cli")]
#[command(about = "A CLI client for spreadsheet-backed dynamic forms")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fill in or inspect the dynamic form
    Form(FormCommands),
    /// Browse, summarize and export submitted responses
    Responses(ResponsesCommands),
    /// Local configuration management
    Config(ConfigCommands),
}
