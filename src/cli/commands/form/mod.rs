pub mod handler;

use clap::{Args, Subcommand};

pub use handler::handle_form_command;

#[derive(Args)]
pub struct FormCommands {
    #[command(subcommand)]
    pub command: FormSubcommands,
}

#[derive(Subcommand)]
pub enum FormSubcommands {
    /// Fill in the form interactively and submit the answers
    Fill {
        /// Override the configured script URL
        #[arg(long)]
        url: Option<String>,

        /// Validate and print the payload without submitting
        #[arg(long)]
        dry: bool,
    },
    /// Show the form structure without filling it in
    Show {
        /// Override the configured script URL
        #[arg(long)]
        url: Option<String>,

        /// Preview which questions are hidden for this group
        #[arg(long)]
        group: Option<String>,
    },
}
