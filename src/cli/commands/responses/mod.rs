pub mod handler;

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::dashboard::FilterState;

pub use handler::handle_responses_command;

#[derive(Args)]
pub struct ResponsesCommands {
    #[command(subcommand)]
    pub command: ResponsesSubcommands,
}

#[derive(Subcommand)]
pub enum ResponsesSubcommands {
    /// Headline numbers: totals, today, groups, per-day average
    Stats {
        /// Override the configured script URL
        #[arg(long)]
        url: Option<String>,
    },
    /// List responses as a paged table
    List {
        /// Override the configured script URL
        #[arg(long)]
        url: Option<String>,

        #[command(flatten)]
        filters: FilterArgs,

        /// Sort ascending by this column (chronological for the timestamp column)
        #[arg(long)]
        sort: Option<String>,

        /// Page to show (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Responses per page (default from config)
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Export the filtered responses as CSV
    Export {
        /// Override the configured script URL
        #[arg(long)]
        url: Option<String>,

        #[command(flatten)]
        filters: FilterArgs,

        /// Sort ascending by this column before exporting
        #[arg(long)]
        sort: Option<String>,

        /// Output file (defaults to form_responses_<date>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Filter criteria shared by `list` and `export`. All criteria are ANDed.
#[derive(Args, Clone)]
pub struct FilterArgs {
    /// Keep only responses from this group
    #[arg(long)]
    pub group: Option<String>,

    /// Keep only responses on or after this day (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Keep only responses on or before this day (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Keep only responses where this column is answered
    #[arg(long)]
    pub question: Option<String>,

    /// Case-insensitive text search across all columns
    #[arg(long)]
    pub search: Option<String>,
}

impl From<FilterArgs> for FilterState {
    fn from(args: FilterArgs) -> Self {
        Self {
            group: args.group,
            date_start: args.from,
            date_end: args.to,
            question: args.question,
            search: args.search,
        }
    }
}
