//! Local configuration commands

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::*;
use log::info;

use crate::config::Config;

#[derive(Args)]
pub struct ConfigCommands {
    #[command(subcommand)]
    pub command: ConfigSubcommands,
}

#[derive(Subcommand)]
pub enum ConfigSubcommands {
    /// Show the current configuration
    Show,
    /// Set the form script endpoint URL
    SetUrl {
        /// Base URL of the script endpoint
        url: String,
    },
    /// Change a setting (page-size, group-column, timestamp-column, group-selector)
    Set {
        /// Setting name
        key: String,
        /// New value ('none' clears group-selector)
        value: String,
    },
}

pub async fn handle_config_command(args: ConfigCommands) -> Result<()> {
    match args.command {
        ConfigSubcommands::Show => show_command(),
        ConfigSubcommands::SetUrl { url } => set_url_command(url),
        ConfigSubcommands::Set { key, value } => set_command(key, value),
    }
}

fn show_command() -> Result<()> {
    let config = Config::load()?;

    println!("Configuration ({})", Config::get_config_path()?.display());
    println!(
        "  {:<24} {}",
        "script_url:",
        config.script_url.as_deref().unwrap_or("(not set)").cyan()
    );
    println!("  {:<24} {}", "page_size:", config.settings.page_size);
    println!("  {:<24} {}", "group_column:", config.settings.group_column);
    println!(
        "  {:<24} {}",
        "timestamp_column:", config.settings.timestamp_column
    );
    println!(
        "  {:<24} {}",
        "group_selector_question:",
        config
            .settings
            .group_selector_question
            .as_deref()
            .unwrap_or("(first dropdown)")
    );
    Ok(())
}

fn set_url_command(url: String) -> Result<()> {
    let mut config = Config::load()?;
    config.set_script_url(url)?;
    println!("✅ Script URL saved.");
    Ok(())
}

fn set_command(key: String, value: String) -> Result<()> {
    let mut config = Config::load()?;

    match key.as_str() {
        "page-size" => {
            let size: usize = value.parse()?;
            if size == 0 {
                anyhow::bail!("page-size must be at least 1");
            }
            config.settings.page_size = size;
        }
        "group-column" => config.settings.group_column = value.clone(),
        "timestamp-column" => config.settings.timestamp_column = value.clone(),
        "group-selector" => {
            config.settings.group_selector_question =
                if value == "none" { None } else { Some(value.clone()) };
        }
        other => anyhow::bail!(
            "Unknown setting '{other}'. Valid keys: page-size, group-column, timestamp-column, group-selector"
        ),
    }

    info!("Updated setting {key} to {value}");
    config.save()?;
    println!("✅ Setting {} updated.", key.bold());
    Ok(())
}
