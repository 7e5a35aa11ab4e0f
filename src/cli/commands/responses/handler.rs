//! Response dashboard commands: stats, paged listing, CSV export

use anyhow::{Context, Result};
use chrono::Utc;
use colored::*;
use std::fs;
use std::path::PathBuf;

use crate::api::models::ResponseRecord;
use crate::api::ScriptClient;
use crate::config::Config;
use crate::dashboard::{
    self, Columns, FilterState, ResponseStats, apply_filters, page_window, paginate,
    sort_by_column,
};

use super::{FilterArgs, ResponsesCommands, ResponsesSubcommands};

const PAGE_BUTTONS: usize = 5;
const CELL_WIDTH: usize = 32;

pub async fn handle_responses_command(args: ResponsesCommands) -> Result<()> {
    match args.command {
        ResponsesSubcommands::Stats { url } => stats_command(url).await,
        ResponsesSubcommands::List {
            url,
            filters,
            sort,
            page,
            page_size,
        } => list_command(url, filters, sort, page, page_size).await,
        ResponsesSubcommands::Export {
            url,
            filters,
            sort,
            output,
        } => export_command(url, filters, sort, output).await,
    }
}

async fn load_responses(url: Option<String>) -> Result<(Config, Vec<ResponseRecord>)> {
    let config = Config::load()?;
    let client = ScriptClient::new(config.resolve_url(url)?);

    println!("🔄 {}", "Loading responses...".dimmed());
    let records = client
        .get_responses()
        .await
        .context("Failed to load responses")?;
    Ok((config, records))
}

async fn stats_command(url: Option<String>) -> Result<()> {
    let (config, records) = load_responses(url).await?;
    let stats = ResponseStats::compute(&records, &config.columns(), Utc::now().date_naive());

    println!();
    println!("📊 Response statistics");
    println!("  {:<22} {}", "Total responses:", stats.total.to_string().bold());
    println!("  {:<22} {}", "Responses today:", stats.today.to_string().bold());
    println!("  {:<22} {}", "Distinct groups:", stats.groups.to_string().bold());
    println!(
        "  {:<22} {}",
        "Average per day:",
        stats.per_day_average.to_string().bold()
    );
    Ok(())
}

async fn list_command(
    url: Option<String>,
    filters: FilterArgs,
    sort: Option<String>,
    page: usize,
    page_size: Option<usize>,
) -> Result<()> {
    let (config, records) = load_responses(url).await?;
    let columns = config.columns();

    let filter: FilterState = filters.into();
    let mut filtered = apply_filters(&records, &filter, &columns);
    if let Some(column) = &sort {
        sort_by_column(&mut filtered, column, &columns.timestamp);
    }

    if filtered.is_empty() {
        println!("No responses match the current filters.");
        return Ok(());
    }

    let page_size = page_size.unwrap_or(config.settings.page_size);
    let view = paginate(&filtered, page, page_size);

    println!();
    render_table(view.items, &columns);
    println!();
    println!(
        "Showing {} to {} of {} responses",
        view.first, view.last, view.total
    );
    if view.total_pages > 1 {
        let buttons: Vec<String> = page_window(view.page, view.total_pages, PAGE_BUTTONS)
            .map(|number| {
                if number == view.page {
                    format!("[{number}]").bold().to_string()
                } else {
                    number.to_string()
                }
            })
            .collect();
        println!("Pages: {}", buttons.join(" "));
    }
    Ok(())
}

async fn export_command(
    url: Option<String>,
    filters: FilterArgs,
    sort: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let (config, records) = load_responses(url).await?;
    let columns = config.columns();

    let filter: FilterState = filters.into();
    let mut filtered = apply_filters(&records, &filter, &columns);
    if let Some(column) = &sort {
        sort_by_column(&mut filtered, column, &columns.timestamp);
    }

    let csv = dashboard::to_csv(&filtered)?;
    let path = output.unwrap_or_else(|| {
        PathBuf::from(dashboard::default_file_name(Utc::now().date_naive()))
    });

    fs::write(&path, csv)
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;
    println!(
        "💾 Exported {} responses to {}",
        filtered.len().to_string().bold(),
        path.display().to_string().bright_green()
    );
    Ok(())
}

/// Print the page as a fixed-width table. Columns follow the first
/// record's order; the timestamp column is shown in a friendlier format.
fn render_table(records: &[ResponseRecord], columns: &Columns) {
    let Some(first) = records.first() else {
        return;
    };
    let header: Vec<&str> = first.column_names().collect();

    let widths: Vec<usize> = header
        .iter()
        .map(|column| {
            records
                .iter()
                .map(|record| display_value(record, column, columns).chars().count())
                .chain(std::iter::once(column.chars().count()))
                .max()
                .unwrap_or(0)
                .min(CELL_WIDTH)
        })
        .collect();

    let titles: Vec<String> = header
        .iter()
        .zip(&widths)
        .map(|(column, &width)| format!("{:<width$}", truncate(column, width)))
        .collect();
    println!("{}", titles.join("  ").bold());
    println!("{}", "-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len().saturating_sub(1))));

    for record in records {
        let cells: Vec<String> = header
            .iter()
            .zip(&widths)
            .map(|(column, &width)| {
                format!(
                    "{:<width$}",
                    truncate(&display_value(record, column, columns), width)
                )
            })
            .collect();
        println!("{}", cells.join("  "));
    }
}

fn display_value(record: &ResponseRecord, column: &str, columns: &Columns) -> String {
    if column == columns.timestamp {
        if let Some(timestamp) = record.timestamp(column) {
            return timestamp.format("%Y-%m-%d %H:%M").to_string();
        }
    }
    record.get(column).to_string()
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let mut shortened: String = value.chars().take(width.saturating_sub(1)).collect();
        shortened.push('…');
        shortened
    }
}
