//! Pull command - Fetch search results and print them
//!
//! Runs the same query and mapping as a collector cycle, then prints the
//! records as JSON instead of writing them.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;
use stargaze_config::Config;
use stargaze_connectors::{CollectorConfig, GraphQlClient, mapper, query};
use stargaze_protocol::{Cursor, RepositoryRecord};

use super::build_client;

/// Pull command arguments
#[derive(Args, Debug)]
pub struct PullArgs {
    /// Search filter (overrides [collector] search_filter)
    #[arg(short, long)]
    filter: Option<String>,

    /// Results per page (overrides [collector] page_size)
    #[arg(short = 'n', long)]
    page_size: Option<u32>,

    /// Start after this cursor
    #[arg(long)]
    after: Option<String>,

    /// Pages to fetch, following cursors
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pages: u32,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    output: OutputFormat,
}

/// How pulled records are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Single-line JSON
    Compact,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PullOutput {
    pages: u32,
    records: Vec<RepositoryRecord>,
    last_cursor: Option<Cursor>,
}

/// Run the pull command
pub async fn run(args: PullArgs, config: Config) -> Result<()> {
    let search = CollectorConfig::new(
        args.filter
            .unwrap_or_else(|| config.collector.search_filter.clone()),
        args.page_size.unwrap_or(config.collector.page_size),
        config.collector.interval,
    )
    .context("invalid search settings")?;
    let client = build_client(&config)?;

    let mut output = PullOutput {
        pages: 0,
        records: Vec::new(),
        last_cursor: args.after.map(Cursor::new),
    };

    for _ in 0..args.pages {
        tracing::info!(
            filter = %search.search_filter(),
            after = ?output.last_cursor,
            "pulling page"
        );

        let request = query::build(
            search.search_filter(),
            search.page_size(),
            output.last_cursor.as_ref(),
        );
        let data = client
            .execute(&request)
            .await
            .context("failed to fetch from GitHub")?;
        let page = mapper::map(&data).context("failed to map search results")?;

        output.pages += 1;
        output.records.extend(page.records);
        match page.last_cursor {
            Some(cursor) => output.last_cursor = Some(cursor),
            None => break,
        }
    }

    match args.output {
        OutputFormat::Compact => println!("{}", serde_json::to_string(&output)?),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&output)?),
    }

    Ok(())
}
