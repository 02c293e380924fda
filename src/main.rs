//! Notion task rollover - Main Entry Point
//!
//! Parses configuration from flags or environment, sets up logging, runs one
//! rollover, and prints the created page record to stdout. The actual
//! implementation is in the `notion_rollover` library.

use anyhow::Result;
use clap::Parser;
use notion_rollover::{Config, NotionClient, RolloverError, run};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Carry unfinished Notion to-do items forward to a fresh "Tasks" page
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Notion integration token
    #[arg(long, env = "NOTION_KEY", hide_env_values = true)]
    notion_key: String,

    /// Data source holding the dated task pages
    #[arg(long, env = "NOTION_DATASOURCE_ID")]
    datasource_id: String,

    /// How many days back the page query reaches, inclusive
    #[arg(long, default_value_t = 1)]
    lookback_days: u32,

    /// Log verbosity (error, warn, info, debug, trace)
    #[arg(long, env = "LOGGING_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config {
        token: args.notion_key,
        data_source_id: args.datasource_id,
        lookback_days: args.lookback_days,
        log_level: args.log_level,
    };

    // Logs go to stderr; stdout is reserved for the created page record.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_level)?)
        .with_writer(std::io::stderr)
        .init();

    info!("started the application");
    let client = NotionClient::new(config.token.clone());
    info!("registered notion client");

    match run(&client, &config).await {
        Ok(page) => {
            println!("{}", serde_json::to_string(&page)?);
            Ok(())
        }
        Err(RolloverError::NoResults) => {
            error!("cannot find any page results, exiting");
            std::process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}
