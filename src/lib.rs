//! Notion task rollover library
//!
//! Carries unfinished to-do items forward from the latest dated page of a
//! Notion data source into a freshly created page. Designed as a single-shot
//! batch job: query, pick, filter, create, exit.
//!
//! # Architecture
//!
//! The run is three stages composed linearly, with no shared state between
//! them:
//! - **Page Selector**: query pages dated on or after the cutoff and pick
//!   the most recent one (`rollover::latest_page`)
//! - **Todo Filter**: keep only unchecked, non-struck to-do blocks and
//!   reshape them into fresh block specs (`rollover::carry_over_todos`)
//! - **Page Creator**: create today's "Tasks" page with the surviving items
//!   (`notion::NotionClient::create_page`)
//!
//! # Example
//!
//! ```no_run
//! use notion_rollover::{Config, NotionClient, run};
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config {
//!         token: "secret".into(),
//!         data_source_id: "abc123".into(),
//!         lookback_days: 1,
//!         log_level: "info".into(),
//!     };
//!     let client = NotionClient::new(config.token.clone());
//!     let page = run(&client, &config).await?;
//!     println!("{}", serde_json::to_string(&page)?);
//!     Ok(())
//! }
//! ```

mod config;
mod error;
pub mod notion;
pub mod rollover;

use tracing::info;

// Re-export commonly used types
pub use config::Config;
pub use error::RolloverError;
pub use notion::{Block, NotionClient, Page, TodoSpec};

/// Execute one rollover run against the configured data source.
///
/// Strictly sequential: each service call completes before the next begins
/// and every failure aborts the run. Returns the newly created page record
/// on success.
pub async fn run(client: &NotionClient, config: &Config) -> Result<Page, RolloverError> {
    let cutoff = rollover::cutoff_date(config.lookback_days);
    let pages = client.query_pages(&config.data_source_id, &cutoff).await?;
    info!(
        data_source_id = %config.data_source_id,
        cutoff = %cutoff,
        count = pages.len(),
        "queried for pages from data source"
    );

    let latest = rollover::latest_page(pages)?;

    let blocks = client.list_children(&latest.id).await?;
    info!(page_id = %latest.id, url = %latest.url, "got todos of latest page");

    let todos = rollover::carry_over_todos(&blocks)?;

    // Creation date is the local clock, unlike the UTC-normalized cutoff;
    // see rollover::cutoff_date.
    let today = rollover::local_date_today().format("%Y-%m-%d").to_string();
    client
        .create_page(&config.data_source_id, &today, &todos)
        .await
}
