//! Process configuration
//!
//! All environment access happens at the process boundary: `main` builds one
//! [`Config`] from the parsed arguments and passes it down. Nothing below
//! this layer reads environment variables.

/// Configuration for a single rollover run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Notion integration token.
    pub token: String,
    /// Data source (database) holding the dated pages.
    pub data_source_id: String,
    /// How many days back the page query reaches, inclusive.
    pub lookback_days: u32,
    /// Log filter directive for the tracing subscriber (e.g. "info").
    pub log_level: String,
}
