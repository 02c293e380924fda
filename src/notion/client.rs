//! HTTP client for the Notion API
//!
//! Thin wrapper over `reqwest` covering the three calls the rollover needs:
//! querying a data source, listing a page's children, and creating a page.
//! Every call blocks the run until the service answers; there is no retry
//! layer beyond what reqwest itself provides.

use serde_json::json;
use tracing::debug;

use super::types::{Block, Page, PageList, TodoSpec};
use crate::error::RolloverError;

/// Production API root.
pub const NOTION_API_BASE: &str = "https://api.notion.com/v1";

/// API version pin; data source queries require the 2025-09-03 revision.
pub const NOTION_VERSION: &str = "2025-09-03";

/// Title of every page this tool creates.
pub const NEW_PAGE_TITLE: &str = "Tasks";

pub struct NotionClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl NotionClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(NOTION_API_BASE, token)
    }

    /// Point the client at a different API root. Used by tests to talk to a
    /// mock server.
    pub fn with_base_url(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// Query the data source for pages whose `Date` property is on or after
    /// `on_or_after` (YYYY-MM-DD).
    pub async fn query_pages(
        &self,
        data_source_id: &str,
        on_or_after: &str,
    ) -> Result<Vec<Page>, RolloverError> {
        let body = json!({
            "filter": {
                "property": "Date",
                "date": { "on_or_after": on_or_after },
            }
        });

        debug!(data_source_id, on_or_after, "querying data source");
        let list: PageList<Page> = self
            .http
            .post(format!(
                "{}/data_sources/{}/query",
                self.base_url, data_source_id
            ))
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        expect_list(list.object)?;
        Ok(list.results)
    }

    /// List the child content blocks of a page, in document order.
    pub async fn list_children(&self, page_id: &str) -> Result<Vec<Block>, RolloverError> {
        debug!(page_id, "listing page children");
        let list: PageList<Block> = self
            .http
            .get(format!("{}/blocks/{}/children", self.base_url, page_id))
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        expect_list(list.object)?;
        Ok(list.results)
    }

    /// Create a new "Tasks" page dated `date` with `children` as its initial
    /// content. Returns the full page record the service assigned.
    pub async fn create_page(
        &self,
        data_source_id: &str,
        date: &str,
        children: &[TodoSpec],
    ) -> Result<Page, RolloverError> {
        let body = json!({
            "parent": { "data_source_id": data_source_id },
            "properties": {
                "Name": { "title": [{ "text": { "content": NEW_PAGE_TITLE } }] },
                "Date": {
                    "type": "date",
                    "date": { "start": date },
                },
            },
            "children": children,
        });

        debug!(data_source_id, date, count = children.len(), "creating page");
        let response = self
            .http
            .post(format!("{}/pages", self.base_url))
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response.text().await.unwrap_or_default();
            return Err(RolloverError::Creation { status, message });
        }

        Ok(response.json().await?)
    }
}

fn expect_list(object: String) -> Result<(), RolloverError> {
    if object == "list" {
        Ok(())
    } else {
        Err(RolloverError::UnexpectedObject { object })
    }
}
