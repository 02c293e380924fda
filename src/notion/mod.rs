//! Notion API surface
//!
//! Split into submodules:
//! - `types`: wire-format records (pages, blocks, rich text, block specs)
//! - `client`: the reqwest-backed API client

mod client;
mod types;

pub use client::{NEW_PAGE_TITLE, NOTION_API_BASE, NOTION_VERSION, NotionClient};
pub use types::{
    Annotations, Block, DateProperty, DateValue, Page, PageList, PageProperties, RichText,
    TextContent, TextSpec, TitleProperty, ToDo, TodoContent, TodoSpec,
};
