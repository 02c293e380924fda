//! Wire types for the Notion API
//!
//! Read types capture only the fields the rollover needs and keep everything
//! else in flattened maps, so the created page can be printed back out as
//! the full record the service returned. Write types (`TodoSpec`) serialize
//! to the exact block shape the create-page endpoint expects.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A page record in a Notion data source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub url: String,
    pub properties: PageProperties,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Page {
    /// Calendar date of the page, from the `Date` property.
    pub fn date(&self) -> NaiveDate {
        self.properties.date.date.start
    }

    /// Plain text of the first title run, or "" for an empty title.
    /// Only used for log lines.
    pub fn title(&self) -> &str {
        self.properties
            .name
            .title
            .first()
            .map(|run| run.plain_text.as_str())
            .unwrap_or("")
    }
}

/// The two properties the rollover relies on. A page missing either fails
/// deserialization and aborts the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageProperties {
    #[serde(rename = "Name")]
    pub name: TitleProperty,
    #[serde(rename = "Date")]
    pub date: DateProperty,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleProperty {
    pub title: Vec<RichText>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateProperty {
    pub date: DateValue,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateValue {
    /// Date-only start value, serialized as YYYY-MM-DD.
    pub start: NaiveDate,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One text run of a rich-text value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RichText {
    pub plain_text: String,
    #[serde(default)]
    pub annotations: Annotations,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Styling flags of a text run. Only strikethrough matters here; the rest
/// ride along in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Annotations {
    #[serde(default)]
    pub strikethrough: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A child content block of a page, as returned by the children listing.
/// `to_do` is only present when `kind` is `"to_do"`.
#[derive(Debug, Clone, Deserialize)]
pub struct Block {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub to_do: Option<ToDo>,
}

/// Payload of a to-do block.
#[derive(Debug, Clone, Deserialize)]
pub struct ToDo {
    pub rich_text: Vec<RichText>,
    pub checked: bool,
}

/// List envelope returned by the query and children endpoints.
#[derive(Debug, Deserialize)]
pub struct PageList<T> {
    pub object: String,
    pub results: Vec<T>,
}

/// A freshly constructed, unchecked to-do block ready for insertion into a
/// new page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoSpec {
    pub object: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub to_do: TodoContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoContent {
    pub rich_text: Vec<TextSpec>,
    pub checked: bool,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextSpec {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: TextContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextContent {
    pub content: String,
}

impl TodoSpec {
    /// Build an unchecked to-do block with default styling around `text`.
    pub fn unchecked(text: &str) -> Self {
        Self {
            object: "block",
            kind: "to_do",
            to_do: TodoContent {
                rich_text: vec![TextSpec {
                    kind: "text",
                    text: TextContent {
                        content: text.to_string(),
                    },
                }],
                checked: false,
                color: "default",
            },
        }
    }

    /// Text content of the block, for assertions and log lines.
    pub fn text(&self) -> &str {
        self.to_do
            .rich_text
            .first()
            .map(|run| run.text.content.as_str())
            .unwrap_or("")
    }
}
