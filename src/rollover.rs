//! Core rollover logic
//!
//! The only decision-making in the tool lives here: picking the latest page
//! out of the query results and filtering its to-do blocks down to the ones
//! worth carrying forward. Both functions are pure apart from log output and
//! never call the API themselves.

use chrono::{Duration, Local, NaiveDate, Utc};
use tracing::{info, warn};

use crate::error::RolloverError;
use crate::notion::{Block, Page, TodoSpec};

/// Get the current date in local timezone
pub fn local_date_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Earliest date (inclusive) eligible for the page query: now minus
/// `lookback_days`, normalized to UTC and formatted as YYYY-MM-DD.
///
/// Note the asymmetry with [`local_date_today`], which the page creation
/// uses without UTC normalization. Near midnight the created page's date can
/// differ from what this cutoff would admit; the behavior is inherited from
/// the original tool and kept as-is.
pub fn cutoff_date(lookback_days: u32) -> String {
    let cutoff = Local::now() - Duration::days(i64::from(lookback_days));
    cutoff.with_timezone(&Utc).format("%Y-%m-%d").to_string()
}

/// Pick the single most recent page by its `Date` property.
///
/// More than one candidate is ambiguous input: it logs a warning and
/// resolves by a stable descending sort on the date, so pages sharing the
/// maximum date keep the service's order and the same input always yields
/// the same pick. An empty candidate list is [`RolloverError::NoResults`].
pub fn latest_page(mut pages: Vec<Page>) -> Result<Page, RolloverError> {
    if pages.len() > 1 {
        warn!(
            count = pages.len(),
            "got more than one result, picking the latest one"
        );
    }
    pages.sort_by(|a, b| b.date().cmp(&a.date()));
    let Some(page) = pages.into_iter().next() else {
        return Err(RolloverError::NoResults);
    };
    info!(title = page.title(), date = %page.date(), "latest page extracted");
    Ok(page)
}

/// Filter a page's child blocks down to fresh, unchecked copies of the
/// unfinished to-do items, preserving their order.
///
/// Skipped with a warning: blocks that are not to-dos, and to-dos that are
/// checked or whose first text run is struck through. A to-do without any
/// text run is [`RolloverError::MalformedBlock`] and aborts the run.
pub fn carry_over_todos(blocks: &[Block]) -> Result<Vec<TodoSpec>, RolloverError> {
    let mut eligible = Vec::new();
    for block in blocks {
        if block.kind != "to_do" {
            warn!(
                block_id = %block.id,
                kind = %block.kind,
                "skipping block, not a to_do"
            );
            continue;
        }
        let Some(todo) = &block.to_do else {
            return Err(RolloverError::MalformedBlock {
                block_id: block.id.clone(),
            });
        };
        let Some(first_run) = todo.rich_text.first() else {
            return Err(RolloverError::MalformedBlock {
                block_id: block.id.clone(),
            });
        };
        if todo.checked || first_run.annotations.strikethrough {
            warn!(
                block_id = %block.id,
                text = %first_run.plain_text,
                "skipping block, either struck off or finished"
            );
            continue;
        }
        eligible.push(TodoSpec::unchecked(&first_run.plain_text));
    }
    Ok(eligible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // Pages and blocks are built from wire-shaped JSON so the tests also
    // cover deserialization of real response fragments.
    fn page(id: &str, title: &str, date: &str) -> Page {
        serde_json::from_value(json!({
            "id": id,
            "url": format!("https://www.notion.so/{id}"),
            "properties": {
                "Name": { "title": [{ "plain_text": title }] },
                "Date": { "date": { "start": date } },
            },
        }))
        .unwrap()
    }

    fn todo_block(id: &str, text: &str, checked: bool, strikethrough: bool) -> Block {
        serde_json::from_value(json!({
            "id": id,
            "type": "to_do",
            "to_do": {
                "rich_text": [{
                    "plain_text": text,
                    "annotations": { "strikethrough": strikethrough },
                }],
                "checked": checked,
            },
        }))
        .unwrap()
    }

    fn paragraph_block(id: &str) -> Block {
        serde_json::from_value(json!({ "id": id, "type": "paragraph" })).unwrap()
    }

    #[test]
    fn test_latest_page_picks_maximum_date() {
        let pages = vec![
            page("p1", "Tasks", "2024-01-01"),
            page("p2", "Tasks", "2024-01-03"),
            page("p3", "Tasks", "2024-01-02"),
        ];
        let latest = latest_page(pages).unwrap();
        assert_eq!(latest.id, "p2");
        assert_eq!(
            latest.date(),
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
        );
    }

    #[test]
    fn test_latest_page_single_candidate() {
        let pages = vec![page("p1", "Tasks", "2024-06-15")];
        assert_eq!(latest_page(pages).unwrap().id, "p1");
    }

    #[test]
    fn test_latest_page_tie_keeps_input_order() {
        let pages = vec![
            page("first", "Tasks", "2024-01-03"),
            page("second", "Tasks", "2024-01-03"),
            page("older", "Tasks", "2024-01-01"),
        ];
        // Stable sort: among equal dates the earlier query result wins,
        // and the same input always produces the same pick.
        assert_eq!(latest_page(pages.clone()).unwrap().id, "first");
        assert_eq!(latest_page(pages).unwrap().id, "first");
    }

    #[test]
    fn test_latest_page_empty_is_no_results() {
        let result = latest_page(Vec::new());
        assert!(matches!(result, Err(RolloverError::NoResults)));
    }

    #[test]
    fn test_carry_over_keeps_only_unfinished() {
        let blocks = vec![
            todo_block("b1", "Done already", true, false),
            todo_block("b2", "A", false, false),
            paragraph_block("b3"),
        ];
        let todos = carry_over_todos(&blocks).unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].text(), "A");
        assert!(!todos[0].to_do.checked);
    }

    #[test]
    fn test_carry_over_skips_strikethrough() {
        let blocks = vec![
            todo_block("b1", "Struck off", false, true),
            todo_block("b2", "Still open", false, false),
        ];
        let todos = carry_over_todos(&blocks).unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].text(), "Still open");
    }

    #[test]
    fn test_carry_over_preserves_order() {
        let blocks = vec![
            todo_block("b1", "first", false, false),
            todo_block("b2", "finished", true, false),
            todo_block("b3", "second", false, false),
            paragraph_block("b4"),
            todo_block("b5", "third", false, false),
        ];
        let todos = carry_over_todos(&blocks).unwrap();
        let texts: Vec<&str> = todos.iter().map(|t| t.text()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_carry_over_text_round_trip() {
        let blocks = vec![todo_block("b1", "Buy milk", false, false)];
        let todos = carry_over_todos(&blocks).unwrap();
        assert_eq!(todos[0].text(), "Buy milk");
    }

    #[test]
    fn test_carry_over_resets_state_and_styling() {
        // A bold, colored but unfinished item comes out unchecked with
        // default styling.
        let block: Block = serde_json::from_value(json!({
            "id": "b1",
            "type": "to_do",
            "to_do": {
                "rich_text": [{
                    "plain_text": "Water plants",
                    "annotations": {
                        "bold": true,
                        "strikethrough": false,
                        "color": "red",
                    },
                }],
                "checked": false,
            },
        }))
        .unwrap();
        let todos = carry_over_todos(&[block]).unwrap();
        assert_eq!(todos[0], TodoSpec::unchecked("Water plants"));
        assert_eq!(todos[0].to_do.color, "default");
    }

    #[test]
    fn test_carry_over_empty_text_runs_is_malformed() {
        let block: Block = serde_json::from_value(json!({
            "id": "b9",
            "type": "to_do",
            "to_do": { "rich_text": [], "checked": false },
        }))
        .unwrap();
        let result = carry_over_todos(&[block]);
        assert!(
            matches!(result, Err(RolloverError::MalformedBlock { ref block_id }) if block_id == "b9")
        );
    }

    #[test]
    fn test_carry_over_missing_payload_is_malformed() {
        // Kind says to_do but the payload is absent; must be a named error,
        // not a panic.
        let block: Block =
            serde_json::from_value(json!({ "id": "b10", "type": "to_do" })).unwrap();
        let result = carry_over_todos(&[block]);
        assert!(
            matches!(result, Err(RolloverError::MalformedBlock { ref block_id }) if block_id == "b10")
        );
    }

    #[test]
    fn test_carry_over_empty_input() {
        assert!(carry_over_todos(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_cutoff_date_lookback_arithmetic() {
        let today = NaiveDate::parse_from_str(&cutoff_date(0), "%Y-%m-%d").unwrap();
        let yesterday = NaiveDate::parse_from_str(&cutoff_date(1), "%Y-%m-%d").unwrap();
        assert_eq!((today - yesterday).num_days(), 1);
    }

    #[test]
    fn test_todo_spec_wire_shape() {
        let spec = TodoSpec::unchecked("Buy milk");
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(
            value,
            json!({
                "object": "block",
                "type": "to_do",
                "to_do": {
                    "rich_text": [{ "type": "text", "text": { "content": "Buy milk" } }],
                    "checked": false,
                    "color": "default",
                }
            })
        );
    }

    #[test]
    fn test_page_extra_fields_round_trip() {
        // Unknown page fields must survive re-serialization so the created
        // page can be printed back as the full record.
        let raw = json!({
            "id": "p1",
            "url": "https://www.notion.so/p1",
            "object": "page",
            "archived": false,
            "properties": {
                "Name": { "title": [{ "plain_text": "Tasks" }] },
                "Date": { "date": { "start": "2024-01-03" } },
                "Tags": { "multi_select": [] },
            },
        });
        let page: Page = serde_json::from_value(raw.clone()).unwrap();
        let back = serde_json::to_value(&page).unwrap();
        assert_eq!(back["object"], "page");
        assert_eq!(back["archived"], false);
        assert_eq!(back["properties"]["Tags"], raw["properties"]["Tags"]);
    }
}
