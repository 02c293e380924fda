//! Error types for the rollover run
//!
//! Every failure is fatal to the run; nothing is retried. Only `NoResults`
//! gets a dedicated exit path in the binary, the rest propagate with their
//! diagnostic.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced while rolling unfinished to-dos forward.
#[derive(Debug, Error)]
pub enum RolloverError {
    /// The date-filtered query matched no pages; there is nothing to roll
    /// over from. The binary maps this to exit code 1.
    #[error("no pages matched the date filter")]
    NoResults,

    /// A to-do block carries no text runs, so there is no first run to
    /// inspect or copy.
    #[error("to-do block {block_id} has no text runs")]
    MalformedBlock { block_id: String },

    /// The service rejected the new page. Carries the HTTP status and the
    /// response body the service reported.
    #[error("page creation rejected ({status}): {message}")]
    Creation { status: StatusCode, message: String },

    /// A list endpoint returned an envelope whose `object` field was not
    /// `"list"`.
    #[error("unexpected response object '{object}', expected 'list'")]
    UnexpectedObject { object: String },

    /// Transport or protocol failure from the HTTP client. Not caught
    /// anywhere; terminates the run.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}
