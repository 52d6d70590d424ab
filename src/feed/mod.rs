//! Feed model - blog cards loaded from a local JSON document.
//!
//! The document has the shape `{ "data": [ card, ... ] }` with camelCase
//! field names. Cards are plain data; sizing lives in [`crate::card`].

pub mod pager;

pub use pager::FeedPager;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, instrument};

/// Default base URL for a card's detail page.
pub const DEFAULT_DETAIL_BASE_URL: &str = "https://www.arcblock.io/blog";

/// Errors that can occur while loading a feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The feed file does not exist.
    #[error("Feed file not found: {path}")]
    FileNotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// The feed file exists but could not be read.
    #[error("Failed to read feed file {path}: {source}")]
    Read {
        /// Path being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The feed file is not a valid feed document.
    #[error("Invalid feed JSON in {path}: {source}")]
    Decode {
        /// Path being decoded.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// One blog card of the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedCard {
    /// Stable identifier.
    pub id: String,
    /// Post title.
    pub title: String,
    /// Labels, including hidden system labels of the form `kind:value`.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Most recent commenters.
    #[serde(default)]
    pub latest_commenters: Vec<String>,
    /// Timestamp of the last comment, if any.
    #[serde(default)]
    pub last_commented_at: Option<String>,
    /// Publication timestamp.
    pub publish_time: String,
    /// Creation timestamp, shown on the card.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
    /// Cover image URL.
    #[serde(default)]
    pub cover: String,
    /// Locale segment of the detail URL.
    pub locale: String,
    /// Slug segment of the detail URL.
    pub slug: String,
}

impl FeedCard {
    /// Labels shown to the reader. Labels containing `:` are system labels.
    pub fn visible_labels(&self) -> impl Iterator<Item = &str> {
        self.labels
            .iter()
            .map(String::as_str)
            .filter(|label| !label.contains(':'))
    }

    /// Detail page URL under `base`.
    pub fn detail_url(&self, base: &str) -> String {
        format!("{}/{}/{}", base.trim_end_matches('/'), self.locale, self.slug)
    }
}

#[derive(Debug, Deserialize)]
struct FeedDocument {
    data: Vec<FeedCard>,
}

/// Decode a feed document from a string.
///
/// # Errors
///
/// Returns the JSON error if the document is malformed.
pub fn parse_feed(json: &str) -> Result<Vec<FeedCard>, serde_json::Error> {
    serde_json::from_str::<FeedDocument>(json).map(|doc| doc.data)
}

/// Load every card of the feed file at `path`.
///
/// # Errors
///
/// Returns `FeedError::FileNotFound` if the file is missing,
/// `FeedError::Read` for other I/O errors and `FeedError::Decode` if the
/// document is not a valid feed.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_feed(path: impl AsRef<Path>) -> Result<Vec<FeedCard>, FeedError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(FeedError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = std::fs::read_to_string(path).map_err(|source| FeedError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let cards = parse_feed(&contents).map_err(|source| FeedError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(cards = cards.len(), "Feed loaded");
    Ok(cards)
}
