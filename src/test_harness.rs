//! Shared fixtures for unit tests
//!
//! Sample feed cards, feed documents on disk and buffer readers used by the
//! card, feed and view tests.

use crate::feed::FeedCard;
use ratatui::buffer::Buffer;
use std::fs;
use std::path::{Path, PathBuf};

/// Timestamp every sample card is created at.
pub const SAMPLE_CREATED_AT: &str = "2024-12-01T08:00:00.000Z";

/// A card titled `Post {id}` with slug `post-{id}` in locale `en`.
pub fn sample_card(id: &str, labels: &[&str]) -> FeedCard {
    FeedCard {
        id: id.to_string(),
        title: format!("Post {id}"),
        labels: labels.iter().map(|l| l.to_string()).collect(),
        latest_commenters: Vec::new(),
        last_commented_at: None,
        publish_time: SAMPLE_CREATED_AT.to_string(),
        created_at: SAMPLE_CREATED_AT.to_string(),
        updated_at: SAMPLE_CREATED_AT.to_string(),
        cover: String::new(),
        locale: "en".to_string(),
        slug: format!("post-{id}"),
    }
}

/// Feed document with one sample card per id.
pub fn feed_json(ids: &[&str]) -> String {
    let cards: Vec<FeedCard> = ids.iter().map(|id| sample_card(id, &["rust"])).collect();
    serde_json::json!({ "data": cards }).to_string()
}

/// A feed file in the temp directory, removed on drop.
pub struct TempFeed {
    path: PathBuf,
}

impl TempFeed {
    /// Write `contents` to a file named after `name` and this process.
    pub fn new(name: &str, contents: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "waterflow_{name}_{}.json",
            std::process::id()
        ));
        fs::write(&path, contents).expect("temp feed should be writable");
        Self { path }
    }

    /// Location of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempFeed {
    fn drop(&mut self) {
        fs::remove_file(&self.path).ok();
    }
}

/// Rows of a buffer as strings, trailing blanks trimmed.
pub fn buffer_lines(buffer: &Buffer) -> Vec<String> {
    let area = buffer.area;
    (area.top()..area.bottom())
        .map(|y| {
            let line: String = (area.left()..area.right())
                .map(|x| buffer[(x, y)].symbol())
                .collect();
            line.trim_end().to_string()
        })
        .collect()
}

#[test]
fn buffer_lines_keeps_blank_rows() {
    let mut buf = Buffer::empty(ratatui::layout::Rect::new(0, 0, 6, 3));
    buf.set_string(1, 1, "ab", ratatui::style::Style::default());
    assert_eq!(buffer_lines(&buf), vec!["", " ab", ""]);
}
