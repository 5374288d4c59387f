//! `.changes` entries
//!
//! A `.changes` file is a list of entries, newest on top, each starting
//! with a separator line and a `<date> - <author>` header.

use chrono::{DateTime, Utc};

use crate::Commit;

const SEPARATOR: &str =
    "-------------------------------------------------------------------";
const TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S UTC %Y";

/// A new entry for the top of a `.changes` file
#[derive(Debug, Clone)]
pub struct ChangesEntry {
    pub timestamp: DateTime<Utc>,
    pub author: String,
    /// Package version the entry describes
    pub version: String,
    /// Commit subjects, newest first
    pub messages: Vec<String>,
}

impl ChangesEntry {
    /// Entry listing `commits`, leaving out merge commits
    pub fn from_commits(
        timestamp: DateTime<Utc>,
        author: impl Into<String>,
        version: impl Into<String>,
        commits: &[Commit],
    ) -> Self {
        Self {
            timestamp,
            author: author.into(),
            version: version.into(),
            messages: commits
                .iter()
                .filter(|c| !c.is_merge())
                .map(|c| c.message.clone())
                .collect(),
        }
    }

    pub fn render(&self) -> String {
        let mut entry = format!(
            "{}\n{} - {}\n\n- Update to latest git snapshot {}:\n",
            SEPARATOR,
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.author,
            self.version
        );
        for message in &self.messages {
            entry.push_str(&format!("  + {}\n", message));
        }
        entry.push('\n');
        entry
    }
}

/// Put `entry` on top of the existing `.changes` content
pub fn prepend_entry(existing: &str, entry: &ChangesEntry) -> String {
    let mut content = entry.render();
    content.push_str(existing);
    content
}
