//! Snapshot version strings
//!
//! A snapshot of an upstream branch is packaged as
//! `{upstream}+git.{timestamp}.{hash}`, e.g. `2013.1+git.1365424510.abcdef1`,
//! which sorts after `2013.1` and before the next upstream release.

use std::fmt::Display;

use chrono::{DateTime, FixedOffset, Utc};
use tracing::warn;

use crate::Commit;

/// Date format used by `git log` without `--date`
const GIT_DATE_FORMAT: &str = "%a %b %e %H:%M:%S %Y %z";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotVersion {
    /// Upstream version the snapshot is based on
    pub upstream: String,
    /// Seconds since the Unix epoch
    pub timestamp: i64,
    /// Commit hash (full or abbreviated)
    pub hash: String,
}

impl SnapshotVersion {
    pub fn new(upstream: impl Into<String>, timestamp: i64, hash: impl Into<String>) -> Self {
        Self {
            upstream: upstream.into(),
            timestamp,
            hash: hash.into(),
        }
    }

    /// Snapshot version for `commit` on top of `upstream`.
    ///
    /// The timestamp is the commit date; when it cannot be parsed the
    /// current time is used instead.
    pub fn from_commit(upstream: &str, commit: &Commit) -> Self {
        let timestamp = match parse_git_date(&commit.date) {
            Some(date) => date.timestamp(),
            None => {
                warn!(
                    "Cannot parse date {:?} of commit {}, using current time",
                    commit.date,
                    commit.short_hash()
                );
                Utc::now().timestamp()
            }
        };
        Self::new(upstream, timestamp, commit.hash.as_str())
    }

    /// First 7 bytes of the hash, or all of it when shorter or when byte 7
    /// would split a character
    pub fn short_hash(&self) -> &str {
        self.hash.get(..7).unwrap_or(&self.hash)
    }
}

impl Display for SnapshotVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}+git.{}.{}", self.upstream, self.timestamp, self.short_hash())
    }
}

/// Parse a date as printed by `git log`, e.g. `Mon Apr 8 14:35:10 2013 +0200`
pub fn parse_git_date(date: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(date.trim(), GIT_DATE_FORMAT).ok()
}

/// Leading numeric part of an upstream version.
///
/// `2013.2.b1.57.gdeadbee` gives `2013.2`. A version without a numeric
/// prefix is returned as is.
pub fn major_version(upstream: &str) -> &str {
    let len = upstream
        .split('.')
        .take_while(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
        .map(|part| part.len() + 1)
        .sum::<usize>();

    if len == 0 {
        upstream
    } else {
        &upstream[..len - 1]
    }
}
