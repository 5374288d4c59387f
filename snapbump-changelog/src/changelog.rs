//! ChangeLog parsing
//!
//! Tarballs generated from a git checkout ship a `ChangeLog` that is the
//! plain `git log` of the branch, newest commit first:
//!
//! ```text
//! commit 3f2a9c1d0e5b7a6f8c9d0e1f2a3b4c5d6e7f8a9b
//! Author: Jane Doe <jane@example.com>
//! Date:   Mon Apr 8 14:35:10 2013 +0200
//!
//!     Fix the frobnicator
//!
//!     Longer description of the fix.
//! ```
//!
//! Only the subject line of each message is kept.

use std::iter::{Enumerate, FusedIterator, Peekable};
use std::str::Lines;

use crate::{Error, Result};

/// Prefix of the subject line gerrit gives to merge commits
const MERGE_PREFIX: &str = "Merge \"";

/// A single commit record from the ChangeLog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Full commit hash as printed in the ChangeLog
    pub hash: String,
    pub author: String,
    /// Date exactly as printed, e.g. `Mon Apr 8 14:35:10 2013 +0200`
    pub date: String,
    /// Subject line of the commit message
    pub message: String,
}

impl Commit {
    /// Whether this is a gerrit merge commit (`Merge "..."`)
    pub fn is_merge(&self) -> bool {
        self.message.starts_with(MERGE_PREFIX)
    }

    /// First 7 bytes of the hash, or all of it when shorter or when byte 7
    /// would split a character
    pub fn short_hash(&self) -> &str {
        self.hash.get(..7).unwrap_or(&self.hash)
    }

    /// Check whether `reference` is a prefix of this commit's hash.
    ///
    /// Hex digits are compared case-insensitively.
    pub fn matches(&self, reference: &str) -> bool {
        self.hash
            .get(..reference.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(reference))
    }
}

/// Lazy iterator over the commit records of a ChangeLog.
///
/// Yields records in the order they appear. The first malformed record
/// yields an error and ends the iteration.
pub struct Commits<'a> {
    lines: Peekable<Enumerate<Lines<'a>>>,
    failed: bool,
}

impl<'a> Commits<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate().peekable(),
            failed: false,
        }
    }

    fn next_record(&mut self) -> Option<Result<Commit>> {
        let (idx, header) = loop {
            let (idx, line) = self.lines.next()?;
            if !line.trim().is_empty() {
                break (idx, line);
            }
        };
        Some(self.parse_record(idx + 1, header))
    }

    fn parse_record(&mut self, lineno: usize, header: &str) -> Result<Commit> {
        let hash = header
            .strip_prefix("commit ")
            .and_then(|rest| rest.split_whitespace().next())
            .ok_or_else(|| parse_error(lineno, format!("expected commit header, found {:?}", header)))?;

        if !is_commit_hash(hash) {
            return Err(parse_error(lineno, format!("invalid commit hash {:?}", hash)));
        }

        let (mut field_line, mut line) = self.field_line(lineno)?;
        if line.starts_with("Merge:") {
            (field_line, line) = self.field_line(field_line)?;
        }
        let author = field_value(field_line, line, "Author:")?;

        let (field_line, line) = self.field_line(field_line)?;
        let date = field_value(field_line, line, "Date:")?;

        // Message body lines are indented; the next record starts at column 0
        let mut message = None;
        while let Some(&(_, line)) = self.lines.peek() {
            if !line.is_empty() && !line.starts_with(char::is_whitespace) {
                break;
            }
            self.lines.next();

            let trimmed = line.trim();
            if message.is_none() && !trimmed.is_empty() {
                message = Some(trimmed.to_string());
            }
        }

        let message = message
            .ok_or_else(|| parse_error(lineno, format!("commit {} has no message", hash)))?;

        Ok(Commit {
            hash: hash.to_string(),
            author,
            date,
            message,
        })
    }

    /// Next line of the record header, with its 1-based line number
    fn field_line(&mut self, previous: usize) -> Result<(usize, &'a str)> {
        self.lines
            .next()
            .map(|(idx, line)| (idx + 1, line))
            .ok_or_else(|| parse_error(previous, "unexpected end of ChangeLog".to_string()))
    }
}

impl Iterator for Commits<'_> {
    type Item = Result<Commit>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let record = self.next_record()?;
        if record.is_err() {
            self.failed = true;
        }
        Some(record)
    }
}

impl FusedIterator for Commits<'_> {}

/// Parse a whole ChangeLog into commit records, newest first.
pub fn parse_changelog(text: &str) -> Result<Vec<Commit>> {
    let commits = Commits::new(text).collect::<Result<Vec<_>>>()?;
    if commits.is_empty() {
        return Err(Error::EmptyChangelog);
    }
    Ok(commits)
}

fn field_value(lineno: usize, line: &str, label: &str) -> Result<String> {
    let value = line
        .strip_prefix(label)
        .map(str::trim)
        .ok_or_else(|| parse_error(lineno, format!("expected {:?}, found {:?}", label, line)))?;

    if value.is_empty() {
        return Err(parse_error(lineno, format!("empty {:?} field", label)));
    }
    Ok(value.to_string())
}

fn is_commit_hash(s: &str) -> bool {
    (7..=40).contains(&s.len()) && s.chars().all(|c| c.is_ascii_hexdigit())
}

fn parse_error(line: usize, reason: String) -> Error {
    Error::Changelog { line, reason }
}
