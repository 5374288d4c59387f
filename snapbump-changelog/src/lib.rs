//! snapbump-changelog: the text core of snapbump
//!
//! This crate provides:
//! - Parsing `git log` style ChangeLog files into commit records
//! - Finding the commits newer than the packaged one
//! - Snapshot version strings (`{upstream}+git.{timestamp}.{hash}`)
//! - Rewriting spec file fields in place
//! - Formatting and prepending `.changes` entries

pub mod changelog;
pub mod changes;
pub mod diff;
pub mod error;
pub mod spec;
pub mod version;

pub use changelog::{parse_changelog, Commit, Commits};
pub use changes::{prepend_entry, ChangesEntry};
pub use diff::new_commits;
pub use error::{Error, Result};
pub use spec::{rewrite_spec, SpecUpdate, SpecVersion};
pub use version::{major_version, SnapshotVersion};
