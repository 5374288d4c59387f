//! Spec file version parsing and rewriting
//!
//! All rewrites are pure: they take the whole file content and return the
//! new content. Each field is replaced at its first occurrence only, so
//! subpackages with their own `Version:` or `Source1:` lines are left alone.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use crate::{Error, Result, SnapshotVersion};

static VERSION_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(Version:[ \t]*)(\S+)").unwrap());
static MAJORVERSION_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(%define[ \t]+majorversion[ \t]+)(\S+)").unwrap());
static SOURCE_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(Source0?:[ \t]*)(\S+)").unwrap());
static SNAPSHOT_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S+?)\+git\.(\d+)\.([0-9a-fA-F]+)$").unwrap());

/// Version currently recorded in a spec file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecVersion(pub SnapshotVersion);

impl SpecVersion {
    /// Read the snapshot version from the first `Version:` field
    pub fn parse(content: &str) -> Result<Self> {
        let value = VERSION_FIELD
            .captures(content)
            .and_then(|caps| caps.get(2))
            .map(|m| m.as_str())
            .ok_or_else(|| Error::UnparseableSpecVersion("no Version: field".to_string()))?;

        let caps = SNAPSHOT_VERSION.captures(value).ok_or_else(|| {
            Error::UnparseableSpecVersion(format!(
                "{:?} is not of the form <version>+git.<timestamp>.<hash>",
                value
            ))
        })?;

        let timestamp = caps[2]
            .parse()
            .map_err(|_| Error::UnparseableSpecVersion(format!("bad timestamp in {:?}", value)))?;

        Ok(Self(SnapshotVersion::new(&caps[1], timestamp, &caps[3])))
    }

    /// Hash of the packaged commit
    pub fn commit(&self) -> &str {
        &self.0.hash
    }
}

/// New values for the rewritten spec fields
#[derive(Debug, Clone)]
pub struct SpecUpdate {
    pub version: String,
    pub major_version: String,
    pub source: String,
}

/// Rewrite `Version:`, `%define majorversion` and `Source:` in a spec file
pub fn rewrite_spec(content: &str, update: &SpecUpdate) -> String {
    let content = replace_field(content, &VERSION_FIELD, &update.version, "Version");
    let content = replace_field(&content, &MAJORVERSION_FIELD, &update.major_version, "majorversion");
    replace_field(&content, &SOURCE_FIELD, &update.source, "Source")
}

fn replace_field(content: &str, field: &Regex, value: &str, name: &str) -> String {
    if !field.is_match(content) {
        debug!("No {} field to rewrite", name);
    }
    field
        .replace(content, |caps: &Captures| format!("{}{}", &caps[1], value))
        .into_owned()
}
