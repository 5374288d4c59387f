//! Reading snapshot tarballs
//!
//! A snapshot tarball unpacks into a single `{name}-{version}/` directory
//! and carries the branch history in a `ChangeLog` file.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Component, Path},
    sync::LazyLock,
};

use flate2::read::GzDecoder;
use regex::Regex;
use tar::Archive;
use tracing::debug;

use crate::{Error, Result};

static TOP_DIR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.+?)-(\d.*)$").unwrap());

/// What the pipeline needs from a snapshot tarball
#[derive(Debug, Clone)]
pub struct Tarball {
    /// Project name from the top-level directory
    pub name: String,
    /// Upstream version from the top-level directory
    pub version: String,
    /// Full ChangeLog text
    pub changelog: String,
}

/// Read name, version and ChangeLog from a `.tar.gz` file
pub fn read_tarball<P: AsRef<Path>>(path: P) -> Result<Tarball> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut archive = Archive::new(GzDecoder::new(BufReader::new(file)));

    let mut top_dir: Option<String> = None;
    let mut changelog: Option<String> = None;

    for entry in archive.entries()? {
        let mut entry = entry?;
        let kind = entry.header().entry_type();
        if !kind.is_file() && !kind.is_dir() {
            // `git archive` puts a pax_global_header entry first
            debug!("Skipping {:?} entry", kind);
            continue;
        }
        let entry_path = entry.path()?.into_owned();

        if top_dir.is_none() {
            top_dir = entry_path.components().find_map(|c| match c {
                Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                _ => None,
            });
        }

        if entry_path.to_string_lossy().ends_with("ChangeLog") {
            debug!("Reading {:?}", entry_path);
            let mut bytes = Vec::new();
            entry.read_to_end(&mut bytes)?;
            changelog = Some(String::from_utf8_lossy(&bytes).into_owned());
            break;
        }
    }

    let changelog = changelog.ok_or_else(|| Error::MissingChangelog(path.to_path_buf()))?;
    let top_dir = top_dir.unwrap_or_default();
    let (name, version) = parse_top_dir(&top_dir)?;

    Ok(Tarball {
        name,
        version,
        changelog,
    })
}

/// Split `{name}-{version}` where the version starts with a digit
pub fn parse_top_dir(dir: &str) -> Result<(String, String)> {
    let caps = TOP_DIR
        .captures(dir)
        .ok_or_else(|| Error::UnparseableTarballDir(dir.to_string()))?;
    Ok((caps[1].to_string(), caps[2].to_string()))
}

/// Write a `.tar.gz` holding `entries` as `(path, content)` pairs
#[cfg(test)]
pub(crate) fn write_test_tarball(path: &Path, entries: &[(&str, &str)]) {
    use flate2::{write::GzEncoder, Compression};

    let file = File::create(path).unwrap();
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
    for (name, content) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        builder
            .append_data(&mut header, name, content.as_bytes())
            .unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap();
}
