use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Download of {url} failed: {status}")]
    Download {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No ChangeLog found in {0:?}")]
    MissingChangelog(PathBuf),

    #[error("Cannot parse version from tarball directory {0:?}")]
    UnparseableTarballDir(String),

    #[error("No spec file for {package} in {dir:?}")]
    NoSpecFiles { package: String, dir: PathBuf },

    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),

    #[error("{0}")]
    Changelog(#[from] snapbump_changelog::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
