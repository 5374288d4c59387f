use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("ChangeLog parse error at line {line}: {reason}")]
    Changelog { line: usize, reason: String },

    #[error("ChangeLog contains no commit records")]
    EmptyChangelog,

    #[error("No new changes since commit {reference}")]
    NoNewChanges { reference: String },

    #[error("Reference commit hash is empty")]
    InvalidReference,

    #[error("Cannot parse spec version field: {0}")]
    UnparseableSpecVersion(String),
}

pub type Result<T> = std::result::Result<T, Error>;
