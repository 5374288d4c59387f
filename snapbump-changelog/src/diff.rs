//! Finding the commits newer than the packaged one

use tracing::{debug, warn};

use crate::{Commit, Error, Result};

/// Collect the commits strictly newer than `reference`.
///
/// `commits` must be ordered newest first. Records are consumed up to the
/// first one whose hash starts with `reference`, so anything after it is
/// never parsed. If no record matches, every record counts as new. A
/// ChangeLog without any record fails with `EmptyChangelog`.
pub fn new_commits<I>(commits: I, reference: &str) -> Result<Vec<Commit>>
where
    I: IntoIterator<Item = Result<Commit>>,
{
    let reference = reference.trim();
    if reference.is_empty() {
        return Err(Error::InvalidReference);
    }

    let mut new = Vec::new();
    let mut found = false;
    let mut seen = 0;

    for commit in commits {
        let commit = commit?;
        seen += 1;
        if commit.matches(reference) {
            debug!("Reference {} matched commit {}", reference, commit.hash);
            found = true;
            break;
        }
        new.push(commit);
    }

    if seen == 0 {
        return Err(Error::EmptyChangelog);
    }

    if !found {
        warn!(
            "Commit {} not found in ChangeLog, treating all {} commits as new",
            reference,
            new.len()
        );
    }

    if new.is_empty() {
        return Err(Error::NoNewChanges {
            reference: reference.to_string(),
        });
    }

    Ok(new)
}
