//! Package checkout files
//!
//! Files are rewritten whole. All new contents are computed before the
//! first write, so an unreadable file leaves the checkout untouched.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::warn;

use crate::Result;

/// `*.spec` files in `dir`, sorted by name
pub fn spec_files(dir: &Path) -> Result<Vec<PathBuf>> {
    find_files(dir, "spec")
}

/// `*.changes` files in `dir`, sorted by name
pub fn changes_files(dir: &Path) -> Result<Vec<PathBuf>> {
    find_files(dir, "changes")
}

fn find_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let pattern = format!(
        "{}/*.{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        extension
    );

    let mut files = Vec::new();
    for entry in glob::glob(&pattern)? {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => {
                warn!("Glob error: {}", e);
            }
        }
    }

    files.sort();
    Ok(files)
}

/// New content for a file, not yet written
#[derive(Debug, Clone)]
pub struct PendingWrite {
    pub path: PathBuf,
    pub content: String,
}

/// Read `path` and compute its new content with `transform`
pub fn prepare_rewrite<F>(path: &Path, transform: F) -> Result<PendingWrite>
where
    F: FnOnce(&str) -> String,
{
    let content = fs::read_to_string(path)?;
    Ok(PendingWrite {
        path: path.to_path_buf(),
        content: transform(&content),
    })
}

/// Write every pending file, in order
pub fn write_all(pending: &[PendingWrite]) -> Result<()> {
    for write in pending {
        fs::write(&write.path, &write.content)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.spec"), "").unwrap();
        fs::write(dir.path().join("a.spec"), "").unwrap();
        fs::write(dir.path().join("a.changes"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(dir.path().join("dir.spec")).unwrap();

        let specs = spec_files(dir.path()).unwrap();
        assert_eq!(
            specs,
            vec![dir.path().join("a.spec"), dir.path().join("b.spec")]
        );

        let changes = changes_files(dir.path()).unwrap();
        assert_eq!(changes, vec![dir.path().join("a.changes")]);
    }

    #[test]
    fn test_find_files_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(spec_files(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_prepare_then_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.changes");
        fs::write(&path, "old\n").unwrap();

        let pending = prepare_rewrite(&path, |content| format!("new\n{}", content)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "old\n");

        write_all(&[pending]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new\nold\n");
    }

    #[test]
    fn test_prepare_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err =
            prepare_rewrite(&dir.path().join("missing.spec"), |c| c.to_string()).unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }

    #[test]
    fn test_prepare_non_utf8_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("b.spec");
        fs::write(&path, [0xff, 0xfe]).unwrap();

        let err = prepare_rewrite(&path, |c| c.to_string()).unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}
