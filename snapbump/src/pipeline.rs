//! The update pipeline
//!
//! download -> read tarball -> parse ChangeLog -> diff against the packaged
//! commit -> rewrite `.spec` and `.changes` files.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use snapbump_changelog::{
    changelog::Commits, major_version, new_commits, prepend_entry, rewrite_spec, ChangesEntry,
    SnapshotVersion, SpecUpdate, SpecVersion,
};
use tracing::{debug, info, warn};

use crate::{archive, fetch, workdir, Config, Error, Result};

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct Summary {
    pub version: SnapshotVersion,
    /// Number of commits since the packaged one, merges included
    pub new_commits: usize,
    pub spec_files: Vec<PathBuf>,
    pub changes_files: Vec<PathBuf>,
}

/// Download the upstream tarball and update the package checkout
pub fn run(config: &Config) -> Result<Summary> {
    let url = fetch::tarball_url(&config.host, &config.component, &config.version);
    let tarball = config.tarball_path();

    info!("Downloading {} -> {:?}", url, tarball);
    fetch::download(&url, &tarball)?;

    run_from_tarball(config, &tarball, Utc::now())
}

/// Update the package checkout from an already downloaded tarball
///
/// `now` is the timestamp of the generated `.changes` entry.
pub fn run_from_tarball(config: &Config, tarball: &Path, now: DateTime<Utc>) -> Result<Summary> {
    let contents = archive::read_tarball(tarball)?;
    info!("Tarball contains {} {}", contents.name, contents.version);

    let spec_files = workdir::spec_files(&config.workdir)?;
    let Some(first_spec) = spec_files.first() else {
        return Err(Error::NoSpecFiles {
            package: config.package.clone(),
            dir: config.workdir.clone(),
        });
    };

    let current = SpecVersion::parse(&fs::read_to_string(first_spec)?)?;
    info!("Packaged commit: {} ({:?})", current.commit(), first_spec);

    let commits = new_commits(Commits::new(&contents.changelog), current.commit())?;
    info!("Found {} new commits", commits.len());

    let version = SnapshotVersion::from_commit(&contents.version, &commits[0]);
    let update = SpecUpdate {
        version: version.to_string(),
        major_version: major_version(&contents.version).to_string(),
        source: config.filename.clone(),
    };
    debug!("Spec update: {:?}", update);

    let entry = ChangesEntry::from_commits(now, &config.author, version.to_string(), &commits);
    let changes_files = workdir::changes_files(&config.workdir)?;
    if changes_files.is_empty() {
        warn!("No .changes file in {:?}", config.workdir);
    }

    let mut pending = Vec::with_capacity(spec_files.len() + changes_files.len());
    for path in &spec_files {
        pending.push(workdir::prepare_rewrite(path, |content| {
            rewrite_spec(content, &update)
        })?);
    }
    for path in &changes_files {
        pending.push(workdir::prepare_rewrite(path, |content| {
            prepend_entry(content, &entry)
        })?);
    }

    workdir::write_all(&pending)?;
    for path in &spec_files {
        info!("Updated {:?} to {}", path, version);
    }
    for path in &changes_files {
        info!("Added {} entries to {:?}", entry.messages.len(), path);
    }

    Ok(Summary {
        version,
        new_commits: commits.len(),
        spec_files,
        changes_files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::write_test_tarball;
    use chrono::TimeZone;

    const CHANGELOG: &str = "\
commit abcdef1234567890abcdef1234567890abcdef12
Merge: 1111111 2222222
Author: Jenkins <jenkins@review.openstack.org>
Date:   Tue Apr 9 10:00:00 2013 +0000

    Merge \"Fix the frobnicator\"

commit 2222222890abcdef1234567890abcdef12345678
Author: Jane Doe <jane@example.com>
Date:   Mon Apr 8 14:35:10 2013 +0200

    Fix the frobnicator

commit 1234567890abcdef1234567890abcdef12345678
Author: John Roe <john@example.com>
Date:   Sun Apr 7 09:12:00 2013 +0200

    Add initial frobnicator
";

    const SPEC: &str = "\
%define majorversion 2013.1
Name:           openstack-nova
Version:        2013.1+git.1365000000.1234567
Release:        0
Source:         nova-master.tar.gz
";

    const CHANGES: &str = "\
-------------------------------------------------------------------
Sun Mar 31 10:00:00 UTC 2013 - packager@example.com

- Initial package
";

    struct Checkout {
        dir: tempfile::TempDir,
        config: Config,
        tarball: PathBuf,
    }

    fn checkout(spec: Option<&str>) -> Checkout {
        let dir = tempfile::tempdir().unwrap();
        if let Some(spec) = spec {
            fs::write(dir.path().join("openstack-nova.spec"), spec).unwrap();
        }
        fs::write(dir.path().join("openstack-nova.changes"), CHANGES).unwrap();

        let config = Config::new(
            "nova",
            "master",
            "nova-master.tar.gz",
            "openstack-nova",
            dir.path(),
        )
        .with_author("packager@example.com");

        let tarball = config.tarball_path();
        write_test_tarball(
            &tarball,
            &[
                ("nova-2013.2.b1.57.gabcdef1/setup.py", "# setup\n"),
                ("nova-2013.2.b1.57.gabcdef1/ChangeLog", CHANGELOG),
            ],
        );

        Checkout {
            dir,
            config,
            tarball,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2013, 4, 10, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_run_from_tarball() {
        let checkout = checkout(Some(SPEC));
        let summary = run_from_tarball(&checkout.config, &checkout.tarball, now()).unwrap();

        assert_eq!(summary.new_commits, 2);
        assert_eq!(
            summary.version.to_string(),
            "2013.2.b1.57.gabcdef1+git.1365501600.abcdef1"
        );

        let spec = fs::read_to_string(checkout.dir.path().join("openstack-nova.spec")).unwrap();
        assert_eq!(
            spec,
            "\
%define majorversion 2013.2
Name:           openstack-nova
Version:        2013.2.b1.57.gabcdef1+git.1365501600.abcdef1
Release:        0
Source:         nova-master.tar.gz
"
        );

        let changes =
            fs::read_to_string(checkout.dir.path().join("openstack-nova.changes")).unwrap();
        let expected_entry = "\
-------------------------------------------------------------------
Wed Apr 10 08:00:00 UTC 2013 - packager@example.com

- Update to latest git snapshot 2013.2.b1.57.gabcdef1+git.1365501600.abcdef1:
  + Fix the frobnicator

";
        assert_eq!(changes, format!("{}{}", expected_entry, CHANGES));
    }

    #[test]
    fn test_no_new_changes_leaves_files_alone() {
        let spec = SPEC.replace("1365000000.1234567", "1365501600.abcdef1");
        let checkout = checkout(Some(spec.as_str()));

        let err = run_from_tarball(&checkout.config, &checkout.tarball, now()).unwrap_err();
        assert!(matches!(
            err,
            Error::Changelog(snapbump_changelog::Error::NoNewChanges { .. })
        ));

        let changes =
            fs::read_to_string(checkout.dir.path().join("openstack-nova.changes")).unwrap();
        assert_eq!(changes, CHANGES);
        let rewritten = fs::read_to_string(checkout.dir.path().join("openstack-nova.spec")).unwrap();
        assert_eq!(rewritten, spec);
    }

    #[test]
    fn test_unreadable_spec_leaves_checkout_untouched() {
        let checkout = checkout(Some(SPEC));
        fs::write(checkout.dir.path().join("zz-broken.spec"), [0xff, 0xfe]).unwrap();

        let err = run_from_tarball(&checkout.config, &checkout.tarball, now()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));

        let spec = fs::read_to_string(checkout.dir.path().join("openstack-nova.spec")).unwrap();
        assert_eq!(spec, SPEC);
        let changes =
            fs::read_to_string(checkout.dir.path().join("openstack-nova.changes")).unwrap();
        assert_eq!(changes, CHANGES);
    }

    #[test]
    fn test_empty_changelog() {
        let checkout = checkout(Some(SPEC));
        write_test_tarball(&checkout.tarball, &[("nova-2013.2/ChangeLog", "\n")]);

        let err = run_from_tarball(&checkout.config, &checkout.tarball, now()).unwrap_err();
        assert!(matches!(
            err,
            Error::Changelog(snapbump_changelog::Error::EmptyChangelog)
        ));
    }

    #[test]
    fn test_unknown_reference_takes_all_commits() {
        let spec = SPEC.replace("1234567", "7654321");
        let checkout = checkout(Some(spec.as_str()));

        let summary = run_from_tarball(&checkout.config, &checkout.tarball, now()).unwrap();
        assert_eq!(summary.new_commits, 3);
    }

    #[test]
    fn test_no_spec_files() {
        let checkout = checkout(None);
        let err = run_from_tarball(&checkout.config, &checkout.tarball, now()).unwrap_err();
        assert!(matches!(err, Error::NoSpecFiles { package, .. } if package == "openstack-nova"));
    }

    #[test]
    fn test_spec_without_snapshot_version() {
        let checkout = checkout(Some("Name: openstack-nova\nVersion: 2013.1\n"));
        let err = run_from_tarball(&checkout.config, &checkout.tarball, now()).unwrap_err();
        assert!(matches!(
            err,
            Error::Changelog(snapbump_changelog::Error::UnparseableSpecVersion(_))
        ));
    }
}
