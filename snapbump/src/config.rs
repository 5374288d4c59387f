//! Run configuration

use std::path::PathBuf;

/// Host serving `{component}/{component}-{version}.tar.gz`
pub const DEFAULT_TARBALL_HOST: &str = "https://tarballs.openstack.org";

/// Author of generated `.changes` entries when `VC_MAILADDR` is unset
pub const DEFAULT_AUTHOR: &str = "opensuse-packaging@opensuse.org";

/// Everything a run needs, independent of how it was collected
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream component (e.g., "nova")
    pub component: String,
    /// Upstream tarball version (e.g., "master")
    pub version: String,
    /// Local tarball filename, also written to `Source:`
    pub filename: String,
    /// Package name
    pub package: String,
    pub host: String,
    pub author: String,
    /// Directory holding the `.spec` and `.changes` files
    pub workdir: PathBuf,
}

impl Config {
    pub fn new(
        component: impl Into<String>,
        version: impl Into<String>,
        filename: impl Into<String>,
        package: impl Into<String>,
        workdir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            component: component.into(),
            version: version.into(),
            filename: filename.into(),
            package: package.into(),
            host: DEFAULT_TARBALL_HOST.to_string(),
            author: DEFAULT_AUTHOR.to_string(),
            workdir: workdir.into(),
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Where the tarball is saved
    pub fn tarball_path(&self) -> PathBuf {
        self.workdir.join(&self.filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new("nova", "master", "nova-master.tar.gz", "openstack-nova", "/tmp/pkg");
        assert_eq!(config.host, DEFAULT_TARBALL_HOST);
        assert_eq!(config.author, DEFAULT_AUTHOR);
        assert_eq!(config.tarball_path(), PathBuf::from("/tmp/pkg/nova-master.tar.gz"));
    }

    #[test]
    fn test_overrides() {
        let config = Config::new("nova", "master", "nova.tar.gz", "openstack-nova", ".")
            .with_host("http://localhost:8080")
            .with_author("me@example.com");
        assert_eq!(config.host, "http://localhost:8080");
        assert_eq!(config.author, "me@example.com");
    }
}
