//! Tarball download

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use reqwest::header::USER_AGENT;
use tracing::debug;

use crate::{Error, Result};

const AGENT: &str = concat!("snapbump/", env!("CARGO_PKG_VERSION"));

/// URL of the snapshot tarball for `component` at `version`
pub fn tarball_url(host: &str, component: &str, version: &str) -> String {
    format!(
        "{}/{}/{}-{}.tar.gz",
        host.trim_end_matches('/'),
        component,
        component,
        version
    )
}

/// Download `url` to `out`, returning the number of bytes written.
///
/// The body is written to `{out}.part` and renamed once complete.
pub fn download<P: AsRef<Path>>(url: &str, out: P) -> Result<u64> {
    let client = reqwest::blocking::Client::new();
    let mut response = client.get(url).header(USER_AGENT, AGENT).send()?;

    if !response.status().is_success() {
        return Err(Error::Download {
            url: url.to_string(),
            status: response.status(),
        });
    }

    let output_path = out.as_ref();
    if let Some(output_dir) = output_path.parent() {
        if !output_dir.as_os_str().is_empty() && !output_dir.exists() {
            fs::create_dir_all(output_dir)?;
        }
    }

    let temp_path = PathBuf::from(format!("{}.part", output_path.display()));
    let mut file = File::create(&temp_path)?;
    let size = response.copy_to(&mut file)?;
    file.flush()?;
    drop(file);

    fs::rename(&temp_path, output_path)?;
    debug!("Downloaded {} bytes to {:?}", size, output_path);

    Ok(size)
}
