//! Artifact download and atomic installation.
//!
//! The sysfetch script is fetched over HTTPS, validated, and written to
//! its destination through a temp file in the same directory so the
//! destination is never left half-written. When the destination already
//! holds identical content the install is skipped entirely.

use reqwest::blocking::Client;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::config::InstallerConfig;
use crate::error::{PackmuleError, Result};

/// Result of a fetch-and-install cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A new copy was written to disk.
    Installed {
        path: PathBuf,
        sha256: String,
        bytes: u64,
    },
    /// The destination already holds this exact content.
    AlreadyCurrent { path: PathBuf, sha256: String },
}

/// Downloads the report script and installs it atomically.
pub struct Fetcher<'a> {
    config: &'a InstallerConfig,
}

impl<'a> Fetcher<'a> {
    pub fn new(config: &'a InstallerConfig) -> Self {
        Self { config }
    }

    /// Download, validate, and install the script.
    ///
    /// Validation happens before any filesystem write, and the write is
    /// temp-file-then-rename, so a failure at any point leaves the
    /// current install untouched.
    pub fn fetch_and_install(&self) -> Result<FetchOutcome> {
        let body = self.download()?;
        validate_script(&body, &self.config.artifact_url)?;

        let digest = sha256_hex(&body);
        let dest = &self.config.install_path;

        if !self.config.force {
            if let Some(existing) = installed_digest(dest) {
                if existing == digest {
                    debug!("{} already at {}", dest.display(), digest);
                    return Ok(FetchOutcome::AlreadyCurrent {
                        path: dest.clone(),
                        sha256: digest,
                    });
                }
            }
        }

        install_atomic(dest, &body)?;
        debug!("installed {} bytes to {}", body.len(), dest.display());

        Ok(FetchOutcome::Installed {
            path: dest.clone(),
            sha256: digest,
            bytes: body.len() as u64,
        })
    }

    fn download(&self) -> Result<Vec<u8>> {
        let url = &self.config.artifact_url;
        let client = Client::builder()
            .user_agent("packmule")
            .connect_timeout(self.config.download_connect_timeout)
            .timeout(self.config.download_timeout)
            .build()?;

        let response = client.get(url).send().map_err(|e| PackmuleError::Download {
            url: url.clone(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PackmuleError::Download {
                url: url.clone(),
                message: format!("HTTP {}", status),
            });
        }

        let body = response.bytes().map_err(|e| PackmuleError::Download {
            url: url.clone(),
            message: e.to_string(),
        })?;

        debug!("downloaded {} bytes from {}", body.len(), url);
        Ok(body.to_vec())
    }
}

/// Reject responses that are clearly not the script: empty bodies and
/// HTML error pages served with a 200.
fn validate_script(body: &[u8], url: &str) -> Result<()> {
    if body.is_empty() {
        return Err(PackmuleError::ArtifactInvalid {
            message: format!("empty response from {}", url),
        });
    }
    if !body.starts_with(b"#!") {
        return Err(PackmuleError::ArtifactInvalid {
            message: format!("{} did not return a shell script (no shebang)", url),
        });
    }
    Ok(())
}

/// SHA-256 of `body` as lowercase hex.
pub fn sha256_hex(body: &[u8]) -> String {
    hex::encode(Sha256::digest(body))
}

/// Digest of the currently installed file, if one exists.
fn installed_digest(dest: &Path) -> Option<String> {
    fs::read(dest).ok().map(|existing| sha256_hex(&existing))
}

/// Write `body` to `dest` via a temp file in the same directory.
///
/// The temp file lives next to the destination so the final rename
/// never crosses a filesystem boundary. It is made executable before
/// the rename, so the destination is runnable the moment it appears.
fn install_atomic(dest: &Path, body: &[u8]) -> Result<()> {
    let parent = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(body)?;
    temp.flush()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(temp.path(), fs::Permissions::from_mode(0o755))?;
    }

    temp.persist(dest).map_err(|e| PackmuleError::Io(e.error))?;
    Ok(())
}
