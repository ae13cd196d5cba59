//! Resolved installer settings.
//!
//! All tunables (URLs, paths, timeouts, behavior toggles) are resolved once
//! from CLI arguments into an [`InstallerConfig`] and passed by reference to
//! everything downstream. Nothing below the CLI layer reads flags or
//! environment variables on its own.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Canonical source for the sysfetch script.
pub const DEFAULT_ARTIFACT_URL: &str =
    "https://raw.githubusercontent.com/sysfetch/sysfetch/main/sysfetch";

/// Where the script lands on the host.
pub const DEFAULT_INSTALL_PATH: &str = "/usr/local/bin/sysfetch";

/// Free-space floor below which we warn. The script is tiny; this threshold
/// exists to surface a nearly-full disk, not to gate the install.
pub const MIN_FREE_BYTES: u64 = 10 * 1024 * 1024;

/// Connect / total timeouts for the cheap connectivity probes.
pub const PROBE_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Connect / total timeouts for the artifact download.
pub const DOWNLOAD_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound on the sensors-detect run.
pub const DETECT_TIMEOUT: Duration = Duration::from_secs(60);

/// Fully resolved settings for one installer run.
#[derive(Debug, Clone)]
pub struct InstallerConfig {
    /// URL the artifact is fetched from.
    pub artifact_url: String,
    /// Destination path for the installed script.
    pub install_path: PathBuf,
    /// Directory run logs are written into.
    pub log_dir: PathBuf,
    pub probe_connect_timeout: Duration,
    pub probe_timeout: Duration,
    pub download_connect_timeout: Duration,
    pub download_timeout: Duration,
    pub detect_timeout: Duration,
    /// Free-space warning threshold for the destination filesystem.
    pub min_free_bytes: u64,
    /// Refuse to run without root. Off for prefix installs into
    /// user-writable destinations.
    pub require_root: bool,
    /// Treat "no network" as fatal instead of prompting to continue.
    pub strict_network: bool,
    /// Auto-confirm safety gates.
    pub assume_yes: bool,
    /// Reinstall even when the destination already matches the download.
    pub force: bool,
    pub skip_deps: bool,
    pub skip_sensors: bool,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            artifact_url: DEFAULT_ARTIFACT_URL.to_string(),
            install_path: PathBuf::from(DEFAULT_INSTALL_PATH),
            log_dir: env::temp_dir(),
            probe_connect_timeout: PROBE_CONNECT_TIMEOUT,
            probe_timeout: PROBE_TIMEOUT,
            download_connect_timeout: DOWNLOAD_CONNECT_TIMEOUT,
            download_timeout: DOWNLOAD_TIMEOUT,
            detect_timeout: DETECT_TIMEOUT,
            min_free_bytes: MIN_FREE_BYTES,
            require_root: true,
            strict_network: false,
            assume_yes: false,
            force: false,
            skip_deps: false,
            skip_sensors: false,
        }
    }
}
