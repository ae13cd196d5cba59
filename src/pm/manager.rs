//! Package manager detection and command tables.
//!
//! Selection is by probing PATH for manager binaries in a fixed priority
//! order, not by reading the distro name: derivatives lie about their
//! parentage, but the binary that is actually installed does not.

use serde::Serialize;
use std::path::PathBuf;

use crate::probe::{parse_system_path, resolve_on_path};

/// Package manager families packmule knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManagerKind {
    Apt,
    Dnf,
    Yum,
    Pacman,
    Zypper,
    Unknown,
}

impl PackageManagerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManagerKind::Apt => "apt",
            PackageManagerKind::Dnf => "dnf",
            PackageManagerKind::Yum => "yum",
            PackageManagerKind::Pacman => "pacman",
            PackageManagerKind::Zypper => "zypper",
            PackageManagerKind::Unknown => "unknown",
        }
    }
}

/// Binaries probed for, in priority order. `apt-get` outranks `apt`
/// because its output is stable for scripting; both map to the apt family.
const PROBE_ORDER: &[(&str, PackageManagerKind)] = &[
    ("apt-get", PackageManagerKind::Apt),
    ("apt", PackageManagerKind::Apt),
    ("dnf", PackageManagerKind::Dnf),
    ("yum", PackageManagerKind::Yum),
    ("pacman", PackageManagerKind::Pacman),
    ("zypper", PackageManagerKind::Zypper),
];

/// A detected package manager: its family plus the binary that was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManager {
    pub kind: PackageManagerKind,
    pub binary: String,
}

impl PackageManager {
    /// Probe the system PATH for a known package manager.
    pub fn detect() -> Option<Self> {
        Self::detect_in(&parse_system_path())
    }

    /// Probe the given PATH entries for a known package manager.
    pub fn detect_in(path_entries: &[PathBuf]) -> Option<Self> {
        for (binary, kind) in PROBE_ORDER {
            if resolve_on_path(binary, path_entries).is_some() {
                return Some(Self {
                    kind: *kind,
                    binary: (*binary).to_string(),
                });
            }
        }
        None
    }

    /// Argv for installing a single package, non-interactive and quiet.
    pub fn install_args(&self, package: &str) -> Vec<String> {
        let argv: Vec<&str> = match self.kind {
            PackageManagerKind::Apt => vec![&self.binary, "install", "-y", "-qq", package],
            PackageManagerKind::Dnf | PackageManagerKind::Yum => {
                vec![&self.binary, "install", "-y", "-q", package]
            }
            PackageManagerKind::Pacman => {
                vec![&self.binary, "-S", "--noconfirm", "--needed", "--quiet", package]
            }
            PackageManagerKind::Zypper => {
                vec![&self.binary, "--non-interactive", "--quiet", "install", package]
            }
            PackageManagerKind::Unknown => vec![],
        };
        argv.into_iter().map(String::from).collect()
    }

    /// Argv for refreshing package metadata.
    pub fn refresh_args(&self) -> Vec<String> {
        let argv: Vec<&str> = match self.kind {
            PackageManagerKind::Apt => vec![&self.binary, "update", "-qq"],
            PackageManagerKind::Dnf | PackageManagerKind::Yum => {
                vec![&self.binary, "check-update", "-q"]
            }
            PackageManagerKind::Pacman => vec![&self.binary, "-Sy", "--noconfirm"],
            PackageManagerKind::Zypper => vec![&self.binary, "--non-interactive", "refresh"],
            PackageManagerKind::Unknown => vec![],
        };
        argv.into_iter().map(String::from).collect()
    }

    /// Extra environment for manager commands.
    pub fn env(&self) -> Vec<(String, String)> {
        match self.kind {
            PackageManagerKind::Apt => vec![(
                "DEBIAN_FRONTEND".to_string(),
                "noninteractive".to_string(),
            )],
            _ => vec![],
        }
    }

    /// Whether a refresh exit code counts as success.
    ///
    /// `dnf`/`yum check-update` exits 100 when updates are available; that
    /// is a healthy refresh, not a failure.
    pub fn refresh_ok(&self, exit_code: Option<i32>) -> bool {
        match self.kind {
            PackageManagerKind::Dnf | PackageManagerKind::Yum => {
                matches!(exit_code, Some(0) | Some(100))
            }
            _ => exit_code == Some(0),
        }
    }
}
