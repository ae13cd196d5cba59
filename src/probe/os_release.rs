//! `/etc/os-release` parsing.
//!
//! Distribution identity is advisory: it feeds log lines and the `check`
//! report, never branching logic. Package manager selection is done by
//! probing for binaries, not by trusting the distro name.

use serde::Serialize;
use std::path::Path;

const OS_RELEASE_PATH: &str = "/etc/os-release";

/// Fields of interest from `/etc/os-release`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OsRelease {
    pub id: Option<String>,
    pub name: Option<String>,
    pub pretty_name: Option<String>,
    pub version_id: Option<String>,
}

impl OsRelease {
    /// Read and parse `/etc/os-release`. Returns None when the file is
    /// missing or unreadable (containers and unusual distros).
    pub fn load() -> Option<Self> {
        Self::load_from(Path::new(OS_RELEASE_PATH))
    }

    /// Read and parse an os-release file at a specific path.
    pub fn load_from(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    /// Parse os-release content.
    ///
    /// Lines are `KEY=VALUE`; values may be quoted. Unknown keys and
    /// malformed lines are ignored.
    pub fn parse(contents: &str) -> Self {
        let mut release = Self::default();

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = unquote(value.trim());

            match key.trim() {
                "ID" => release.id = Some(value),
                "NAME" => release.name = Some(value),
                "PRETTY_NAME" => release.pretty_name = Some(value),
                "VERSION_ID" => release.version_id = Some(value),
                _ => {}
            }
        }

        release
    }

    /// Best human-readable name for log lines.
    pub fn display_name(&self) -> String {
        self.pretty_name
            .clone()
            .or_else(|| self.name.clone())
            .or_else(|| self.id.clone())
            .unwrap_or_else(|| "unknown Linux".to_string())
    }
}

fn unquote(value: &str) -> String {
    let value = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value);
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const UBUNTU: &str = r#"
PRETTY_NAME="Ubuntu 24.04.1 LTS"
NAME="Ubuntu"
VERSION_ID="24.04"
ID=ubuntu
ID_LIKE=debian
"#;

    #[test]
    fn parses_ubuntu_release() {
        let release = OsRelease::parse(UBUNTU);
        assert_eq!(release.id.as_deref(), Some("ubuntu"));
        assert_eq!(release.name.as_deref(), Some("Ubuntu"));
        assert_eq!(release.pretty_name.as_deref(), Some("Ubuntu 24.04.1 LTS"));
        assert_eq!(release.version_id.as_deref(), Some("24.04"));
    }

    #[test]
    fn parses_unquoted_and_single_quoted_values() {
        let release = OsRelease::parse("ID=arch\nNAME='Arch Linux'\n");
        assert_eq!(release.id.as_deref(), Some("arch"));
        assert_eq!(release.name.as_deref(), Some("Arch Linux"));
    }

    #[test]
    fn ignores_comments_and_malformed_lines() {
        let release = OsRelease::parse("# comment\nnot a pair\nID=fedora\n");
        assert_eq!(release.id.as_deref(), Some("fedora"));
        assert!(release.name.is_none());
    }

    #[test]
    fn display_name_prefers_pretty_name() {
        let release = OsRelease::parse(UBUNTU);
        assert_eq!(release.display_name(), "Ubuntu 24.04.1 LTS");
    }

    #[test]
    fn display_name_falls_back_to_name_then_id() {
        let release = OsRelease::parse("NAME=Debian\nID=debian\n");
        assert_eq!(release.display_name(), "Debian");

        let release = OsRelease::parse("ID=debian\n");
        assert_eq!(release.display_name(), "debian");
    }

    #[test]
    fn display_name_for_empty_release() {
        let release = OsRelease::default();
        assert_eq!(release.display_name(), "unknown Linux");
    }

    #[test]
    fn load_from_missing_file_returns_none() {
        assert!(OsRelease::load_from(Path::new("/nonexistent/os-release")).is_none());
    }

    #[test]
    fn load_from_reads_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("os-release");
        std::fs::write(&path, "ID=alpine\nPRETTY_NAME=\"Alpine Linux v3.20\"\n").unwrap();

        let release = OsRelease::load_from(&path).unwrap();
        assert_eq!(release.id.as_deref(), Some("alpine"));
        assert_eq!(release.display_name(), "Alpine Linux v3.20");
    }
}
