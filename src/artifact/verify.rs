//! Post-install verification.
//!
//! Answers the question a user would ask right after installing: does
//! typing `sysfetch` actually run the file we just wrote? Resolution
//! failures are fatal; a missing exec bit, an unparseable version, or a
//! shadowing copy earlier on PATH are advisory.

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{PackmuleError, Result};
use crate::probe::{is_executable, resolve_on_path};
use crate::shell::CommandOptions;

/// What verification found.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyReport {
    /// Where the command name actually resolves on the search path.
    pub resolved: PathBuf,
    /// Whether the destination file carries the executable bit.
    pub executable: bool,
    /// Version string reported by the installed script, if any.
    pub version: Option<String>,
    /// A different install earlier on the search path, if one wins.
    pub shadowed_by: Option<PathBuf>,
}

/// Verify an install of `dest` against the given search path.
///
/// `version_probe` runs the script's `--version` and extracts a version
/// string; injectable so tests do not execute anything.
pub fn verify_install(
    dest: &Path,
    path_entries: &[PathBuf],
    version_probe: &dyn Fn(&Path) -> Option<String>,
) -> Result<VerifyReport> {
    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| PackmuleError::Verification {
            message: format!("{} has no file name to resolve", dest.display()),
        })?;

    let resolved = resolve_on_path(&name, path_entries).ok_or_else(|| {
        PackmuleError::Verification {
            message: format!("'{}' does not resolve on the search path", name),
        }
    })?;

    let shadowed_by = if same_file(&resolved, dest) {
        None
    } else {
        Some(resolved.clone())
    };

    Ok(VerifyReport {
        resolved,
        executable: is_executable(dest),
        version: version_probe(dest),
        shadowed_by,
    })
}

/// Run `<path> --version` and pull a version string out of the output.
pub fn default_version_probe(path: &Path) -> Option<String> {
    let program = path.to_str()?;
    let options = CommandOptions {
        timeout: Some(Duration::from_secs(10)),
        ..CommandOptions::default()
    };
    let output = crate::shell::run(program, &["--version"], &options).ok()?;
    if !output.success {
        return None;
    }
    extract_version(&output.stdout)
}

/// Extract a version from command output.
pub fn extract_version(output: &str) -> Option<String> {
    let patterns = [r"(\d+\.\d+\.\d+)", r"version\s+(\d+\.\d+)", r"v(\d+\.\d+)"];

    for pattern in &patterns {
        if let Ok(re) = regex::Regex::new(pattern) {
            if let Some(caps) = re.captures(output) {
                if let Some(m) = caps.get(1) {
                    return Some(m.as_str().to_string());
                }
            }
        }
    }

    None
}

/// Compare two paths through the symlink layer when possible.
fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(ca), Ok(cb)) => ca == cb,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn no_version(_: &Path) -> Option<String> {
        None
    }

    fn create_script(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "#!/bin/sh\necho sysfetch\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
        }
    }

    #[test]
    fn resolving_install_passes() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("bin");
        let dest = bin.join("sysfetch");
        create_script(&dest);

        let report = verify_install(&dest, &[bin], &no_version).unwrap();

        assert!(report.executable);
        assert!(report.shadowed_by.is_none());
        assert_eq!(report.resolved.file_name().unwrap(), "sysfetch");
    }

    #[test]
    fn unresolvable_name_is_fatal() {
        let temp = TempDir::new().unwrap();
        let elsewhere = temp.path().join("elsewhere");
        fs::create_dir_all(&elsewhere).unwrap();
        let dest = temp.path().join("bin").join("sysfetch");
        create_script(&dest);

        let err = verify_install(&dest, &[elsewhere], &no_version).unwrap_err();

        assert!(matches!(err, PackmuleError::Verification { .. }));
        assert!(err.to_string().contains("sysfetch"));
    }

    #[test]
    fn earlier_path_entry_shadows_the_install() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("first");
        let second = temp.path().join("second");
        let shadow = first.join("sysfetch");
        let dest = second.join("sysfetch");
        create_script(&shadow);
        create_script(&dest);

        let report = verify_install(&dest, &[first, second], &no_version).unwrap();

        let shadowed_by = report.shadowed_by.expect("should detect shadowing");
        assert!(shadowed_by.starts_with(temp.path().join("first")));
    }

    #[test]
    fn version_probe_result_lands_in_report() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("bin");
        let dest = bin.join("sysfetch");
        create_script(&dest);

        let probe = |_: &Path| Some("2.1.3".to_string());
        let report = verify_install(&dest, &[bin], &probe).unwrap();

        assert_eq!(report.version.as_deref(), Some("2.1.3"));
    }

    #[cfg(unix)]
    #[test]
    fn shadow_resolves_even_when_dest_is_gone() {
        // A stale copy elsewhere keeps the name resolvable; the report
        // flags both the shadow and the missing exec bit on dest.
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("first");
        create_script(&first.join("sysfetch"));
        let dest = temp.path().join("second").join("sysfetch");

        let report = verify_install(&dest, &[first], &no_version).unwrap();

        assert!(!report.executable);
        assert!(report.shadowed_by.is_some());
    }

    #[test]
    fn report_serializes_to_json() {
        let report = VerifyReport {
            resolved: PathBuf::from("/usr/local/bin/sysfetch"),
            executable: true,
            version: Some("1.0.0".to_string()),
            shadowed_by: None,
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["resolved"], "/usr/local/bin/sysfetch");
        assert_eq!(json["executable"], true);
        assert_eq!(json["version"], "1.0.0");
        assert!(json["shadowed_by"].is_null());
    }

    #[test]
    fn extracts_three_part_versions_first() {
        assert_eq!(
            extract_version("sysfetch 2.1.3 (linux)").as_deref(),
            Some("2.1.3")
        );
    }

    #[test]
    fn extracts_version_prefixed_pairs() {
        assert_eq!(extract_version("tool version 2.1").as_deref(), Some("2.1"));
        assert_eq!(extract_version("v3.4").as_deref(), Some("3.4"));
    }

    #[test]
    fn no_version_in_output_returns_none() {
        assert!(extract_version("no digits here").is_none());
        assert!(extract_version("").is_none());
    }
}
