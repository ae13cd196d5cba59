//! Destination filesystem free-space query.

use std::path::Path;

/// Free bytes available to unprivileged users on the filesystem holding
/// `path`. Returns None when the query fails; callers treat that as
/// "unknown", not as an error.
#[cfg(unix)]
pub fn free_space(path: &Path) -> Option<u64> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let c_path = CString::new(path.as_os_str().as_bytes()).ok()?;

    // SAFETY: statvfs fills the struct we hand it; c_path outlives the call
    unsafe {
        let mut stats: libc::statvfs = std::mem::zeroed();
        if libc::statvfs(c_path.as_ptr(), &mut stats) == 0 {
            Some(stats.f_bavail as u64 * stats.f_frsize as u64)
        } else {
            None
        }
    }
}

#[cfg(not(unix))]
pub fn free_space(_path: &Path) -> Option<u64> {
    None
}

/// Free space for the filesystem that will hold `dest`, walking up to the
/// nearest existing ancestor. The destination directory may not exist yet.
pub fn free_space_for(dest: &Path) -> Option<u64> {
    for ancestor in dest.ancestors() {
        if ancestor.as_os_str().is_empty() {
            continue;
        }
        if ancestor.exists() {
            return free_space(ancestor);
        }
    }
    None
}
