//! Filesystem helpers for owner-only files and atomic replacement.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Create `dir` (and parents) if missing, restricting it to the owner on unix.
pub fn ensure_private_dir(dir: &Path) -> io::Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(dir, fs::Permissions::from_mode(0o700))?;
        }
    }
    Ok(())
}

/// Exclusively create a new file readable and writable only by the owner.
///
/// Fails with `AlreadyExists` if anything is already at `path`.
pub fn create_owner_only(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}

/// Write `data` to a sibling temp file, fsync it, then rename it over `path`.
pub fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    let temp_path = write_temp_sibling(path, data)?;
    rename_with_fallback(&temp_path, path)
}

/// Publish `data` at `path` only if nothing is there yet.
///
/// The data is written and synced to a sibling temp file first and then
/// hard-linked into place, so `path` never exists partially written. Fails
/// with `AlreadyExists` if `path` appeared in the meantime.
pub fn persist_new(path: &Path, data: &[u8]) -> io::Result<()> {
    let temp_path = write_temp_sibling(path, data)?;
    let linked = fs::hard_link(&temp_path, path);
    let _ = fs::remove_file(&temp_path);
    linked
}

/// Owner-only temp file next to `path`, unique across processes and threads.
fn write_temp_sibling(path: &Path, data: &[u8]) -> io::Result<PathBuf> {
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let parent = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no parent"))?;
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "invalid filename"))?;
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| io::Error::other(format!("system time error: {}", e)))?
        .as_nanos();
    let temp_path = parent.join(format!(
        ".{}.{}.{}.{}.tmp",
        filename,
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::Relaxed),
        nanos
    ));

    let mut file = create_owner_only(&temp_path)?;
    if let Err(err) = file.write_all(data).and_then(|_| file.sync_all()) {
        drop(file);
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }
    Ok(temp_path)
}

/// Rename a file, with fallback for platforms where rename fails if the target exists.
///
/// If the rename ultimately fails, the temp file is cleaned up.
pub fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    if let Err(initial_err) = fs::rename(temp_path, destination) {
        // Best-effort replace on platforms where rename fails if target exists.
        let _ = fs::remove_file(destination);
        fs::rename(temp_path, destination).map_err(|retry_err| {
            let _ = fs::remove_file(temp_path);
            io::Error::new(
                retry_err.kind(),
                format!(
                    "Atomic rename failed (initial: {}, retry: {})",
                    initial_err, retry_err
                ),
            )
        })?;
    }
    Ok(())
}
