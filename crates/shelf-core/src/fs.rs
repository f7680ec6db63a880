//! Filesystem utilities for atomic file replacement.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Move `from` onto `to`, replacing any existing file.
///
/// Some platforms refuse to rename onto an existing path, so a failed first
/// attempt removes `to` and tries once more. `from` is deleted if that also
/// fails.
pub fn rename_with_fallback(from: &Path, to: &Path) -> io::Result<()> {
    let first = match fs::rename(from, to) {
        Ok(()) => return Ok(()),
        Err(err) => err,
    };
    let _ = fs::remove_file(to);
    fs::rename(from, to).map_err(|second| {
        let _ = fs::remove_file(from);
        io::Error::new(
            second.kind(),
            format!("Could not replace {}: {}; retry: {}", to.display(), first, second),
        )
    })
}

/// Write `data` to a sibling temp file, sync it, and rename it over `path`.
///
/// Readers see either the old contents or the new contents, never a
/// half-written file.
pub fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no parent"))?;
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Invalid filename"))?;
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("System time error: {}", e)))?
        .as_nanos();
    let temp_path = parent.join(format!(".{}.{}.tmp", filename, nanos));

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)?;
    if let Err(err) = file.write_all(data).and_then(|_| file.sync_all()) {
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }
    drop(file);

    rename_with_fallback(&temp_path, path)
}
