use std::sync::atomic::{AtomicU32, Ordering};

use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;

static QUARANTINED: AtomicU32 = AtomicU32::new(0);

/// Sibling name an unreadable store is moved to, e.g.
/// `rsvp.redb.corrupt.20260301-101500.1234-0`.
fn quarantine_path(path: &Utf8Path) -> Utf8PathBuf {
    let file = path.file_name().unwrap_or(crate::RSVP_REDB_FILENAME);
    let stamp = Utc::now().format("%Y%m%d-%H%M%S%.3f");
    let seq = QUARANTINED.fetch_add(1, Ordering::Relaxed);
    path.with_file_name(format!(
        "{file}.corrupt.{stamp}.{}-{seq}",
        std::process::id()
    ))
}

/// Move an unreadable store aside so the next write starts a fresh file.
pub fn quarantine_corrupt_file(path: &Utf8Path) -> std::io::Result<Option<Utf8PathBuf>> {
    if !path.exists() {
        return Ok(None);
    }
    let target = quarantine_path(path);
    std::fs::rename(path, &target)?;
    tracing::warn!(from = %path, to = %target, "moved unreadable rsvp store aside");
    Ok(Some(target))
}
