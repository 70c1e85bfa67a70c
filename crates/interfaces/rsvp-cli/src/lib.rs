pub mod commands;
pub mod hosts;

use anyhow::Result;
use camino::Utf8PathBuf;
use rsvp_app_core::persistence::default_data_dir;
use rsvp_app_core::StorePersistence;

/// Open the record store under `data_dir`, or the platform default.
pub fn open_store(data_dir: Option<Utf8PathBuf>) -> Result<StorePersistence> {
    let root = match data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };
    tracing::debug!(root = %root, "opening rsvp store");
    Ok(StorePersistence::open(root))
}
