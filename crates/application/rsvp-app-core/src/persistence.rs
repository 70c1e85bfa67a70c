use std::sync::Arc;

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use chrono::Utc;
use directories::ProjectDirs;
use rsvp_core::{Host, RsvpDraft, RsvpResponse};
use rsvp_persistence::{NewHost, RedbRsvpStore, RsvpDataStore, StorageErrorKind};

use crate::ports::{HostDirectory, RsvpBook};
use crate::setup::SetupError;

const QUALIFIER: &str = "com";
const ORG: &str = "rsvp";
const APP: &str = "wedding-rsvp";

/// Platform data directory the store lives in when none is given.
pub fn default_data_dir() -> Result<Utf8PathBuf> {
    let proj_dirs = ProjectDirs::from(QUALIFIER, ORG, APP)
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Utf8PathBuf::from_path_buf(proj_dirs.data_dir().to_path_buf())
        .map_err(|p| anyhow::anyhow!("Data directory is not UTF-8: {}", p.display()))
}

/// Both record ports backed by one [`RsvpDataStore`].
pub struct StorePersistence<S = RedbRsvpStore> {
    store: Arc<S>,
}

impl<S> Clone for StorePersistence<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl StorePersistence<RedbRsvpStore> {
    pub fn open(root: impl Into<Utf8PathBuf>) -> Self {
        Self::new(RedbRsvpStore::new(root))
    }

    pub fn open_default() -> Result<Self> {
        Ok(Self::open(default_data_dir()?))
    }
}

impl<S: RsvpDataStore> StorePersistence<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: RsvpDataStore + 'static> HostDirectory for StorePersistence<S> {
    fn find_by_slug(&self, slug: &str) -> Result<Option<Host>> {
        self.store
            .find_host_by_slug(slug)
            .with_context(|| format!("Failed to look up host {slug:?}"))
    }

    fn create(&self, host: &NewHost) -> Result<Host, SetupError> {
        match self.store.insert_host(host) {
            Ok(created) => Ok(created),
            Err(e) if e.kind() == StorageErrorKind::Conflict => Err(SetupError::SlugTaken),
            Err(e) => Err(SetupError::Store(e.into())),
        }
    }

    fn set_cover_image(&self, slug: &str, cover_image_url: Option<&str>) -> Result<Host> {
        self.store
            .set_cover_image(slug, cover_image_url)
            .context("Failed to update cover image")
    }
}

impl<S: RsvpDataStore + 'static> RsvpBook for StorePersistence<S> {
    fn submit(&self, host_id: &str, draft: &RsvpDraft) -> Result<RsvpResponse> {
        let draft = draft.normalized()?;
        self.store
            .append_rsvp(host_id, &draft, Utc::now())
            .context("Failed to save RSVP")
    }

    fn list(&self, host_id: &str) -> Result<Vec<RsvpResponse>> {
        self.store
            .list_rsvps(host_id)
            .context("Failed to load RSVPs")
    }

    fn delete(&self, rsvp_id: &str) -> Result<bool> {
        self.store
            .delete_rsvp(rsvp_id)
            .context("Failed to delete RSVP")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persistence() -> (tempfile::TempDir, StorePersistence) {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        (dir, StorePersistence::open(root))
    }

    #[test]
    fn duplicate_slug_maps_to_setup_error() {
        let (_dir, p) = persistence();
        let host = crate::setup::new_host("Mary & John", "charcoal").unwrap();
        p.create(&host).unwrap();
        assert!(matches!(p.create(&host), Err(SetupError::SlugTaken)));
    }

    #[test]
    fn submit_normalizes_draft() {
        let (_dir, p) = persistence();
        let host = p
            .create(&crate::setup::new_host("Jo Ann", "sage").unwrap())
            .unwrap();
        let saved = p
            .submit(
                &host.id,
                &RsvpDraft {
                    guest_name: " Bo ".into(),
                    guest_email: "bo@example.com".into(),
                    guest_phone: None,
                    attending: true,
                    party_size: 0,
                    message: None,
                },
            )
            .unwrap();
        assert_eq!(saved.guest_name, "Bo");
        assert_eq!(saved.party_size, rsvp_config::MIN_PARTY_SIZE);
        assert_eq!(p.list(&host.id).unwrap(), vec![saved]);
    }
}
