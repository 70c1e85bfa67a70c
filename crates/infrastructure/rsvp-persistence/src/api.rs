use chrono::{DateTime, Utc};
use rsvp_core::{Host, RsvpDraft, RsvpResponse};
use serde::{Deserialize, Serialize};

pub const RSVP_REDB_FILENAME: &str = "rsvp.redb";
pub const CURRENT_SCHEMA: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbState {
    Missing,
    Valid,
    Busy,
    Corrupt,
    NewerSchema { found: u32, supported: u32 },
}

/// Fields supplied when a couple creates their page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewHost {
    pub slug: String,
    pub couple_name: String,
    pub theme_id: Option<String>,
    pub event_date: Option<String>,
    pub location: Option<String>,
}

pub trait RsvpDataStore: Send + Sync {
    fn validate(&self) -> Result<DbState, crate::StorageError>;

    fn find_host_by_slug(&self, slug: &str) -> Result<Option<Host>, crate::StorageError>;
    fn insert_host(&self, host: &NewHost) -> Result<Host, crate::StorageError>;
    fn set_host_theme(&self, slug: &str, theme_id: &str) -> Result<Host, crate::StorageError>;
    fn set_cover_image(
        &self,
        slug: &str,
        cover_image_url: Option<&str>,
    ) -> Result<Host, crate::StorageError>;

    fn append_rsvp(
        &self,
        host_id: &str,
        draft: &RsvpDraft,
        created_at: DateTime<Utc>,
    ) -> Result<RsvpResponse, crate::StorageError>;
    /// Newest first.
    fn list_rsvps(&self, host_id: &str) -> Result<Vec<RsvpResponse>, crate::StorageError>;
    /// Returns whether a response was removed.
    fn delete_rsvp(&self, rsvp_id: &str) -> Result<bool, crate::StorageError>;
}
