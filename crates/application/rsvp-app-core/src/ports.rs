use rsvp_core::{Host, RsvpDraft, RsvpResponse};
use rsvp_persistence::NewHost;

use crate::setup::SetupError;

pub trait HostDirectory: Send + Sync + 'static {
    fn find_by_slug(&self, slug: &str) -> anyhow::Result<Option<Host>>;
    fn create(&self, host: &NewHost) -> Result<Host, SetupError>;
    fn set_cover_image(&self, slug: &str, cover_image_url: Option<&str>) -> anyhow::Result<Host>;
}

pub trait RsvpBook: Send + Sync + 'static {
    fn submit(&self, host_id: &str, draft: &RsvpDraft) -> anyhow::Result<RsvpResponse>;
    /// Newest first.
    fn list(&self, host_id: &str) -> anyhow::Result<Vec<RsvpResponse>>;
    fn delete(&self, rsvp_id: &str) -> anyhow::Result<bool>;
}

/// Address bar of whatever surface hosts the app.
pub trait HistoryPort: Send + Sync + 'static {
    fn push(&self, location: &str) -> anyhow::Result<()>;
    fn replace(&self, location: &str) -> anyhow::Result<()>;
}
