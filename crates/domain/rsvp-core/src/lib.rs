use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod export;
pub mod palette;
pub mod share;
pub mod slug;
pub mod themes;
pub mod view;

pub use palette::{generate_palette, try_generate_palette, ColorScale, PaletteError, Rgb};
pub use slug::Slug;
pub use themes::Theme;
pub use view::{resolve_initial_view, Resolution, ResolveRule, RouteContext, View};

pub type HostId = String;
pub type RsvpId = String;

/// The couple owning a page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Host {
    pub id: HostId,
    pub slug: String,
    pub couple_name: String,
    pub theme_id: Option<String>,
    pub cover_image_url: Option<String>,
    pub event_date: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A guest's answer as submitted through the form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RsvpDraft {
    pub guest_name: String,
    pub guest_email: String,
    #[serde(default)]
    pub guest_phone: Option<String>,
    pub attending: bool,
    #[serde(default = "default_party_size")]
    pub party_size: u32,
    #[serde(default)]
    pub message: Option<String>,
}

fn default_party_size() -> u32 {
    rsvp_config::MIN_PARTY_SIZE
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("Please enter your name")]
    MissingName,
    #[error("Please enter your email")]
    MissingEmail,
}

impl RsvpDraft {
    /// Trim text fields, drop blank optionals and clamp the party size.
    pub fn normalized(&self) -> Result<Self, DraftError> {
        let guest_name = self.guest_name.trim();
        let guest_email = self.guest_email.trim();
        if guest_name.is_empty() {
            return Err(DraftError::MissingName);
        }
        if guest_email.is_empty() {
            return Err(DraftError::MissingEmail);
        }
        let non_blank = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        Ok(Self {
            guest_name: guest_name.to_string(),
            guest_email: guest_email.to_string(),
            guest_phone: non_blank(&self.guest_phone),
            attending: self.attending,
            party_size: rsvp_config::clamp_party_size(self.party_size),
            message: non_blank(&self.message),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RsvpResponse {
    pub id: RsvpId,
    pub host_id: HostId,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: Option<String>,
    pub attending: bool,
    pub party_size: u32,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl RsvpResponse {
    pub fn status_label(&self) -> &'static str {
        if self.attending {
            "Attending"
        } else {
            "Not Attending"
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardStats {
    pub total: usize,
    pub accepted: usize,
    pub declined: usize,
    /// Party sizes summed over accepted responses only.
    pub total_guests: u64,
}

impl DashboardStats {
    pub fn from_responses(responses: &[RsvpResponse]) -> Self {
        let accepted = responses.iter().filter(|r| r.attending);
        Self {
            total: responses.len(),
            accepted: accepted.clone().count(),
            declined: responses.iter().filter(|r| !r.attending).count(),
            total_guests: accepted.map(|r| u64::from(r.party_size)).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> RsvpDraft {
        RsvpDraft {
            guest_name: "  Ann Lee ".into(),
            guest_email: "ann@example.com".into(),
            guest_phone: Some("   ".into()),
            attending: true,
            party_size: 40,
            message: Some(" See you there ".into()),
        }
    }

    #[test]
    fn normalized_trims_and_clamps() {
        let d = draft().normalized().unwrap();
        assert_eq!(d.guest_name, "Ann Lee");
        assert_eq!(d.guest_phone, None);
        assert_eq!(d.party_size, rsvp_config::MAX_PARTY_SIZE);
        assert_eq!(d.message.as_deref(), Some("See you there"));
    }

    #[test]
    fn normalized_requires_name_and_email() {
        let mut d = draft();
        d.guest_name = " ".into();
        assert_eq!(d.normalized(), Err(DraftError::MissingName));

        let mut d = draft();
        d.guest_email.clear();
        assert_eq!(d.normalized(), Err(DraftError::MissingEmail));
    }

    #[test]
    fn deserialized_draft_defaults_party_size() {
        let d: RsvpDraft = serde_json::from_str(
            r#"{"guest_name":"Bo","guest_email":"bo@example.com","attending":false}"#,
        )
        .unwrap();
        assert_eq!(d.party_size, rsvp_config::MIN_PARTY_SIZE);
        assert_eq!(d.guest_phone, None);
    }

    #[test]
    fn stats_count_guests_only_for_accepted() {
        let mk = |attending, party_size| RsvpResponse {
            id: "r".into(),
            host_id: "h".into(),
            guest_name: "g".into(),
            guest_email: "g@example.com".into(),
            guest_phone: None,
            attending,
            party_size,
            message: None,
            created_at: Utc::now(),
        };
        let stats = DashboardStats::from_responses(&[mk(true, 2), mk(false, 5), mk(true, 1)]);
        assert_eq!(
            stats,
            DashboardStats {
                total: 3,
                accepted: 2,
                declined: 1,
                total_guests: 3
            }
        );
    }
}
