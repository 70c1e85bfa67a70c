use rsvp_core::share::{display_name, ShareLink};
use rsvp_core::{export, DashboardStats, RsvpResponse, View};
use serde::Serialize;

use crate::domain::AppState;

fn format_date(resp: &RsvpResponse) -> String {
    resp.created_at.format("%-m/%-d/%Y").to_string()
}

/// Heading area shown above guest-facing views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderVm {
    pub display_name: String,
    pub cover_image_url: Option<String>,
    pub is_loading: bool,
    pub show_heading: bool,
}

impl HeaderVm {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            display_name: display_name(&state.couple_name, &state.slug),
            cover_image_url: state.cover_image_url.clone(),
            is_loading: state.is_loading_name,
            show_heading: state.view.is_guest_facing(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RsvpRowVm {
    pub id: String,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    pub status_label: &'static str,
    pub attending: bool,
    pub party_size: u32,
    pub message: String,
    pub submitted_on: String,
}

impl From<&RsvpResponse> for RsvpRowVm {
    fn from(r: &RsvpResponse) -> Self {
        Self {
            id: r.id.clone(),
            guest_name: r.guest_name.clone(),
            guest_email: r.guest_email.clone(),
            guest_phone: r.guest_phone.clone().unwrap_or_default(),
            status_label: r.status_label(),
            attending: r.attending,
            party_size: r.party_size,
            message: r.message.clone().unwrap_or_default(),
            submitted_on: format_date(r),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardVm {
    pub display_name: String,
    pub share: ShareLink,
    pub stats: DashboardStats,
    pub rows: Vec<RsvpRowVm>,
    pub csv_file_name: String,
    pub is_preview: bool,
}

impl DashboardVm {
    pub fn from_state(state: &AppState, base_url: &str) -> Self {
        Self {
            display_name: display_name(&state.couple_name, &state.slug),
            share: ShareLink::new(base_url, &state.slug),
            stats: state.dashboard.stats,
            rows: state.dashboard.responses.iter().map(RsvpRowVm::from).collect(),
            csv_file_name: export::export_file_name(&state.slug),
            is_preview: state.is_preview,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Everything a surface needs to draw the current screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenVm {
    pub view: View,
    pub header: HeaderVm,
    pub theme_id: String,
    pub setup_error: Option<String>,
    pub error: Option<String>,
}

impl ScreenVm {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            view: state.view,
            header: HeaderVm::from_state(state),
            theme_id: state.theme_id.clone(),
            setup_error: state.setup_error.clone(),
            error: state.error.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn response(attending: bool) -> RsvpResponse {
        RsvpResponse {
            id: "r1".into(),
            host_id: "h".into(),
            guest_name: "Ann".into(),
            guest_email: "ann@example.com".into(),
            guest_phone: None,
            attending,
            party_size: 2,
            message: Some("Yay".into()),
            created_at: Utc.with_ymd_and_hms(2026, 3, 9, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn header_falls_back_to_title_from_slug() {
        let mut state = AppState::default();
        state.slug = "mary-and-john".into();
        state.view = View::Form;
        let vm = HeaderVm::from_state(&state);
        assert_eq!(vm.display_name, "Mary And John");
        assert!(vm.show_heading);
    }

    #[test]
    fn dashboard_rows_and_share_link() {
        let mut state = AppState::default();
        state.slug = "jo-ann".into();
        state.couple_name = "Jo & Ann".into();
        state.dashboard.replace(vec![response(true)]);

        let vm = DashboardVm::from_state(&state, "https://vows.example");
        assert_eq!(vm.share.url, "https://vows.example/jo-ann");
        assert_eq!(vm.csv_file_name, "jo-ann_rsvp_list.csv");
        assert_eq!(vm.stats.total_guests, 2);
        assert_eq!(vm.rows[0].status_label, "Attending");
        assert_eq!(vm.rows[0].submitted_on, "3/9/2026");
        assert_eq!(vm.rows[0].guest_phone, "");
    }
}
