use rsvp_core::View;

use crate::domain::{AppState, DashboardState};

use super::events::DomainEvent;

pub fn reduce(mut state: AppState, ev: DomainEvent) -> AppState {
    match ev {
        DomainEvent::Booted(resolution) => {
            state.view = resolution.view;
            state.slug = resolution.slug;
            state.couple_name = resolution.display_name;
        }

        DomainEvent::ViewChanged(view) => state.view = view,
        DomainEvent::LocationChanged(location) => state.location = location,

        DomainEvent::PreviewChanged(on) => {
            state.is_preview = on;
            state.view = if on { View::Form } else { View::Dashboard };
        }

        DomainEvent::NewEventStarted { generation } => {
            state.view = View::Setup;
            state.slug.clear();
            state.couple_name.clear();
            state.cover_image_url = None;
            state.host = None;
            state.host_generation = generation;
            state.is_loading_name = false;
            state.is_preview = false;
            state.dashboard = DashboardState::default();
            state.last_submitted = None;
            state.setup_error = None;
        }

        DomainEvent::HostLookupStarted { slug, generation } => {
            state.slug = slug;
            state.host_generation = generation;
            state.host = None;
            state.cover_image_url = None;
            state.is_loading_name = true;
        }

        DomainEvent::HostLoaded { generation: _, host } => {
            state.is_loading_name = false;
            if let Some(host) = host {
                if !host.couple_name.is_empty() {
                    state.couple_name = host.couple_name.clone();
                }
                state.cover_image_url = host.cover_image_url.clone();
                state.host = Some(host);
            }
        }

        DomainEvent::HostLookupFailed { .. } => {
            state.is_loading_name = false;
        }

        DomainEvent::HostCreated(host) => {
            state.slug = host.slug.clone();
            state.couple_name = host.couple_name.clone();
            state.cover_image_url = host.cover_image_url.clone();
            state.host = Some(host);
            state.setup_error = None;
            state.dashboard = DashboardState::default();
        }

        DomainEvent::SetupRejected(message) => state.setup_error = Some(message),
        DomainEvent::ThemeApplied(theme_id) => state.theme_id = theme_id,
        DomainEvent::CoverImageChanged(url) => state.cover_image_url = url,

        DomainEvent::RsvpSubmitted(response) => {
            state.last_submitted = Some(response);
            state.view = View::Success;
        }

        DomainEvent::RsvpsRequested => state.dashboard.is_loading = true,

        DomainEvent::RsvpsLoaded {
            host_id: _,
            responses,
        } => state.dashboard.replace(responses),

        DomainEvent::RsvpDeleted(id) => {
            let remaining = state
                .dashboard
                .responses
                .iter()
                .filter(|r| r.id != id)
                .cloned()
                .collect();
            state.dashboard.replace(remaining);
        }

        DomainEvent::UserError(msg) => {
            state.dashboard.is_loading = false;
            state.error = Some(msg);
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rsvp_core::{resolve_initial_view, Host, RouteContext, RsvpResponse};

    fn response(id: &str, attending: bool, party_size: u32) -> RsvpResponse {
        RsvpResponse {
            id: id.into(),
            host_id: "h".into(),
            guest_name: id.into(),
            guest_email: format!("{id}@example.com"),
            guest_phone: None,
            attending,
            party_size,
            message: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn booted_copies_resolution() {
        let resolution = resolve_initial_view(&RouteContext::parse("/?setup=jo-ann&name=Jo+Ann"));
        let state = reduce(AppState::default(), DomainEvent::Booted(resolution));
        assert_eq!(state.view, View::LinkShare);
        assert_eq!(state.slug, "jo-ann");
        assert_eq!(state.couple_name, "Jo Ann");
    }

    #[test]
    fn loaded_host_without_name_keeps_display_name() {
        let mut state = AppState::default();
        state.couple_name = "From Query".into();
        let host = Host {
            id: "h".into(),
            slug: "s".into(),
            couple_name: String::new(),
            theme_id: None,
            cover_image_url: Some("cover.jpg".into()),
            event_date: None,
            location: None,
            created_at: Utc::now(),
        };
        let state = reduce(
            state,
            DomainEvent::HostLoaded {
                generation: 0,
                host: Some(host),
            },
        );
        assert_eq!(state.couple_name, "From Query");
        assert_eq!(state.cover_image_url.as_deref(), Some("cover.jpg"));
        assert!(!state.is_loading_name);
    }

    #[test]
    fn deleting_a_response_recomputes_stats() {
        let mut state = AppState::default();
        state.dashboard.replace(vec![
            response("a", true, 3),
            response("b", false, 2),
            response("c", true, 1),
        ]);
        assert_eq!(state.dashboard.stats.total_guests, 4);

        let state = reduce(state, DomainEvent::RsvpDeleted("a".into()));
        assert_eq!(state.dashboard.stats.total, 2);
        assert_eq!(state.dashboard.stats.accepted, 1);
        assert_eq!(state.dashboard.stats.declined, 1);
        assert_eq!(state.dashboard.stats.total_guests, 1);
    }

    #[test]
    fn closing_preview_returns_to_dashboard() {
        let state = reduce(AppState::default(), DomainEvent::PreviewChanged(true));
        assert_eq!(state.view, View::Form);
        assert!(state.is_preview);
        let state = reduce(state, DomainEvent::PreviewChanged(false));
        assert_eq!(state.view, View::Dashboard);
        assert!(!state.is_preview);
    }
}
