//! Server-rendered pages.
//!
//! Each request replays the same events the interactive app applies at boot
//! (resolve, host lookup, theme, responses) through the shared reducer, then
//! renders the resulting state.

use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use rsvp_app_core::domain::AppState as PageState;
use rsvp_app_core::setup::new_host;
use rsvp_app_core::{reduce, DomainEvent, HostDirectory, RsvpBook};
use rsvp_core::view::{encode_component, setup_location};
use rsvp_core::{resolve_initial_view, themes, Host, RouteContext, RsvpDraft, RsvpResponse, View};
use serde::Deserialize;

use crate::error::ApiError;
use crate::render::{self, Screen};
use crate::state::AppState;

struct Lookup {
    host: Option<Host>,
    responses: Option<Vec<RsvpResponse>>,
}

fn boot(ctx: &RouteContext) -> (PageState, Option<String>) {
    let resolution = resolve_initial_view(ctx);
    let canonical = resolution.canonical_location();
    let location = match &canonical {
        Some(loc) => loc.clone(),
        None if ctx.has_query() => format!("{}?{}", ctx.path, ctx.raw_query),
        None => ctx.path.clone(),
    };
    let mut page = reduce(PageState::default(), DomainEvent::Booted(resolution));
    page = reduce(page, DomainEvent::LocationChanged(location));
    if page.view == View::Form && ctx.param("preview").is_some() {
        page = reduce(page, DomainEvent::PreviewChanged(true));
    }
    (page, canonical)
}

fn apply_lookup(page: PageState, lookup: Lookup) -> PageState {
    let generation = page.host_generation;
    let theme_id = match &lookup.host {
        Some(host) => host.theme_id.clone(),
        None => Some(rsvp_config::MISSING_HOST_THEME_ID.to_string()),
    };
    let mut page = match theme_id {
        Some(id) => reduce(page, DomainEvent::ThemeApplied(themes::resolve(&id).id.to_string())),
        None => page,
    };
    if let (Some(host), Some(responses)) = (&lookup.host, lookup.responses) {
        page = reduce(
            page,
            DomainEvent::RsvpsLoaded {
                host_id: host.id.clone(),
                responses,
            },
        );
    }
    reduce(
        page,
        DomainEvent::HostLoaded {
            generation,
            host: lookup.host,
        },
    )
}

/// Resolve the address and load whatever the resolved view needs.
async fn load_screen(state: &AppState, ctx: &RouteContext) -> Screen {
    let (mut page, canonical) = boot(ctx);
    let mut host_found = None;

    if !page.slug.is_empty() {
        let slug = page.slug.clone();
        let generation = page.host_generation + 1;
        page = reduce(
            page,
            DomainEvent::HostLookupStarted {
                slug: slug.clone(),
                generation,
            },
        );
        let with_responses = page.view == View::Dashboard;
        let loaded = state
            .blocking(move |records| {
                let host = records.find_by_slug(&slug)?;
                let responses = match (&host, with_responses) {
                    (Some(h), true) => Some(records.list(&h.id)?),
                    _ => None,
                };
                Ok(Lookup { host, responses })
            })
            .await;
        page = match loaded {
            Ok(lookup) => {
                host_found = Some(lookup.host.is_some());
                apply_lookup(page, lookup)
            }
            Err(e) => {
                tracing::warn!(error = %e, slug = %page.slug, "host lookup failed, keeping defaults");
                let generation = page.host_generation;
                reduce(
                    page,
                    DomainEvent::HostLookupFailed {
                        generation,
                        message: e.to_string(),
                    },
                )
            }
        };
    }

    Screen {
        state: page,
        canonical,
        host_found,
        notice: None,
    }
}

fn render(status: StatusCode, screen: &Screen, state: &AppState) -> Response {
    let html = render::page(screen, &state.config.base_url).into_string();
    (status, Html(html)).into_response()
}

fn page_status(screen: &Screen) -> StatusCode {
    match (screen.state.view, screen.host_found) {
        (View::Dashboard, Some(false)) => StatusCode::NOT_FOUND,
        _ => StatusCode::OK,
    }
}

/// Render whatever page the address resolves to.
pub async fn page(State(state): State<AppState>, uri: Uri) -> Response {
    let location = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    let ctx = RouteContext::parse(&location);
    let screen = load_screen(&state, &ctx).await;
    render(page_status(&screen), &screen, &state)
}

async fn create_host(state: &AppState, couple_names: &str, theme_id: &str) -> Result<Host, ApiError> {
    let host = new_host(couple_names, theme_id)?;
    state.blocking(move |records| Ok(records.create(&host)?)).await
}

#[derive(Debug, Deserialize)]
pub struct SetupForm {
    pub couple_names: String,
    #[serde(default)]
    pub theme_id: Option<String>,
}

/// Create the host page, then land on the share view.
pub async fn create_host_form(
    State(state): State<AppState>,
    Form(form): Form<SetupForm>,
) -> Response {
    let theme_id = themes::resolve(
        form.theme_id
            .as_deref()
            .unwrap_or(rsvp_config::DEFAULT_THEME_ID),
    )
    .id;
    match create_host(&state, &form.couple_names, theme_id).await {
        Ok(host) => {
            tracing::info!(slug = %host.slug, "host page created");
            Redirect::to(&setup_location(&host.slug, &host.couple_name)).into_response()
        }
        Err(e) => {
            let mut page = reduce(
                PageState::default(),
                DomainEvent::ThemeApplied(theme_id.to_string()),
            );
            page = reduce(page, DomainEvent::SetupRejected(e.public_message()));
            render(e.status(), &Screen::new(page), &state)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RsvpForm {
    pub guest_name: String,
    pub guest_email: String,
    #[serde(default)]
    pub guest_phone: Option<String>,
    #[serde(default)]
    pub attending: Option<String>,
    #[serde(default)]
    pub party_size: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl RsvpForm {
    fn into_draft(self) -> RsvpDraft {
        let party_size = self
            .party_size
            .as_deref()
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or(rsvp_config::MIN_PARTY_SIZE);
        RsvpDraft {
            guest_name: self.guest_name,
            guest_email: self.guest_email,
            guest_phone: self.guest_phone,
            attending: matches!(self.attending.as_deref(), Some("yes" | "true" | "on")),
            party_size,
            message: self.message,
        }
    }
}

/// Record a guest's answer and show the thank-you view.
pub async fn submit_rsvp_form(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Form(form): Form<RsvpForm>,
) -> Response {
    let ctx = RouteContext::parse(&format!("/{}/rsvp", encode_component(&slug)));
    let mut screen = load_screen(&state, &ctx).await;
    let Some(host_id) = screen.state.host_id().map(str::to_string) else {
        return render(StatusCode::NOT_FOUND, &screen, &state);
    };

    let submitted = match form.into_draft().normalized() {
        Ok(draft) => {
            state
                .blocking(move |records| Ok(records.submit(&host_id, &draft)?))
                .await
        }
        Err(e) => Err(ApiError::from(e)),
    };

    match submitted {
        Ok(response) => {
            tracing::info!(rsvp_id = %response.id, attending = response.attending, "rsvp received");
            screen.state = reduce(screen.state, DomainEvent::RsvpSubmitted(response));
            render(StatusCode::OK, &screen, &state)
        }
        Err(e) => {
            screen.notice = Some(e.public_message());
            render(e.status(), &screen, &state)
        }
    }
}

/// Remove a response from the dashboard and reload it.
pub async fn delete_rsvp_form(
    State(state): State<AppState>,
    Path((slug, id)): Path<(String, String)>,
) -> Result<Redirect, ApiError> {
    let lookup = id.clone();
    let removed = state
        .blocking(move |records| Ok(records.delete(&lookup)?))
        .await?;
    if !removed {
        tracing::debug!(rsvp_id = %id, "rsvp already gone");
    }
    Ok(Redirect::to(&format!(
        "/dashboard/{}",
        encode_component(&slug)
    )))
}
