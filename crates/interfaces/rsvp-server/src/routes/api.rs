//! JSON API over the host and RSVP records.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use rsvp_app_core::setup::new_host;
use rsvp_app_core::{HostDirectory, RsvpBook, StorePersistence};
use rsvp_core::export::{export_file_name, rsvps_to_csv};
use rsvp_core::share::ShareLink;
use rsvp_core::{
    resolve_initial_view, themes, try_generate_palette, ColorScale, DashboardStats, Host,
    RouteContext, RsvpDraft, RsvpResponse, Theme, View,
};
use rsvp_persistence::RsvpDataStore;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

pub(crate) fn require_host(records: &StorePersistence, slug: &str) -> Result<Host, ApiError> {
    records
        .find_by_slug(slug)?
        .ok_or_else(|| ApiError::no_page(slug))
}

#[derive(Debug, Deserialize)]
pub struct ThemeQuery {
    pub q: Option<String>,
}

pub async fn list_themes(Query(query): Query<ThemeQuery>) -> Json<Vec<&'static Theme>> {
    let hits = match query.q.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => themes::search(q),
        _ => themes::THEMES.iter().collect(),
    };
    Json(hits)
}

#[derive(Debug, Serialize)]
pub struct PaletteResponse {
    pub base: String,
    pub palette: ColorScale,
    pub style_vars: BTreeMap<String, String>,
}

impl PaletteResponse {
    fn new(base: &str, palette: ColorScale) -> Self {
        let style_vars = palette
            .style_vars(rsvp_config::STYLE_VAR_PREFIX)
            .into_iter()
            .collect();
        Self {
            base: base.to_string(),
            palette,
            style_vars,
        }
    }
}

pub async fn theme_palette(Path(id): Path<String>) -> Result<Json<PaletteResponse>, ApiError> {
    let theme = themes::find(&id).ok_or_else(|| ApiError::NotFound(format!("theme {id:?}")))?;
    Ok(Json(PaletteResponse::new(theme.color, theme.palette())))
}

#[derive(Debug, Deserialize)]
pub struct PaletteQuery {
    pub base: String,
}

/// Unlike page rendering, a malformed base is rejected here.
pub async fn palette(Query(query): Query<PaletteQuery>) -> Result<Json<PaletteResponse>, ApiError> {
    let scale = try_generate_palette(&query.base)?;
    Ok(Json(PaletteResponse::new(&query.base, scale)))
}

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub location: String,
}

#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub view: View,
    pub slug: String,
    pub display_name: String,
    pub canonical_location: Option<String>,
}

pub async fn resolve(Query(query): Query<ResolveQuery>) -> Json<ResolveResponse> {
    let resolution = resolve_initial_view(&RouteContext::parse(&query.location));
    Json(ResolveResponse {
        canonical_location: resolution.canonical_location(),
        view: resolution.view,
        slug: resolution.slug,
        display_name: resolution.display_name,
    })
}

#[derive(Debug, Deserialize)]
pub struct CreateHostRequest {
    pub couple_names: String,
    #[serde(default)]
    pub theme_id: Option<String>,
    #[serde(default)]
    pub event_date: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HostResponse {
    pub host: Host,
    pub share: ShareLink,
}

pub async fn create_host(
    State(state): State<AppState>,
    Json(req): Json<CreateHostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let theme_id = req
        .theme_id
        .as_deref()
        .map(|id| themes::resolve(id).id)
        .unwrap_or(rsvp_config::DEFAULT_THEME_ID);
    let mut host = new_host(&req.couple_names, theme_id)?;
    host.event_date = req.event_date;
    host.location = req.location;

    let created = state.blocking(move |records| Ok(records.create(&host)?)).await?;
    tracing::info!(slug = %created.slug, "host page created");
    let share = ShareLink::new(&state.config.base_url, &created.slug);
    Ok((
        StatusCode::CREATED,
        Json(HostResponse {
            host: created,
            share,
        }),
    ))
}

pub async fn get_host(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Host>, ApiError> {
    let host = state.blocking(move |records| require_host(records, &slug)).await?;
    Ok(Json(host))
}

#[derive(Debug, Deserialize)]
pub struct CoverRequest {
    #[serde(default)]
    pub cover_image_url: Option<String>,
}

pub async fn set_cover(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(req): Json<CoverRequest>,
) -> Result<Json<Host>, ApiError> {
    let url = req
        .cover_image_url
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty());
    let host = state
        .blocking(move |records| {
            require_host(records, &slug)?;
            Ok(records.set_cover_image(&slug, url.as_deref())?)
        })
        .await?;
    Ok(Json(host))
}

#[derive(Debug, Deserialize)]
pub struct ThemeRequest {
    pub theme_id: String,
}

pub async fn set_theme(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(req): Json<ThemeRequest>,
) -> Result<Json<Host>, ApiError> {
    let theme = themes::find(&req.theme_id)
        .ok_or_else(|| ApiError::BadRequest(format!("unknown theme {:?}", req.theme_id)))?;
    let host = state
        .blocking(move |records| {
            require_host(records, &slug)?;
            records
                .store()
                .set_host_theme(&slug, theme.id)
                .map_err(|e| ApiError::Internal(e.into()))
        })
        .await?;
    Ok(Json(host))
}

pub async fn list_rsvps(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<RsvpResponse>>, ApiError> {
    let responses = state
        .blocking(move |records| {
            let host = require_host(records, &slug)?;
            Ok(records.list(&host.id)?)
        })
        .await?;
    Ok(Json(responses))
}

pub async fn submit_rsvp(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(draft): Json<RsvpDraft>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = draft.normalized()?;
    let response = state
        .blocking(move |records| {
            let host = require_host(records, &slug)?;
            Ok(records.submit(&host.id, &draft)?)
        })
        .await?;
    tracing::info!(rsvp_id = %response.id, attending = response.attending, "rsvp received");
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn stats(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<DashboardStats>, ApiError> {
    let responses = state
        .blocking(move |records| {
            let host = require_host(records, &slug)?;
            Ok(records.list(&host.id)?)
        })
        .await?;
    Ok(Json(DashboardStats::from_responses(&responses)))
}

pub async fn export_csv(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let file_name = export_file_name(&slug);
    let csv = state
        .blocking(move |records| {
            let host = require_host(records, &slug)?;
            Ok(rsvps_to_csv(&records.list(&host.id)?))
        })
        .await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        csv,
    ))
}

pub async fn share(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ShareLink>, ApiError> {
    let host = state.blocking(move |records| require_host(records, &slug)).await?;
    Ok(Json(ShareLink::new(&state.config.base_url, &host.slug)))
}

pub async fn delete_rsvp(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let lookup = id.clone();
    let removed = state
        .blocking(move |records| Ok(records.delete(&lookup)?))
        .await?;
    if removed {
        tracing::info!(rsvp_id = %id, "rsvp deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("rsvp {id:?}")))
    }
}
