//! Route definitions for the RSVP service.
//!
//! ## Pages
//!
//! - `GET /`, `GET /{slug}`, `GET /{slug}/rsvp`, `GET /dashboard/{slug}` and
//!   the `?setup=`/`?rsvp=`/`?dashboard=` forms - rendered page
//! - `POST /` - create a host page from the setup form
//! - `POST /{slug}/rsvp` - guest form submission
//! - `POST /dashboard/{slug}/rsvps/{id}/delete` - remove a response
//!
//! ## API
//!
//! - `GET /health`
//! - `GET /api/themes?q=`, `GET /api/themes/{id}/palette`, `GET /api/palette?base=`
//! - `GET /api/resolve?location=`
//! - `POST /api/hosts`, `GET /api/hosts/{slug}`
//! - `PUT /api/hosts/{slug}/cover`, `PUT /api/hosts/{slug}/theme`
//! - `GET|POST /api/hosts/{slug}/rsvps`, `GET /api/hosts/{slug}/stats`
//! - `GET /api/hosts/{slug}/export.csv`, `GET /api/hosts/{slug}/share`
//! - `DELETE /api/rsvps/{id}`

mod api;
mod health;
mod pages;

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::state::AppState;

/// Build the complete RSVP service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/", get(pages::page).post(pages::create_host_form))
        .route("/:slug/rsvp", get(pages::page).post(pages::submit_rsvp_form))
        .route(
            "/dashboard/:slug/rsvps/:id/delete",
            post(pages::delete_rsvp_form),
        )
        .route("/api/themes", get(api::list_themes))
        .route("/api/themes/:id/palette", get(api::theme_palette))
        .route("/api/palette", get(api::palette))
        .route("/api/resolve", get(api::resolve))
        .route("/api/hosts", post(api::create_host))
        .route("/api/hosts/:slug", get(api::get_host))
        .route("/api/hosts/:slug/cover", put(api::set_cover))
        .route("/api/hosts/:slug/theme", put(api::set_theme))
        .route(
            "/api/hosts/:slug/rsvps",
            get(api::list_rsvps).post(api::submit_rsvp),
        )
        .route("/api/hosts/:slug/stats", get(api::stats))
        .route("/api/hosts/:slug/export.csv", get(api::export_csv))
        .route("/api/hosts/:slug/share", get(api::share))
        .route("/api/rsvps/:id", delete(api::delete_rsvp))
        .fallback(get(pages::page))
        .with_state(state)
}
