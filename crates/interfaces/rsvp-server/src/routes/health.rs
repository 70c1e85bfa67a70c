//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use rsvp_persistence::{DbState, RsvpDataStore};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    store: String,
}

fn describe(state: Result<DbState, String>) -> (&'static str, String) {
    match state {
        // A fresh install has no database until the first host is created.
        Ok(DbState::Valid) | Ok(DbState::Missing) => ("ok", "ok".into()),
        Ok(DbState::Busy) => ("degraded", "busy".into()),
        Ok(DbState::Corrupt) => ("degraded", "corrupt".into()),
        Ok(DbState::NewerSchema { found, supported }) => (
            "degraded",
            format!("schema {found} is newer than supported {supported}"),
        ),
        Err(e) => ("degraded", e),
    }
}

/// Service health plus the state of the record store.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let records = state.records.clone();
    let db_state = tokio::task::spawn_blocking(move || records.store().validate())
        .await
        .map_err(|e| e.to_string())
        .and_then(|r| r.map_err(|e| e.to_string()));
    let (status, store) = describe(db_state);
    Json(HealthResponse {
        status,
        service: "rsvp-server",
        version: env!("CARGO_PKG_VERSION"),
        store,
    })
}
