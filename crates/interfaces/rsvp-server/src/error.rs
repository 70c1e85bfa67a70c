//! API error type. JSON handlers return `{"error": "..."}` with a matching
//! status; page handlers render the same message into the page instead.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rsvp_app_core::SetupError;
use rsvp_core::{DraftError, PaletteError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to a visitor.
    pub fn public_message(&self) -> String {
        match self {
            Self::Internal(_) => "An internal error occurred. Please try again later.".into(),
            other => other.to_string(),
        }
    }

    pub fn no_page(slug: &str) -> Self {
        Self::NotFound(format!("no RSVP page for {slug:?}"))
    }
}

impl From<SetupError> for ApiError {
    fn from(value: SetupError) -> Self {
        match value {
            SetupError::InvalidName | SetupError::ReservedName => {
                Self::BadRequest(value.to_string())
            }
            SetupError::SlugTaken => Self::Conflict(value.to_string()),
            SetupError::Store(e) => Self::Internal(e),
        }
    }
}

impl From<DraftError> for ApiError {
    fn from(value: DraftError) -> Self {
        Self::BadRequest(value.to_string())
    }
}

impl From<PaletteError> for ApiError {
    fn from(value: PaletteError) -> Self {
        Self::BadRequest(value.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(err) = &self {
            tracing::error!(error = %err, "internal server error");
        }
        let body = serde_json::json!({ "error": self.public_message() });
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_errors_map_to_statuses() {
        assert_eq!(
            ApiError::from(SetupError::InvalidName).status(),
            StatusCode::BAD_REQUEST
        );
        let conflict = ApiError::from(SetupError::SlugTaken);
        assert_eq!(conflict.status(), StatusCode::CONFLICT);
        assert_eq!(
            conflict.to_string(),
            "This couple name is already taken. Please try a different name."
        );
    }

    #[test]
    fn internal_details_are_not_exposed() {
        let err = ApiError::Internal(anyhow::anyhow!("redb exploded"));
        assert_eq!(
            err.public_message(),
            "An internal error occurred. Please try again later."
        );
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_found_names_the_slug() {
        let err = ApiError::no_page("ghost");
        assert_eq!(err.to_string(), "not found: no RSVP page for \"ghost\"");
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
