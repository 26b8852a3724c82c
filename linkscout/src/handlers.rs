//! Route handlers for the LinkScout HTTP surface.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use linkscout_core::compare::CompareRequest;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::server::AppState;

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

/// Audit page, seeded with the catalogue so the browser needs no extra
/// round trip before the user picks a product.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let catalogue_json = serde_json::to_string(state.catalogue.as_ref())
        .unwrap_or_else(|_| "{}".to_string());
    Html(INDEX_TEMPLATE.replace("__CATALOGUE__", &catalogue_json))
}

/// The static catalogue as an ordered category -> products object.
pub async fn products(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.catalogue.as_ref().clone())
}

/// Compare one product's live and micro pages.
pub async fn compare(
    State(state): State<AppState>,
    Json(request): Json<CompareRequest>,
) -> impl IntoResponse {
    match state.comparator.compare(&request).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => {
            warn!("Rejected compare request for '{}': {}", request.name, e);
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            )
                .into_response()
        }
    }
}

/// Compare every product in the catalogue.
pub async fn compare_all(State(state): State<AppState>) -> impl IntoResponse {
    match state.comparator.compare_catalogue(&state.catalogue).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => {
            error!("Catalogue comparison failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal_error(e.to_string())),
            )
                .into_response()
        }
    }
}
