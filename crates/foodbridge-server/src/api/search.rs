use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use foodbridge_core::{Location, SearchDomain};
use foodbridge_locator::SearchRequest;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_search_error, ApiError, AppState, ResponseMeta};

/// Request body shared by both search routes.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SearchBody {
    pub zip_code: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub radius: Option<f64>,
}

#[derive(Debug, Serialize)]
pub(super) struct SearchResponse {
    pub results: Vec<Location>,
    pub meta: ResponseMeta,
}

pub(super) async fn find_food_banks(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<SearchBody>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    run_search(&state, req_id, body, SearchDomain::FoodBanks).await
}

pub(super) async fn find_grocery_stores(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<SearchBody>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    run_search(&state, req_id, body, SearchDomain::GroceryStores).await
}

async fn run_search(
    state: &AppState,
    req_id: RequestId,
    body: Result<Json<SearchBody>, JsonRejection>,
    domain: SearchDomain,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(body) = body.map_err(|rejection| map_rejection(req_id.0.clone(), &rejection))?;

    let request = SearchRequest::from_parts(body.zip_code.as_deref(), body.lat, body.lon, body.radius)
        .map_err(|e| map_search_error(req_id.0.clone(), &e))?;

    let results = state
        .locator
        .search(&request, domain)
        .await
        .map_err(|e| map_search_error(req_id.0.clone(), &e))?;

    Ok(Json(SearchResponse {
        results,
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn map_rejection(request_id: String, rejection: &JsonRejection) -> ApiError {
    tracing::debug!(%request_id, error = %rejection, "rejected request body");
    match rejection {
        JsonRejection::MissingJsonContentType(_) => ApiError::new(
            request_id,
            "unsupported_media_type",
            "expected Content-Type: application/json",
        ),
        other => ApiError::new(request_id, "invalid_request", other.body_text()),
    }
}
