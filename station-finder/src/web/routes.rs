//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::domain::{CategoryId, Coordinate, ObserverLocation};
use crate::ranking::{RankedStation, map_center, rank_stations, rank_stations_supporting};

use super::dto::*;
use super::state::AppState;

/// Upper bound on the `limit` parameter.
const MAX_LIMIT: usize = 50;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stations", get(list_stations))
        .route("/api/stations/nearby", get(nearby_stations))
        .route("/api/location", get(current_location))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// All active stations, nearest first.
async fn list_stations(
    State(state): State<AppState>,
    Query(query): Query<StationsQuery>,
) -> Result<Json<StationsResponse>, AppError> {
    let observer = resolve_observer(&state, &query)?;
    let category = resolve_category(&state, &query)?;

    let ranked = rank(&state, observer.as_ref(), category.as_ref());
    Ok(Json(build_response(&state, observer.as_ref(), &ranked)))
}

/// The nearest few active stations.
async fn nearby_stations(
    State(state): State<AppState>,
    Query(query): Query<StationsQuery>,
) -> Result<Json<StationsResponse>, AppError> {
    let observer = resolve_observer(&state, &query)?;
    let category = resolve_category(&state, &query)?;
    let limit = query
        .limit
        .unwrap_or(state.config.nearby_count)
        .min(MAX_LIMIT);

    let mut ranked = rank(&state, observer.as_ref(), category.as_ref());
    ranked.truncate(limit);
    Ok(Json(build_response(&state, observer.as_ref(), &ranked)))
}

/// Current state of the live location feed.
async fn current_location(State(state): State<AppState>) -> Json<LocationResponse> {
    let response = match &state.location {
        Some(rx) => LocationResponse::from_state(&rx.borrow()),
        None => LocationResponse::disabled(),
    };
    Json(response)
}

fn rank<'a>(
    state: &'a AppState,
    observer: Option<&ObserverLocation>,
    category: Option<&CategoryId>,
) -> Vec<RankedStation<'a>> {
    match category {
        Some(category) => rank_stations_supporting(&state.catalog, observer, category),
        None => rank_stations(&state.catalog, observer),
    }
}

fn build_response(
    state: &AppState,
    observer: Option<&ObserverLocation>,
    ranked: &[RankedStation<'_>],
) -> StationsResponse {
    StationsResponse {
        observer: observer.map(ObserverResult::from_observer),
        center: map_center(observer, &state.config).into(),
        stations: ranked.iter().map(StationResult::from_ranked).collect(),
    }
}

/// Pick the observer for a request.
///
/// Explicit `lat`/`lng` parameters win, then the live feed, then nothing.
/// Request coordinates are range-checked since they come from outside.
fn resolve_observer(
    state: &AppState,
    query: &StationsQuery,
) -> Result<Option<ObserverLocation>, AppError> {
    match (query.lat, query.lng) {
        (Some(lat), Some(lng)) => {
            let coordinate =
                Coordinate::new(lat, lng)
                    .validate()
                    .map_err(|e| AppError::BadRequest {
                        message: e.to_string(),
                    })?;
            Ok(Some(ObserverLocation::new(coordinate, None)))
        }
        (None, None) => Ok(state.live_position()),
        _ => Err(AppError::BadRequest {
            message: "lat and lng must be given together".to_string(),
        }),
    }
}

fn resolve_category(
    state: &AppState,
    query: &StationsQuery,
) -> Result<Option<CategoryId>, AppError> {
    let Some(raw) = query.category.as_deref().filter(|c| !c.is_empty()) else {
        return Ok(None);
    };

    let id = CategoryId::parse(raw).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    if state.catalog.category(&id).is_none() {
        return Err(AppError::BadRequest {
            message: format!("unknown category: {id}"),
        });
    }

    Ok(Some(id))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
        };

        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
