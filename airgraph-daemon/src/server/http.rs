//! HTTP routes and handlers for the airgraph daemon API.
//!
//! This layer is a thin client of the core: it translates identifiers,
//! deserializes patch bodies (so omitted fields never overwrite), maps the
//! core's error taxonomy onto status codes, and renders computed fields.
//! No graph logic lives here.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use airgraph_core::{
    Airline, AirlinePatch, Airport, AirportPatch, Route, RouteKey, StoreError,
};

use super::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState, allowed_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health and status
        .route("/health", get(health))
        .route("/status", get(status))
        // Entity lookup
        .route("/airline/:iata", get(get_airline))
        .route("/airport/:iata", get(get_airport))
        // Sorted listings
        .route("/airlines", get(list_airlines))
        .route("/airports", get(list_airports))
        // Distance and connection search
        .route("/distance/:src/:dst", get(distance))
        .route("/onehop/:src/:dst", get(one_hop))
        // Aggregation reports
        .route("/reports/airline-routes/:iata", get(airline_routes))
        .route("/reports/airport-routes/:iata", get(airport_routes))
        .route("/reports/airlines-for-airport/:iata", get(airlines_for_airport))
        .route("/reports/top-cities/:iata", get(top_cities))
        // Mutations
        .route("/airline", post(create_airline))
        .route("/airline/:iata", put(update_airline).delete(remove_airline))
        .route("/airport", post(create_airport))
        .route("/airport/:iata", put(update_airport).delete(remove_airport))
        .route("/route", post(create_route).delete(remove_route))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

// =============================================================================
// Response envelope
// =============================================================================

#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
    duration_ms: u64,
}

impl<T: Serialize> ApiResponse<T> {
    fn ok(data: T, duration_ms: u64) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            error: None,
            duration_ms,
        })
    }

    fn err(error: impl ToString, duration_ms: u64) -> Json<Self> {
        Json(Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
            duration_ms,
        })
    }
}

/// Map the core error taxonomy onto HTTP status codes.
fn error_status(err: &StoreError) -> StatusCode {
    match err {
        StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
        StoreError::DuplicateKey { .. } => StatusCode::CONFLICT,
        StoreError::InvalidReference { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        StoreError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
    }
}

fn respond<T: Serialize>(result: Result<T, StoreError>, start: Instant) -> Response {
    let duration_ms = start.elapsed().as_millis() as u64;
    match result {
        Ok(data) => ApiResponse::ok(data, duration_ms).into_response(),
        Err(e) => (error_status(&e), ApiResponse::<T>::err(e, duration_ms)).into_response(),
    }
}

// =============================================================================
// Health & Status
// =============================================================================

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "airgraph-daemon"
    }))
}

#[derive(Serialize)]
struct StatusResponse {
    status: String,
    airlines: usize,
    airports: usize,
    routes: usize,
    uptime_seconds: f64,
}

async fn status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let start = Instant::now();
    let stats = state.catalog.stats();
    let data = StatusResponse {
        status: "running".to_string(),
        airlines: stats.airlines,
        airports: stats.airports,
        routes: stats.routes,
        uptime_seconds: state.uptime_seconds(),
    };
    ApiResponse::ok(data, start.elapsed().as_millis() as u64)
}

// =============================================================================
// Lookup & listings
// =============================================================================

async fn get_airline(State(state): State<Arc<AppState>>, Path(iata): Path<String>) -> Response {
    let start = Instant::now();
    respond(state.catalog.airline(&iata), start)
}

async fn get_airport(State(state): State<Arc<AppState>>, Path(iata): Path<String>) -> Response {
    let start = Instant::now();
    respond(state.catalog.airport(&iata), start)
}

#[derive(Serialize)]
struct AirlineListResponse {
    count: usize,
    airlines: Vec<Airline>,
}

async fn list_airlines(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let start = Instant::now();
    let airlines = state.catalog.airlines();
    let data = AirlineListResponse {
        count: airlines.len(),
        airlines,
    };
    ApiResponse::ok(data, start.elapsed().as_millis() as u64)
}

#[derive(Serialize)]
struct AirportListResponse {
    count: usize,
    airports: Vec<Airport>,
}

async fn list_airports(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let start = Instant::now();
    let airports = state.catalog.airports();
    let data = AirportListResponse {
        count: airports.len(),
        airports,
    };
    ApiResponse::ok(data, start.elapsed().as_millis() as u64)
}

// =============================================================================
// Distance & connection search
// =============================================================================

async fn distance(
    State(state): State<Arc<AppState>>,
    Path((src, dst)): Path<(String, String)>,
) -> Response {
    let start = Instant::now();
    respond(state.catalog.distance(&src, &dst), start)
}

#[derive(Serialize)]
struct OneHopResponse {
    src: String,
    dst: String,
    count: usize,
    connections: Vec<airgraph_core::Connection>,
}

async fn one_hop(
    State(state): State<Arc<AppState>>,
    Path((src, dst)): Path<(String, String)>,
) -> Response {
    let start = Instant::now();
    let result = state.catalog.one_hop(&src, &dst).map(|connections| OneHopResponse {
        src,
        dst,
        count: connections.len(),
        connections,
    });
    respond(result, start)
}

// =============================================================================
// Reports
// =============================================================================

async fn airline_routes(
    State(state): State<Arc<AppState>>,
    Path(iata): Path<String>,
) -> Response {
    let start = Instant::now();
    let result = state.catalog.airline_routes(&iata).map(|report| {
        serde_json::json!({
            "airline": report.airline,
            "airports": report.airports,
            "count": report.airports.len(),
        })
    });
    respond(result, start)
}

async fn airport_routes(
    State(state): State<Arc<AppState>>,
    Path(iata): Path<String>,
) -> Response {
    let start = Instant::now();
    let result = state.catalog.airport_routes(&iata).map(|report| {
        serde_json::json!({
            "airport": report.airport,
            "airlines": report.airlines,
            "count": report.airlines.len(),
        })
    });
    respond(result, start)
}

async fn airlines_for_airport(
    State(state): State<Arc<AppState>>,
    Path(iata): Path<String>,
) -> Response {
    let start = Instant::now();
    let result = state.catalog.airlines_for_airport(&iata).map(|airlines| {
        serde_json::json!({
            "airport": iata,
            "count": airlines.len(),
            "airlines": airlines,
        })
    });
    respond(result, start)
}

#[derive(Deserialize)]
struct TopCitiesParams {
    /// Number of cities to return.
    limit: Option<usize>,
}

async fn top_cities(
    State(state): State<Arc<AppState>>,
    Path(iata): Path<String>,
    Query(params): Query<TopCitiesParams>,
) -> Response {
    let start = Instant::now();
    let limit = params.limit.unwrap_or(3);
    let result = state.catalog.top_cities(&iata, limit).map(|cities| {
        serde_json::json!({
            "airline": iata,
            "top_cities": cities,
        })
    });
    respond(result, start)
}

// =============================================================================
// Mutations
// =============================================================================

async fn create_airline(
    State(state): State<Arc<AppState>>,
    Json(airline): Json<Airline>,
) -> Response {
    let start = Instant::now();
    respond(state.catalog.insert_airline(airline), start)
}

async fn update_airline(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(patch): Json<AirlinePatch>,
) -> Response {
    let start = Instant::now();
    respond(state.catalog.modify_airline(id, &patch), start)
}

#[derive(Serialize)]
struct RemovedResponse {
    /// Routes deleted by the cascade.
    removed_routes: usize,
}

async fn remove_airline(State(state): State<Arc<AppState>>, Path(id): Path<i64>) -> Response {
    let start = Instant::now();
    let result = state
        .catalog
        .remove_airline(id)
        .map(|removed_routes| RemovedResponse { removed_routes });
    respond(result, start)
}

async fn create_airport(
    State(state): State<Arc<AppState>>,
    Json(airport): Json<Airport>,
) -> Response {
    let start = Instant::now();
    respond(state.catalog.insert_airport(airport), start)
}

async fn update_airport(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(patch): Json<AirportPatch>,
) -> Response {
    let start = Instant::now();
    respond(state.catalog.modify_airport(id, &patch), start)
}

async fn remove_airport(State(state): State<Arc<AppState>>, Path(id): Path<i64>) -> Response {
    let start = Instant::now();
    let result = state
        .catalog
        .remove_airport(id)
        .map(|removed_routes| RemovedResponse { removed_routes });
    respond(result, start)
}

async fn create_route(State(state): State<Arc<AppState>>, Json(route): Json<Route>) -> Response {
    let start = Instant::now();
    respond(state.catalog.insert_route(route), start)
}

#[derive(Serialize)]
struct RouteRemovedResponse {
    /// Rows matching the composite key that were deleted.
    removed: usize,
}

async fn remove_route(State(state): State<Arc<AppState>>, Json(key): Json<RouteKey>) -> Response {
    let start = Instant::now();
    let result = state
        .catalog
        .remove_route(key)
        .map(|removed| RouteRemovedResponse { removed });
    respond(result, start)
}
