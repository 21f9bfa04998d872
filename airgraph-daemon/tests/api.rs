//! End-to-end tests of the HTTP API against an in-memory catalog.
//!
//! The router is exercised directly with `tower::ServiceExt::oneshot`;
//! no socket is bound.

use axum::body::Body;
use axum::http::{header, HeaderValue, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use airgraph_core::{Airline, Airport, Catalog, Route};
use airgraph_daemon::server::{create_router, AppState};

fn airline(id: i64, iata: &str, name: &str) -> Airline {
    Airline {
        id,
        name: name.to_string(),
        alias: String::new(),
        iata: iata.to_string(),
        icao: String::new(),
        callsign: String::new(),
        country: "United States".to_string(),
        active: "Y".to_string(),
    }
}

fn airport(id: i64, iata: &str, city: &str, lat: f64, lon: f64) -> Airport {
    Airport {
        id,
        name: format!("{} International", city),
        iata: iata.to_string(),
        icao: String::new(),
        city: city.to_string(),
        country: "United States".to_string(),
        latitude: lat,
        longitude: lon,
    }
}

fn route(airline_id: i64, src: i64, dst: i64) -> Route {
    Route {
        airline_id,
        src_airport_id: src,
        dst_airport_id: dst,
        stops: 0,
    }
}

/// SFO -> LAX -> JFK network operated by AA.
fn test_app() -> Router {
    let catalog = Catalog::new();
    catalog.insert_airline(airline(24, "AA", "American Airlines")).unwrap();
    catalog.insert_airport(airport(1, "SFO", "San Francisco", 37.6190, -122.3749)).unwrap();
    catalog.insert_airport(airport(2, "LAX", "Los Angeles", 33.9425, -118.4080)).unwrap();
    catalog.insert_airport(airport(3, "JFK", "New York", 40.6398, -73.7789)).unwrap();
    catalog.insert_route(route(24, 1, 2)).unwrap();
    catalog.insert_route(route(24, 2, 3)).unwrap();

    create_router(
        AppState::new(catalog),
        HeaderValue::from_static("http://localhost:3000"),
    )
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_status_counts() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["airlines"], 1);
    assert_eq!(body["data"]["airports"], 3);
    assert_eq!(body["data"]["routes"], 2);
}

#[tokio::test]
async fn test_airline_lookup_case_insensitive() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/airline/aa", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 24);
    assert_eq!(body["data"]["name"], "American Airlines");
}

#[tokio::test]
async fn test_airport_not_found_maps_to_404() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/airport/ZZZ", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("ZZZ"));
}

#[tokio::test]
async fn test_airports_listing_sorted() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/airports", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 3);
    let codes: Vec<&str> = body["data"]["airports"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["iata"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["JFK", "LAX", "SFO"]);
}

#[tokio::test]
async fn test_distance_sfo_jfk() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/distance/SFO/JFK", None).await;
    assert_eq!(status, StatusCode::OK);
    let km = body["data"]["distance_km"].as_f64().unwrap();
    assert!((km - 4151.0).abs() < 10.0, "got {} km", km);
}

#[tokio::test]
async fn test_one_hop_via_lax() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/onehop/SFO/JFK", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 1);
    let conn = &body["data"]["connections"][0];
    assert_eq!(conn["hub_iata"], "LAX");
    assert!(conn["total_km"].as_f64().unwrap() > 0.0);
    assert!(conn["total_mi"].as_f64().unwrap() < conn["total_km"].as_f64().unwrap());
}

#[tokio::test]
async fn test_one_hop_same_endpoints_maps_to_400() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/onehop/SFO/sfo", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_airline_routes_report() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/reports/airline-routes/AA", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["airline"]["iata"], "AA");
    let rows = body["data"]["airports"].as_array().unwrap();
    // LAX touches both routes, SFO and JFK one each.
    assert_eq!(rows[0]["iata"], "LAX");
    assert_eq!(rows[0]["routes"], 2);
}

#[tokio::test]
async fn test_airport_routes_report() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/reports/airport-routes/LAX", None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["data"]["airlines"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["iata"], "AA");
    assert_eq!(rows[0]["routes"], 2);
}

#[tokio::test]
async fn test_top_cities_with_limit() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/reports/top-cities/AA?limit=1", None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["data"]["top_cities"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn test_create_then_get_airline() {
    let app = test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/airline",
        Some(json!({"id": 25, "name": "United Airlines", "iata": "UA"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 25);

    let (status, body) = send(&app, "GET", "/airline/UA", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "United Airlines");
    // Omitted active flag defaulted, not empty.
    assert_eq!(body["data"]["active"], "Y");
}

#[tokio::test]
async fn test_duplicate_airline_maps_to_409() {
    let app = test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/airline",
        Some(json!({"id": 24, "name": "Clone", "iata": "CL"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_partial_update_preserves_other_fields() {
    let app = test_app();
    let (status, body) = send(
        &app,
        "PUT",
        "/airline/24",
        Some(json!({"country": "Canada"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["country"], "Canada");
    assert_eq!(body["data"]["name"], "American Airlines");
    assert_eq!(body["data"]["iata"], "AA");
}

#[tokio::test]
async fn test_route_invalid_reference_maps_to_422() {
    let app = test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/route",
        Some(json!({"airline_id": 24, "src_airport_id": 1, "dst_airport_id": 999})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("999"));
}

#[tokio::test]
async fn test_remove_airport_cascades_and_breaks_one_hop() {
    let app = test_app();
    let (status, body) = send(&app, "DELETE", "/airport/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["removed_routes"], 2);

    let (status, body) = send(&app, "GET", "/onehop/SFO/JFK", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 0);
}

#[tokio::test]
async fn test_remove_route_by_composite_key() {
    let app = test_app();
    let (status, body) = send(
        &app,
        "DELETE",
        "/route",
        Some(json!({"airline_id": 24, "src_airport_id": 1, "dst_airport_id": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["removed"], 1);

    let (status, _) = send(
        &app,
        "DELETE",
        "/route",
        Some(json!({"airline_id": 24, "src_airport_id": 1, "dst_airport_id": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
