//! Route-count aggregation reports.
//!
//! Every report is computed on demand from current store contents; there is
//! no materialized view to refresh or invalidate. Unlike the one-hop search,
//! reports count routes of any stop count.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::EntityStore;
use crate::types::{Airline, Airport};

/// One airport served by an airline, with its route count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportRouteRow {
    pub iata: String,
    pub name: String,
    pub city: String,
    pub country: String,
    /// Routes of the airline touching this airport. Source and destination
    /// are counted independently, so a degenerate self-loop counts twice.
    pub routes: usize,
}

/// One airline serving an airport, with its route count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirlineRouteRow {
    pub iata: String,
    pub name: String,
    pub country: String,
    /// Routes of this airline touching the airport, as source or destination.
    pub routes: usize,
}

/// A destination city ranked by route count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRouteRow {
    pub city: String,
    pub routes: usize,
}

/// Airports served by one airline, ranked by route count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirlineRoutesReport {
    pub airline: Airline,
    pub airports: Vec<AirportRouteRow>,
}

/// Airlines serving one airport, ranked by route count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportRoutesReport {
    pub airport: Airport,
    pub airlines: Vec<AirlineRouteRow>,
}

/// Airports served by the airline with this IATA code, sorted descending by
/// route count, ties broken by airport IATA ascending.
pub fn airline_routes(store: &EntityStore, airline_iata: &str) -> Result<AirlineRoutesReport> {
    let airline = store.airline_by_iata(airline_iata)?.clone();

    let mut counts: HashMap<i64, usize> = HashMap::new();
    for route in store.routes() {
        if route.airline_id == airline.id {
            *counts.entry(route.src_airport_id).or_insert(0) += 1;
            *counts.entry(route.dst_airport_id).or_insert(0) += 1;
        }
    }

    let mut airports: Vec<AirportRouteRow> = counts
        .into_iter()
        .filter_map(|(id, routes)| {
            store.airport_by_id(id).map(|ap| AirportRouteRow {
                iata: ap.iata.clone(),
                name: ap.name.clone(),
                city: ap.city.clone(),
                country: ap.country.clone(),
                routes,
            })
        })
        .collect();
    airports.sort_by(|a, b| b.routes.cmp(&a.routes).then_with(|| a.iata.cmp(&b.iata)));

    Ok(AirlineRoutesReport { airline, airports })
}

/// Airlines serving the airport with this IATA code, sorted descending by
/// route count, ties broken by airline IATA ascending.
pub fn airport_routes(store: &EntityStore, airport_iata: &str) -> Result<AirportRoutesReport> {
    let airport = store.airport_by_iata(airport_iata)?.clone();

    let mut counts: HashMap<i64, usize> = HashMap::new();
    for route in store.routes() {
        if route.src_airport_id == airport.id || route.dst_airport_id == airport.id {
            *counts.entry(route.airline_id).or_insert(0) += 1;
        }
    }

    let mut airlines: Vec<AirlineRouteRow> = counts
        .into_iter()
        .filter_map(|(id, routes)| {
            store.airline_by_id(id).map(|al| AirlineRouteRow {
                iata: al.iata.clone(),
                name: al.name.clone(),
                country: al.country.clone(),
                routes,
            })
        })
        .collect();
    airlines.sort_by(|a, b| b.routes.cmp(&a.routes).then_with(|| a.iata.cmp(&b.iata)));

    Ok(AirportRoutesReport { airport, airlines })
}

/// Distinct airlines flying *into* the airport with this IATA code
/// (destination side only), sorted by airline IATA ascending.
pub fn airlines_for_airport(store: &EntityStore, airport_iata: &str) -> Result<Vec<Airline>> {
    let airport = store.airport_by_iata(airport_iata)?;

    let mut seen: HashMap<i64, ()> = HashMap::new();
    for route in store.routes() {
        if route.dst_airport_id == airport.id {
            seen.insert(route.airline_id, ());
        }
    }

    let mut airlines: Vec<Airline> = seen
        .keys()
        .filter_map(|id| store.airline_by_id(*id))
        .cloned()
        .collect();
    airlines.sort_by(|a, b| a.iata.cmp(&b.iata));
    Ok(airlines)
}

/// Destination cities of an airline ranked by route count, descending,
/// ties broken by city name ascending, truncated to `limit` rows.
pub fn top_cities(store: &EntityStore, airline_iata: &str, limit: usize) -> Result<Vec<CityRouteRow>> {
    let airline = store.airline_by_iata(airline_iata)?;

    let mut counts: HashMap<String, usize> = HashMap::new();
    for route in store.routes() {
        if route.airline_id == airline.id {
            if let Some(dst) = store.airport_by_id(route.dst_airport_id) {
                *counts.entry(dst.city.clone()).or_insert(0) += 1;
            }
        }
    }

    let mut rows: Vec<CityRouteRow> = counts
        .into_iter()
        .map(|(city, routes)| CityRouteRow { city, routes })
        .collect();
    rows.sort_by(|a, b| b.routes.cmp(&a.routes).then_with(|| a.city.cmp(&b.city)));
    rows.truncate(limit);
    Ok(rows)
}
