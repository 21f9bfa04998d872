//! The query façade: single entry point for external collaborators.
//!
//! [`Catalog`] wraps the entity store in one read-write lock, giving the
//! whole engine the single-writer / multi-reader discipline the data model
//! needs: reads run concurrently with each other, mutations run exclusively,
//! and every operation (including a cascading delete) is atomic under its
//! lock. All work is in-memory and CPU-bound, so operations complete
//! synchronously.
//!
//! The façade also owns input-shape validation and error normalization;
//! everything below it assumes well-formed arguments.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::report::{self, AirlineRoutesReport, AirportRoutesReport, CityRouteRow};
use crate::search::{self, Connection};
use crate::store::EntityStore;
use crate::types::{Airline, AirlinePatch, Airport, AirportPatch, Route, RouteKey};

/// Direct great-circle distance between two airports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceReport {
    pub src: String,
    pub dst: String,
    pub distance_km: f64,
    pub distance_mi: f64,
}

/// Entity counts, for status reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    pub airlines: usize,
    pub airports: usize,
    pub routes: usize,
}

/// Thread-safe façade over the entity store.
///
/// State is process-lifetime only; there is no persistence and no
/// durability guarantee across restarts.
#[derive(Debug, Default)]
pub struct Catalog {
    store: RwLock<EntityStore>,
}

impl Catalog {
    /// Create a catalog over an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already-populated store (e.g. after a bulk load).
    pub fn from_store(store: EntityStore) -> Self {
        Self {
            store: RwLock::new(store),
        }
    }

    // State is plain data and every operation leaves it consistent, so a
    // poisoned lock (a panicked writer) is safe to recover.
    fn read(&self) -> RwLockReadGuard<'_, EntityStore> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, EntityStore> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }

    // -- Queries -------------------------------------------------------------

    /// Airline by IATA code.
    pub fn airline(&self, iata: &str) -> Result<Airline> {
        self.read().airline_by_iata(iata).cloned()
    }

    /// Airport by IATA code.
    pub fn airport(&self, iata: &str) -> Result<Airport> {
        self.read().airport_by_iata(iata).cloned()
    }

    /// All airlines, sorted by IATA.
    pub fn airlines(&self) -> Vec<Airline> {
        self.read().list_airlines().into_iter().cloned().collect()
    }

    /// All airports, sorted by IATA.
    pub fn airports(&self) -> Vec<Airport> {
        self.read().list_airports().into_iter().cloned().collect()
    }

    /// Great-circle distance between two airports. Identical endpoints are
    /// legal here and yield zero.
    pub fn distance(&self, src_iata: &str, dst_iata: &str) -> Result<DistanceReport> {
        let store = self.read();
        let src = store.airport_by_iata(src_iata)?;
        let dst = store.airport_by_iata(dst_iata)?;
        let km = crate::geo::haversine_km(src.latitude, src.longitude, dst.latitude, dst.longitude);
        Ok(DistanceReport {
            src: src.iata.clone(),
            dst: dst.iata.clone(),
            distance_km: km,
            distance_mi: crate::geo::km_to_miles(km),
        })
    }

    /// One-hop connections between two airports.
    pub fn one_hop(&self, src_iata: &str, dst_iata: &str) -> Result<Vec<Connection>> {
        search::one_hop(&self.read(), src_iata, dst_iata)
    }

    /// Airports served by an airline, ranked by route count.
    pub fn airline_routes(&self, airline_iata: &str) -> Result<AirlineRoutesReport> {
        report::airline_routes(&self.read(), airline_iata)
    }

    /// Airlines serving an airport, ranked by route count.
    pub fn airport_routes(&self, airport_iata: &str) -> Result<AirportRoutesReport> {
        report::airport_routes(&self.read(), airport_iata)
    }

    /// Airlines flying into an airport.
    pub fn airlines_for_airport(&self, airport_iata: &str) -> Result<Vec<Airline>> {
        report::airlines_for_airport(&self.read(), airport_iata)
    }

    /// Top destination cities of an airline.
    pub fn top_cities(&self, airline_iata: &str, limit: usize) -> Result<Vec<CityRouteRow>> {
        report::top_cities(&self.read(), airline_iata, limit)
    }

    /// Entity counts.
    pub fn stats(&self) -> StoreStats {
        let store = self.read();
        StoreStats {
            airlines: store.airline_count(),
            airports: store.airport_count(),
            routes: store.route_count(),
        }
    }

    // -- Mutations -----------------------------------------------------------

    /// Insert an airline.
    pub fn insert_airline(&self, airline: Airline) -> Result<Airline> {
        validate_iata("airline", &airline.iata, 2)?;
        self.write().insert_airline(airline).cloned()
    }

    /// Partially update an airline.
    pub fn modify_airline(&self, id: i64, patch: &AirlinePatch) -> Result<Airline> {
        if let Some(iata) = &patch.iata {
            validate_iata("airline", iata, 2)?;
        }
        self.write().modify_airline(id, patch).cloned()
    }

    /// Remove an airline and cascade to its routes. Returns the number of
    /// routes removed with it.
    pub fn remove_airline(&self, id: i64) -> Result<usize> {
        self.write().remove_airline(id)
    }

    /// Insert an airport.
    pub fn insert_airport(&self, airport: Airport) -> Result<Airport> {
        validate_iata("airport", &airport.iata, 3)?;
        self.write().insert_airport(airport).cloned()
    }

    /// Partially update an airport.
    pub fn modify_airport(&self, id: i64, patch: &AirportPatch) -> Result<Airport> {
        if let Some(iata) = &patch.iata {
            validate_iata("airport", iata, 3)?;
        }
        self.write().modify_airport(id, patch).cloned()
    }

    /// Remove an airport and cascade to routes touching it. Returns the
    /// number of routes removed with it.
    pub fn remove_airport(&self, id: i64) -> Result<usize> {
        self.write().remove_airport(id)
    }

    /// Insert a route.
    pub fn insert_route(&self, route: Route) -> Result<Route> {
        self.write().insert_route(route)
    }

    /// Remove routes by composite key. Returns how many rows matched.
    pub fn remove_route(&self, key: RouteKey) -> Result<usize> {
        self.write().remove_route(key)
    }
}

/// IATA codes may be empty (plenty of dataset rows have none), but a
/// non-empty one must have the right length for its entity kind.
fn validate_iata(entity: &'static str, iata: &str, expected_len: usize) -> Result<()> {
    if !iata.is_empty() && iata.chars().count() != expected_len {
        return Err(StoreError::invalid_request(format!(
            "{} IATA code must be {} characters, got {:?}",
            entity, expected_len, iata
        )));
    }
    Ok(())
}
