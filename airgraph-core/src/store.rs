//! The entity store: single source of truth for airlines, airports, routes.
//!
//! Owns the three collections for the lifetime of the process, enforcing
//! ID uniqueness and referential integrity. Everything above this module
//! (search, reports, the façade) is a read-only view over it.
//!
//! The store itself is not synchronized; [`crate::facade::Catalog`] wraps
//! it in a read-write lock so mutations run exclusively and reads can run
//! concurrently with each other.

use std::collections::HashMap;

use crate::error::{Result, StoreError};
use crate::types::{Airline, AirlinePatch, Airport, AirportPatch, Route, RouteKey};

/// In-memory store for the flight network.
///
/// Insertion order is tracked per collection so that IATA lookups on
/// duplicate codes and listing tie-breaks are deterministic.
#[derive(Debug, Default)]
pub struct EntityStore {
    airlines: HashMap<i64, Airline>,
    airline_order: Vec<i64>,
    airports: HashMap<i64, Airport>,
    airport_order: Vec<i64>,
    routes: Vec<Route>,
}

impl EntityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // -- Inserts -------------------------------------------------------------

    /// Add an airline. Fails with `DuplicateKey` when the ID is taken.
    pub fn insert_airline(&mut self, airline: Airline) -> Result<&Airline> {
        if self.airlines.contains_key(&airline.id) {
            return Err(StoreError::DuplicateKey {
                entity: "airline",
                id: airline.id,
            });
        }
        let id = airline.id;
        self.airline_order.push(id);
        let inserted = self.airlines.entry(id).or_insert(airline);
        Ok(&*inserted)
    }

    /// Add an airport. Fails with `DuplicateKey` when the ID is taken.
    pub fn insert_airport(&mut self, airport: Airport) -> Result<&Airport> {
        if self.airports.contains_key(&airport.id) {
            return Err(StoreError::DuplicateKey {
                entity: "airport",
                id: airport.id,
            });
        }
        let id = airport.id;
        self.airport_order.push(id);
        let inserted = self.airports.entry(id).or_insert(airport);
        Ok(&*inserted)
    }

    /// Add a route. All three references must resolve at insert time;
    /// the first dangling one is reported as `InvalidReference`.
    ///
    /// Duplicate composite keys are representable — the dataset contains
    /// them (codeshares) and the composite key is not enforced unique.
    pub fn insert_route(&mut self, route: Route) -> Result<Route> {
        if !self.airlines.contains_key(&route.airline_id) {
            return Err(StoreError::InvalidReference {
                entity: "airline",
                id: route.airline_id,
            });
        }
        if !self.airports.contains_key(&route.src_airport_id) {
            return Err(StoreError::InvalidReference {
                entity: "source airport",
                id: route.src_airport_id,
            });
        }
        if !self.airports.contains_key(&route.dst_airport_id) {
            return Err(StoreError::InvalidReference {
                entity: "destination airport",
                id: route.dst_airport_id,
            });
        }
        self.routes.push(route);
        Ok(route)
    }

    // -- Partial updates -----------------------------------------------------

    /// Apply the present fields of `patch` to the airline with this ID and
    /// return the updated entity.
    pub fn modify_airline(&mut self, id: i64, patch: &AirlinePatch) -> Result<&Airline> {
        let airline = self
            .airlines
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("airline", id))?;
        patch.apply(airline);
        Ok(&*airline)
    }

    /// Apply the present fields of `patch` to the airport with this ID and
    /// return the updated entity.
    pub fn modify_airport(&mut self, id: i64, patch: &AirportPatch) -> Result<&Airport> {
        let airport = self
            .airports
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("airport", id))?;
        patch.apply(airport);
        Ok(&*airport)
    }

    // -- Removals ------------------------------------------------------------

    /// Remove an airline and every route it operates, as one atomic step.
    /// Returns the number of cascaded routes.
    pub fn remove_airline(&mut self, id: i64) -> Result<usize> {
        if self.airlines.remove(&id).is_none() {
            return Err(StoreError::not_found("airline", id));
        }
        self.airline_order.retain(|&aid| aid != id);
        let before = self.routes.len();
        self.routes.retain(|r| r.airline_id != id);
        Ok(before - self.routes.len())
    }

    /// Remove an airport and every route touching it as source or
    /// destination, as one atomic step. Returns the number of cascaded
    /// routes.
    pub fn remove_airport(&mut self, id: i64) -> Result<usize> {
        if self.airports.remove(&id).is_none() {
            return Err(StoreError::not_found("airport", id));
        }
        self.airport_order.retain(|&aid| aid != id);
        let before = self.routes.len();
        self.routes
            .retain(|r| r.src_airport_id != id && r.dst_airport_id != id);
        Ok(before - self.routes.len())
    }

    /// Remove every route matching the exact composite key. Fails with
    /// `NotFound` when nothing matches; otherwise returns how many rows
    /// went away.
    pub fn remove_route(&mut self, key: RouteKey) -> Result<usize> {
        let before = self.routes.len();
        self.routes.retain(|r| r.key() != key);
        let removed = before - self.routes.len();
        if removed == 0 {
            return Err(StoreError::not_found(
                "route",
                format!(
                    "({}, {}, {})",
                    key.airline_id, key.src_airport_id, key.dst_airport_id
                ),
            ));
        }
        Ok(removed)
    }

    // -- Lookups -------------------------------------------------------------

    /// Airline by numeric ID.
    pub fn airline_by_id(&self, id: i64) -> Option<&Airline> {
        self.airlines.get(&id)
    }

    /// Airport by numeric ID.
    pub fn airport_by_id(&self, id: i64) -> Option<&Airport> {
        self.airports.get(&id)
    }

    /// Airline by IATA code, case-insensitive exact match.
    ///
    /// IATA codes are not enforced unique; when several airlines share one,
    /// the earliest inserted wins.
    pub fn airline_by_iata(&self, code: &str) -> Result<&Airline> {
        self.airline_order
            .iter()
            .filter_map(|id| self.airlines.get(id))
            .find(|a| !a.iata.is_empty() && a.iata.eq_ignore_ascii_case(code))
            .ok_or_else(|| StoreError::not_found("airline", code))
    }

    /// Airport by IATA code, case-insensitive exact match, earliest
    /// inserted wins on duplicates.
    pub fn airport_by_iata(&self, code: &str) -> Result<&Airport> {
        self.airport_order
            .iter()
            .filter_map(|id| self.airports.get(id))
            .find(|a| !a.iata.is_empty() && a.iata.eq_ignore_ascii_case(code))
            .ok_or_else(|| StoreError::not_found("airport", code))
    }

    // -- Listings ------------------------------------------------------------

    /// All airlines ordered by IATA ascending (case-insensitive), ties
    /// broken by insertion order.
    pub fn list_airlines(&self) -> Vec<&Airline> {
        let mut list: Vec<&Airline> = self
            .airline_order
            .iter()
            .filter_map(|id| self.airlines.get(id))
            .collect();
        // Stable sort over the insertion-ordered list keeps ties stable.
        list.sort_by(|a, b| {
            a.iata
                .to_ascii_lowercase()
                .cmp(&b.iata.to_ascii_lowercase())
        });
        list
    }

    /// All airports ordered by IATA ascending (case-insensitive), ties
    /// broken by insertion order.
    pub fn list_airports(&self) -> Vec<&Airport> {
        let mut list: Vec<&Airport> = self
            .airport_order
            .iter()
            .filter_map(|id| self.airports.get(id))
            .collect();
        list.sort_by(|a, b| {
            a.iata
                .to_ascii_lowercase()
                .cmp(&b.iata.to_ascii_lowercase())
        });
        list
    }

    /// All routes, in insertion order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Number of airlines.
    pub fn airline_count(&self) -> usize {
        self.airlines.len()
    }

    /// Number of airports.
    pub fn airport_count(&self) -> usize {
        self.airports.len()
    }

    /// Number of routes.
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn airline(id: i64, iata: &str) -> Airline {
        Airline {
            id,
            name: format!("Airline {}", iata),
            alias: String::new(),
            iata: iata.to_string(),
            icao: String::new(),
            callsign: String::new(),
            country: "United States".to_string(),
            active: "Y".to_string(),
        }
    }

    fn airport(id: i64, iata: &str, lat: f64, lon: f64) -> Airport {
        Airport {
            id,
            name: format!("Airport {}", iata),
            iata: iata.to_string(),
            icao: String::new(),
            city: String::new(),
            country: String::new(),
            latitude: lat,
            longitude: lon,
        }
    }

    fn route(airline_id: i64, src: i64, dst: i64, stops: u32) -> Route {
        Route {
            airline_id,
            src_airport_id: src,
            dst_airport_id: dst,
            stops,
        }
    }

    fn seeded() -> EntityStore {
        let mut store = EntityStore::new();
        store.insert_airline(airline(24, "AA")).unwrap();
        store.insert_airport(airport(1, "SFO", 37.6190, -122.3749)).unwrap();
        store.insert_airport(airport(2, "LAX", 33.9425, -118.4080)).unwrap();
        store.insert_airport(airport(3, "JFK", 40.6398, -73.7789)).unwrap();
        store.insert_route(route(24, 1, 2, 0)).unwrap();
        store.insert_route(route(24, 2, 3, 0)).unwrap();
        store
    }

    #[test]
    fn test_insert_round_trip() {
        let mut store = EntityStore::new();
        let a = airline(24, "AA");
        store.insert_airline(a.clone()).unwrap();
        assert_eq!(store.airline_by_id(24), Some(&a));
        assert_eq!(store.airline_by_iata("AA").unwrap(), &a);
    }

    #[test]
    fn test_insert_duplicate_id() {
        let mut store = EntityStore::new();
        store.insert_airline(airline(24, "AA")).unwrap();
        let err = store.insert_airline(airline(24, "BB")).unwrap_err();
        assert_eq!(
            err,
            StoreError::DuplicateKey {
                entity: "airline",
                id: 24
            }
        );
    }

    #[test]
    fn test_iata_lookup_case_insensitive() {
        let store = seeded();
        assert_eq!(store.airport_by_iata("sfo").unwrap().id, 1);
        assert_eq!(store.airport_by_iata("Sfo").unwrap().id, 1);
        assert!(matches!(
            store.airport_by_iata("ZZZ"),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_iata_duplicate_first_inserted_wins() {
        let mut store = EntityStore::new();
        store.insert_airport(airport(10, "DUP", 0.0, 0.0)).unwrap();
        store.insert_airport(airport(11, "DUP", 1.0, 1.0)).unwrap();
        assert_eq!(store.airport_by_iata("dup").unwrap().id, 10);
    }

    #[test]
    fn test_empty_iata_never_matches() {
        let mut store = EntityStore::new();
        store.insert_airline(airline(1, "")).unwrap();
        assert!(store.airline_by_iata("").is_err());
    }

    #[test]
    fn test_route_insert_validates_references() {
        let mut store = seeded();
        let err = store.insert_route(route(99, 1, 2, 0)).unwrap_err();
        assert_eq!(
            err,
            StoreError::InvalidReference {
                entity: "airline",
                id: 99
            }
        );
        let err = store.insert_route(route(24, 99, 2, 0)).unwrap_err();
        assert_eq!(
            err,
            StoreError::InvalidReference {
                entity: "source airport",
                id: 99
            }
        );
        let err = store.insert_route(route(24, 1, 99, 0)).unwrap_err();
        assert_eq!(
            err,
            StoreError::InvalidReference {
                entity: "destination airport",
                id: 99
            }
        );
    }

    #[test]
    fn test_modify_partial_fields_only() {
        let mut store = seeded();
        let before = store.airline_by_id(24).unwrap().clone();
        let patch = AirlinePatch {
            country: Some("Canada".to_string()),
            ..Default::default()
        };
        let after = store.modify_airline(24, &patch).unwrap().clone();
        assert_eq!(after.country, "Canada");
        assert_eq!(after.name, before.name);
        assert_eq!(after.iata, before.iata);
        assert_eq!(after.active, before.active);
    }

    #[test]
    fn test_modify_missing_id() {
        let mut store = EntityStore::new();
        let err = store.modify_airport(5, &AirportPatch::default()).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_remove_airline_cascades() {
        let mut store = seeded();
        let cascaded = store.remove_airline(24).unwrap();
        assert_eq!(cascaded, 2);
        assert!(store.airline_by_id(24).is_none());
        assert!(store.routes().iter().all(|r| r.airline_id != 24));
        assert_eq!(store.route_count(), 0);
    }

    #[test]
    fn test_remove_airport_cascades_both_directions() {
        let mut store = seeded();
        // LAX (id 2) is destination of one route and source of another.
        let cascaded = store.remove_airport(2).unwrap();
        assert_eq!(cascaded, 2);
        assert!(store
            .routes()
            .iter()
            .all(|r| r.src_airport_id != 2 && r.dst_airport_id != 2));
    }

    #[test]
    fn test_remove_route_by_composite_key() {
        let mut store = seeded();
        let removed = store
            .remove_route(RouteKey {
                airline_id: 24,
                src_airport_id: 1,
                dst_airport_id: 2,
            })
            .unwrap();
        assert_eq!(removed, 1);
        assert_eq!(store.route_count(), 1);

        let err = store
            .remove_route(RouteKey {
                airline_id: 24,
                src_airport_id: 1,
                dst_airport_id: 2,
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_remove_route_partial_key_mismatch() {
        let mut store = seeded();
        // Same endpoints, wrong airline: must not match.
        store.insert_airline(airline(25, "BB")).unwrap();
        let err = store
            .remove_route(RouteKey {
                airline_id: 25,
                src_airport_id: 1,
                dst_airport_id: 2,
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        assert_eq!(store.route_count(), 2);
    }

    #[test]
    fn test_list_sorted_by_iata_stable() {
        let mut store = EntityStore::new();
        store.insert_airport(airport(3, "ord", 0.0, 0.0)).unwrap();
        store.insert_airport(airport(1, "JFK", 0.0, 0.0)).unwrap();
        store.insert_airport(airport(2, "Jfk", 0.0, 0.0)).unwrap();

        let codes: Vec<i64> = store.list_airports().iter().map(|a| a.id).collect();
        // Case-insensitive ascending; the two JFKs keep insertion order.
        assert_eq!(codes, vec![1, 2, 3]);

        // Stable under repeated calls with no mutation in between.
        let again: Vec<i64> = store.list_airports().iter().map(|a| a.id).collect();
        assert_eq!(codes, again);
    }

    #[test]
    fn test_duplicate_composite_key_routes_allowed() {
        let mut store = seeded();
        store.insert_route(route(24, 1, 2, 0)).unwrap();
        assert_eq!(store.route_count(), 3);
        // remove-by-key takes out both matching rows.
        let removed = store
            .remove_route(RouteKey {
                airline_id: 24,
                src_airport_id: 1,
                dst_airport_id: 2,
            })
            .unwrap();
        assert_eq!(removed, 2);
    }
}
