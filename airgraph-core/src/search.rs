//! One-hop connection search over the route graph.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::geo;
use crate::store::EntityStore;

/// A single source → hub → destination connection.
///
/// The distance fields are computed per request from current coordinates;
/// nothing here is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// IATA code of the intermediate airport.
    pub hub_iata: String,
    /// Name of the intermediate airport.
    pub hub_name: String,
    /// City of the intermediate airport.
    pub hub_city: String,
    /// Great-circle length of the source → hub leg, km.
    pub leg1_km: f64,
    /// Great-circle length of the hub → destination leg, km.
    pub leg2_km: f64,
    /// Sum of both legs, km.
    pub total_km: f64,
    /// Sum of both legs, statute miles.
    pub total_mi: f64,
}

/// Find all one-hop connections between two airports.
///
/// Both legs must be direct: only zero-stop routes qualify. The hub is a
/// genuine intermediate — it is never the source or the destination, even
/// when degenerate route data (self-loops) would otherwise produce that.
///
/// Results are sorted ascending by total distance, ties broken by hub IATA,
/// so the order is reproducible. An empty result is a valid outcome, not an
/// error.
pub fn one_hop(store: &EntityStore, src_iata: &str, dst_iata: &str) -> Result<Vec<Connection>> {
    if src_iata.eq_ignore_ascii_case(dst_iata) {
        return Err(StoreError::invalid_request(
            "source and destination airports are the same",
        ));
    }

    let src = store.airport_by_iata(src_iata)?;
    let dst = store.airport_by_iata(dst_iata)?;

    // Airports reachable from src by a direct leg.
    let mut from_src: HashSet<i64> = HashSet::new();
    // Airports with a direct leg into dst.
    let mut to_dst: HashSet<i64> = HashSet::new();
    for route in store.routes() {
        if !route.is_direct() {
            continue;
        }
        if route.src_airport_id == src.id {
            from_src.insert(route.dst_airport_id);
        }
        if route.dst_airport_id == dst.id {
            to_dst.insert(route.src_airport_id);
        }
    }

    let mut connections: Vec<Connection> = from_src
        .intersection(&to_dst)
        .filter(|&&id| id != src.id && id != dst.id)
        .filter_map(|id| store.airport_by_id(*id))
        .map(|hub| {
            let leg1_km = geo::haversine_km(src.latitude, src.longitude, hub.latitude, hub.longitude);
            let leg2_km = geo::haversine_km(hub.latitude, hub.longitude, dst.latitude, dst.longitude);
            let total_km = leg1_km + leg2_km;
            Connection {
                hub_iata: hub.iata.clone(),
                hub_name: hub.name.clone(),
                hub_city: hub.city.clone(),
                leg1_km,
                leg2_km,
                total_km,
                total_mi: geo::km_to_miles(total_km),
            }
        })
        .collect();

    connections.sort_by(|a, b| {
        a.total_km
            .total_cmp(&b.total_km)
            .then_with(|| a.hub_iata.cmp(&b.hub_iata))
    });

    Ok(connections)
}
