//! Data models for the flight network.
//!
//! These types mirror the OpenFlights dataset shape: airlines and airports
//! carry a caller-assigned numeric ID plus an IATA code used as the query
//! lookup key; routes are identified by the composite
//! (airline, source airport, destination airport) key.

use serde::{Deserialize, Serialize};

/// An airline carrier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airline {
    /// Unique numeric identifier (caller-assigned).
    pub id: i64,
    /// Carrier name.
    pub name: String,
    /// Alternate name, empty when none.
    #[serde(default)]
    pub alias: String,
    /// 2-letter IATA code; may be empty, lookup is case-insensitive.
    #[serde(default)]
    pub iata: String,
    /// 3-letter ICAO code.
    #[serde(default)]
    pub icao: String,
    /// Radio callsign.
    #[serde(default)]
    pub callsign: String,
    /// Country of registration.
    #[serde(default)]
    pub country: String,
    /// `"Y"` when operating, `"N"` when defunct; other values are kept
    /// as-is and not interpreted.
    #[serde(default = "default_active")]
    pub active: String,
}

fn default_active() -> String {
    "Y".to_string()
}

/// An airport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    /// Unique numeric identifier (caller-assigned).
    pub id: i64,
    /// Airport name.
    pub name: String,
    /// 3-letter IATA code; may be empty, lookup is case-insensitive.
    #[serde(default)]
    pub iata: String,
    /// 4-letter ICAO code.
    #[serde(default)]
    pub icao: String,
    /// City served.
    #[serde(default)]
    pub city: String,
    /// Country.
    #[serde(default)]
    pub country: String,
    /// Latitude in signed degrees. Not range-checked; distance math is
    /// garbage-in-garbage-out.
    #[serde(default)]
    pub latitude: f64,
    /// Longitude in signed degrees.
    #[serde(default)]
    pub longitude: f64,
}

/// A directed route leg operated by an airline between two airports.
///
/// Routes have no numeric ID of their own; [`RouteKey`] is their identity.
/// They are immutable once inserted — changing one means remove + insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Operating airline's ID.
    pub airline_id: i64,
    /// Source airport's ID.
    pub src_airport_id: i64,
    /// Destination airport's ID.
    pub dst_airport_id: i64,
    /// Number of intermediate stops; `0` means a direct leg.
    #[serde(default)]
    pub stops: u32,
}

impl Route {
    /// The composite identity of this route.
    pub fn key(&self) -> RouteKey {
        RouteKey {
            airline_id: self.airline_id,
            src_airport_id: self.src_airport_id,
            dst_airport_id: self.dst_airport_id,
        }
    }

    /// Whether this route is a direct (zero-stop) leg.
    pub fn is_direct(&self) -> bool {
        self.stops == 0
    }
}

/// Composite lookup/delete key for routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteKey {
    pub airline_id: i64,
    pub src_airport_id: i64,
    pub dst_airport_id: i64,
}

/// Partial update for an [`Airline`]. A field set to `Some` is applied;
/// `None` leaves the stored value untouched (presence wins, an empty string
/// never sneaks in through omission).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AirlinePatch {
    pub name: Option<String>,
    pub alias: Option<String>,
    pub iata: Option<String>,
    pub icao: Option<String>,
    pub callsign: Option<String>,
    pub country: Option<String>,
    pub active: Option<String>,
}

impl AirlinePatch {
    /// Apply every present field to `airline`.
    pub fn apply(&self, airline: &mut Airline) {
        if let Some(v) = &self.name {
            airline.name = v.clone();
        }
        if let Some(v) = &self.alias {
            airline.alias = v.clone();
        }
        if let Some(v) = &self.iata {
            airline.iata = v.clone();
        }
        if let Some(v) = &self.icao {
            airline.icao = v.clone();
        }
        if let Some(v) = &self.callsign {
            airline.callsign = v.clone();
        }
        if let Some(v) = &self.country {
            airline.country = v.clone();
        }
        if let Some(v) = &self.active {
            airline.active = v.clone();
        }
    }
}

/// Partial update for an [`Airport`]. Same presence-wins contract as
/// [`AirlinePatch`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AirportPatch {
    pub name: Option<String>,
    pub iata: Option<String>,
    pub icao: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl AirportPatch {
    /// Apply every present field to `airport`.
    pub fn apply(&self, airport: &mut Airport) {
        if let Some(v) = &self.name {
            airport.name = v.clone();
        }
        if let Some(v) = &self.iata {
            airport.iata = v.clone();
        }
        if let Some(v) = &self.icao {
            airport.icao = v.clone();
        }
        if let Some(v) = &self.city {
            airport.city = v.clone();
        }
        if let Some(v) = &self.country {
            airport.country = v.clone();
        }
        if let Some(v) = self.latitude {
            airport.latitude = v;
        }
        if let Some(v) = self.longitude {
            airport.longitude = v;
        }
    }
}
