//! airgraph-core - In-memory flight network engine.
//!
//! This crate maintains a relational graph of airlines, airports, and
//! directed routes (the OpenFlights dataset shape) and answers structured
//! queries against it. All state lives in memory for the lifetime of the
//! process; there is no persistence.
//!
//! # Components
//!
//! - **Entity store** ([`store`]): the three collections, ID uniqueness,
//!   referential integrity, cascading delete
//! - **Geo math** ([`geo`]): haversine great-circle distance
//! - **Connection search** ([`search`]): one-hop paths over direct routes
//! - **Reports** ([`report`]): route-count rollups per airline/airport
//! - **Loader** ([`loader`]): OpenFlights `.dat` CSV bulk load
//! - **Façade** ([`facade`]): the locked entry point callers go through
//!
//! # Usage
//!
//! ```
//! use airgraph_core::{Airline, Catalog};
//!
//! let catalog = Catalog::new();
//! catalog.insert_airline(Airline {
//!     id: 24,
//!     name: "American Airlines".into(),
//!     alias: String::new(),
//!     iata: "AA".into(),
//!     icao: "AAL".into(),
//!     callsign: "AMERICAN".into(),
//!     country: "United States".into(),
//!     active: "Y".into(),
//! })?;
//! # Ok::<(), airgraph_core::StoreError>(())
//! ```

pub mod error;
pub mod facade;
pub mod geo;
pub mod loader;
pub mod report;
pub mod search;
pub mod store;
pub mod types;

pub use error::{Result, StoreError};
pub use facade::{Catalog, DistanceReport, StoreStats};
pub use loader::{LoadError, LoadStats};
pub use report::{AirlineRoutesReport, AirportRoutesReport, CityRouteRow};
pub use search::Connection;
pub use store::EntityStore;
pub use types::{Airline, AirlinePatch, Airport, AirportPatch, Route, RouteKey};
