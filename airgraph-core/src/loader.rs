//! Bulk load of OpenFlights `.dat` CSV files into the entity store.
//!
//! The dataset is comma-separated with optional double-quoted fields and
//! `\N` as the null marker. Rows that are malformed, carry a null ID, or
//! (for routes) reference entities absent from the store are skipped and
//! counted rather than failing the whole load.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::store::EntityStore;
use crate::types::{Airline, Airport, Route};

/// Errors that can occur while loading a dataset file.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path of the dataset file.
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of loading one dataset file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Rows inserted into the store.
    pub loaded: usize,
    /// Rows skipped: malformed, null IDs, duplicates, dangling references.
    pub skipped: usize,
}

/// Split one CSV line into fields. Double quotes toggle quoting; commas
/// split only outside quotes; quote characters themselves are dropped.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

/// Whether a raw field is the dataset's null marker or empty.
pub fn is_null_field(field: &str) -> bool {
    field == "\\N" || field.is_empty()
}

fn parse_id(field: &str) -> Option<i64> {
    if is_null_field(field) {
        return None;
    }
    field.parse().ok()
}

fn parse_coord(field: &str) -> f64 {
    if is_null_field(field) {
        return 0.0;
    }
    field.parse().unwrap_or(0.0)
}

fn null_to_empty(field: &str) -> String {
    if is_null_field(field) {
        String::new()
    } else {
        field.to_string()
    }
}

fn open(path: &Path) -> Result<BufReader<File>, LoadError> {
    File::open(path).map(BufReader::new).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Load an OpenFlights airlines file.
///
/// Columns: id, name, alias, iata, icao, callsign, country, active.
pub fn load_airlines(store: &mut EntityStore, path: &Path) -> Result<LoadStats, LoadError> {
    let mut stats = LoadStats::default();
    for line in open(path)?.lines() {
        let line = line.map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let fields = parse_csv_line(&line);
        if fields.len() < 8 {
            stats.skipped += 1;
            continue;
        }
        let Some(id) = parse_id(&fields[0]) else {
            stats.skipped += 1;
            continue;
        };
        let airline = Airline {
            id,
            name: fields[1].clone(),
            alias: null_to_empty(&fields[2]),
            iata: null_to_empty(&fields[3]),
            icao: null_to_empty(&fields[4]),
            callsign: null_to_empty(&fields[5]),
            country: null_to_empty(&fields[6]),
            active: fields[7].clone(),
        };
        match store.insert_airline(airline) {
            Ok(_) => stats.loaded += 1,
            Err(_) => stats.skipped += 1,
        }
    }
    Ok(stats)
}

/// Load an OpenFlights airports file.
///
/// Columns: id, name, city, country, iata, icao, latitude, longitude.
pub fn load_airports(store: &mut EntityStore, path: &Path) -> Result<LoadStats, LoadError> {
    let mut stats = LoadStats::default();
    for line in open(path)?.lines() {
        let line = line.map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let fields = parse_csv_line(&line);
        if fields.len() < 8 {
            stats.skipped += 1;
            continue;
        }
        let Some(id) = parse_id(&fields[0]) else {
            stats.skipped += 1;
            continue;
        };
        let airport = Airport {
            id,
            name: fields[1].clone(),
            city: null_to_empty(&fields[2]),
            country: null_to_empty(&fields[3]),
            iata: null_to_empty(&fields[4]),
            icao: null_to_empty(&fields[5]),
            latitude: parse_coord(&fields[6]),
            longitude: parse_coord(&fields[7]),
        };
        match store.insert_airport(airport) {
            Ok(_) => stats.loaded += 1,
            Err(_) => stats.skipped += 1,
        }
    }
    Ok(stats)
}

/// Load an OpenFlights routes file.
///
/// Columns: airline code, airline id, source code, source id, destination
/// code, destination id, codeshare, stops. Only the numeric columns are
/// used; rows whose references are not in the store are skipped so the
/// store's integrity rules hold for bulk load too.
pub fn load_routes(store: &mut EntityStore, path: &Path) -> Result<LoadStats, LoadError> {
    let mut stats = LoadStats::default();
    for line in open(path)?.lines() {
        let line = line.map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        if line.is_empty() {
            continue;
        }
        let fields = parse_csv_line(&line);
        if fields.len() < 8 {
            stats.skipped += 1;
            continue;
        }
        let (Some(airline_id), Some(src_airport_id), Some(dst_airport_id)) =
            (parse_id(&fields[1]), parse_id(&fields[3]), parse_id(&fields[5]))
        else {
            stats.skipped += 1;
            continue;
        };
        let stops = if is_null_field(&fields[7]) {
            0
        } else {
            fields[7].parse().unwrap_or(0)
        };
        let route = Route {
            airline_id,
            src_airport_id,
            dst_airport_id,
            stops,
        };
        match store.insert_route(route) {
            Ok(_) => stats.loaded += 1,
            Err(_) => stats.skipped += 1,
        }
    }
    Ok(stats)
}
