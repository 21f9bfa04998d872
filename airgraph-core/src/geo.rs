//! Great-circle distance math.

/// Mean Earth radius in kilometers (IUGG mean radius).
///
/// Every distance in the system derives from this one constant; report and
/// connection ordering depend on it being used consistently.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Kilometers to statute miles.
pub const MILES_PER_KM: f64 = 0.621371;

/// Great-circle distance between two coordinate pairs, in kilometers,
/// using the haversine formula.
///
/// Inputs are signed degrees. Identical points yield exactly 0; no other
/// validation is performed.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Convert kilometers to statute miles.
pub fn km_to_miles(km: f64) -> f64 {
    km * MILES_PER_KM
}
