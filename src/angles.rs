//! Angle normalization and spherical-distance helpers shared by every line generator.
//!
//! All geographic longitudes emitted by the crate go through
//! [`normalize_longitude`] exactly once, at emission time; intermediate
//! angular arithmetic works in unnormalized degrees.

use crate::constants::{Degree, GeoVertex, Kilometer, EARTH_MEAN_RADIUS_KM, RADEG};

/// Normalize an angle in degrees to the interval `[0, 360)`.
///
/// Arguments
/// ---------
/// * `angle`: any finite angle in degrees.
///
/// Return
/// ------
/// * The equivalent angle in `[0, 360)`.
pub fn normalize_degrees(angle: Degree) -> Degree {
    let wrapped = angle % 360.0;
    if wrapped < 0.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Normalize a geographic longitude in degrees to the interval `(-180, 180]`.
///
/// Idempotent: `normalize_longitude(normalize_longitude(x)) == normalize_longitude(x)`.
///
/// Arguments
/// ---------
/// * `lon`: any finite longitude in degrees (east positive).
///
/// Return
/// ------
/// * The equivalent longitude in `(-180, 180]`.
pub fn normalize_longitude(lon: Degree) -> Degree {
    let wrapped = normalize_degrees(lon);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Great-circle distance between two geographic points on a spherical Earth.
///
/// Uses the haversine formulation, stable for small separations. Sub-meter geodesic
/// precision is out of scope; the spherical model matches the horizon trigonometry
/// used by the line generators.
///
/// Arguments
/// ---------
/// * `a`: first point as `(longitude, latitude)` in degrees.
/// * `b`: second point as `(longitude, latitude)` in degrees.
///
/// Return
/// ------
/// * Distance in kilometers along the great circle.
pub fn great_circle_km(a: GeoVertex, b: GeoVertex) -> Kilometer {
    let (lon1, lat1) = (a.0 * RADEG, a.1 * RADEG);
    let (lon2, lat2) = (b.0 * RADEG, b.1 * RADEG);

    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);

    2.0 * EARTH_MEAN_RADIUS_KM * h.sqrt().min(1.0).asin()
}
