//! # Constants and type definitions for Astrocarta
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! definitions** used throughout the `astrocarta` library.
//!
//! ## Overview
//!
//! - Astronomical constants shared by the time and geometry modules
//! - Unit conversions (degrees ↔ radians, days ↔ seconds)
//! - Core type aliases used across the crate
//!
//! These definitions are used by all main modules, including the time frame converter,
//! the line generators, and the paran locator.

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Numerical epsilon used for floating-point comparisons
pub const EPS: f64 = 1e-6;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TT)
pub const T2000: f64 = 51544.5;

/// Conversion factor between Julian Date and Modified Julian Date
pub const JDTOMJD: f64 = 2400000.5;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

/// Mean Earth radius in kilometers (IUGG), used for the spherical distance annotations
pub const EARTH_MEAN_RADIUS_KM: f64 = 6_371.0088;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Modified Julian Date (days)
pub type MJD = f64;

/// A geographic vertex as `(longitude, latitude)`, both in degrees.
///
/// Longitudes are east-positive and normalized to `(-180, 180]` at emission;
/// latitudes stay within `[-90, 90]`.
pub type GeoVertex = (Degree, Degree);
