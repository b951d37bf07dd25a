//! # Astrocarta
//!
//! Astrocartography line-generation engine: for a given instant and a set of
//! celestial bodies, derives the geographic curves along which each body is
//! angular (rising, setting, culminating, anti-culminating), the derived aspect
//! curves and paran intersection points, and assembles the result as geometry
//! with descriptive rendering metadata.
//!
//! The astronomical position provider is an external collaborator behind the
//! [`ephemeris::PositionProvider`] trait; everything downstream of it is pure
//! trigonometry on a spherical Earth.

pub mod acg;
pub mod angles;
pub mod astrocarta;
pub mod astrocarta_errors;
pub mod bodies;
pub mod constants;
pub mod earth_orientation;
pub mod ephemeris;
pub mod ref_system;
pub mod time;
