//! Paran location.
//!
//! A paran couples two bodies through two different angularity conditions: the
//! first body sits on its meridian (MC or IC) while the second simultaneously
//! sits on the horizon. The meridian condition fixes the geographic longitude;
//! along that fixed longitude the second body's horizon equation
//! `cos H = −tan φ · tan δ` becomes a closed-form inversion in latitude,
//!
//! ```text
//! φ = atan(−cos H / tan δ)
//! ```
//!
//! with `H` the second body's hour angle at the fixed longitude. No solution
//! exists when the second body is (near-)equatorial, where the inverted latitude
//! runs off toward the poles; that case is reported as "no paran" for the
//! pair, never as an error.

use std::sync::Arc;

use itertools::Itertools;

use crate::angles::normalize_longitude;
use crate::bodies::Body;
use crate::constants::{Degree, EPS, RADEG};
use crate::ephemeris::CelestialBodyPosition;
use crate::time::TimeFrame;

use super::meridian::{ic_longitude, mc_longitude};
use super::{AcgConfig, HorizonCrossing, MeridianCrossing, ParanPoint};

/// Latitude at which a body of declination `dec` sits on the horizon at a
/// location where its local hour angle is `hour_angle`.
///
/// Arguments
/// ---------
/// * `hour_angle`: the body's hour angle at the fixed longitude, degrees.
/// * `dec`: the body's declination, degrees.
/// * `lat_max`: usable latitude band; solutions beyond it count as absent.
///
/// Return
/// ------
/// * The solved latitude in degrees, or `None` when the configuration admits
///   no usable paran latitude.
pub fn horizon_latitude(hour_angle: Degree, dec: Degree, lat_max: Degree) -> Option<Degree> {
    let tan_dec = (dec * RADEG).tan();
    if tan_dec.abs() < EPS {
        // Near-equatorial body: the inversion degenerates toward the poles.
        return None;
    }

    let lat = (-(hour_angle * RADEG).cos() / tan_dec).atan() / RADEG;
    if lat.abs() > lat_max {
        return None;
    }
    Some(lat)
}

/// Locate every paran among the resolved bodies.
///
/// Each ordered pair `(A, B)` with `A ≠ B` contributes up to two points: one for
/// A culminating and one for A anti-culminating, each paired with B's horizon
/// condition at the corresponding fixed longitude. The rising/setting tag comes
/// from the sign of B's hour angle there.
///
/// Arguments
/// ---------
/// * `resolved`: bodies with their positions, in request order.
/// * `frame`: the request time frame.
/// * `config`: supplies the usable latitude band.
///
/// Return
/// ------
/// * All paran points, ordered by meridian body, then horizon body, then
///   meridian condition. Pairs without a solution contribute nothing.
pub fn locate_parans(
    resolved: &[(Body, Arc<CelestialBodyPosition>)],
    frame: &TimeFrame,
    config: &AcgConfig,
) -> Vec<ParanPoint> {
    let mut parans = Vec::new();

    for (meridian_entry, horizon_entry) in resolved
        .iter()
        .cartesian_product(resolved.iter())
        .filter(|(a, b)| a.0 != b.0)
    {
        let (meridian_body, meridian_pos) = meridian_entry;
        let (horizon_body, horizon_pos) = horizon_entry;

        for (crossing, lon) in [
            (
                MeridianCrossing::Culmination,
                mc_longitude(meridian_pos.ra, frame.gmst),
            ),
            (
                MeridianCrossing::AntiCulmination,
                ic_longitude(meridian_pos.ra, frame.gmst),
            ),
        ] {
            let hour_angle = normalize_longitude(frame.gmst + lon - horizon_pos.ra);

            let Some(lat) =
                horizon_latitude(hour_angle, horizon_pos.dec, config.paran_lat_max)
            else {
                continue;
            };

            let horizon = if hour_angle < 0.0 {
                HorizonCrossing::Rising
            } else {
                HorizonCrossing::Setting
            };

            parans.push(ParanPoint {
                meridian_body: *meridian_body,
                horizon_body: *horizon_body,
                coord: (lon, lat),
                meridian: crossing,
                horizon,
            });
        }
    }

    parans
}
