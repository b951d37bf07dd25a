//! MC/IC meridian line generation.
//!
//! A body culminates wherever its local hour angle is zero, which pins the
//! geographic longitude independently of latitude: the MC line is the full
//! meridian at `normalize(RA − GMST)` and the IC line sits exactly 180° away.

use smallvec::smallvec;

use crate::angles::normalize_longitude;
use crate::bodies::Body;
use crate::constants::Degree;
use crate::ephemeris::CelestialBodyPosition;
use crate::time::TimeFrame;

use super::{ACGLine, LineKind, LineMeta};

/// Geographic longitude of the culmination (MC) meridian.
pub fn mc_longitude(ra: Degree, gmst: Degree) -> Degree {
    normalize_longitude(ra - gmst)
}

/// Geographic longitude of the anti-culmination (IC) meridian.
pub fn ic_longitude(ra: Degree, gmst: Degree) -> Degree {
    normalize_longitude(ra - gmst + 180.0)
}

/// Generate the requested subset of {MC, IC} lines for one body.
///
/// Each emitted line is a single two-vertex run spanning the full latitude
/// range; callers render it as a complete meridian. There are no failure modes
/// beyond upstream position resolution.
///
/// Arguments
/// ---------
/// * `body`: the body the lines belong to.
/// * `position`: its resolved equatorial position.
/// * `frame`: the request time frame (GMST in degrees).
/// * `kinds`: requested line kinds; only [`LineKind::Mc`] and [`LineKind::Ic`]
///   are considered here.
///
/// Return
/// ------
/// * Zero, one, or two [`ACGLine`] entries, MC before IC.
pub fn meridian_lines(
    body: Body,
    position: &CelestialBodyPosition,
    frame: &TimeFrame,
    kinds: &[LineKind],
) -> Vec<ACGLine> {
    let mut lines = Vec::with_capacity(2);

    for (kind, longitude) in [
        (LineKind::Mc, mc_longitude(position.ra, frame.gmst)),
        (LineKind::Ic, ic_longitude(position.ra, frame.gmst)),
    ] {
        if !kinds.contains(&kind) {
            continue;
        }
        lines.push(ACGLine {
            body,
            kind,
            aspect: None,
            runs: smallvec![vec![(longitude, -90.0), (longitude, 90.0)]],
            meta: LineMeta {
                method: "meridian",
                ..LineMeta::default()
            },
        });
    }

    lines
}
