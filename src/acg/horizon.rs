//! AC/DC horizon curve generation.
//!
//! For each sampled geographic latitude φ the body sits on the horizon where its
//! local hour angle `H` satisfies the spherical horizon equation
//!
//! ```text
//! cos H = −tan φ · tan δ
//! ```
//!
//! with δ the body's declination. Where `|tan φ · tan δ| > 1` the body never
//! crosses the horizon at that latitude (circumpolar or never-rising): no vertex
//! is emitted and the curve splits into disjoint runs around the gap. The two
//! roots `H = ±acos(...)` are the rising (AC) and setting (DC) branches; their
//! hour angles are exact negatives of each other.
//!
//! The poles are excluded from sampling (`tan φ` is undefined there), runs with a
//! single vertex are dropped, and a ±180° longitude wrap between consecutive
//! samples forces a run split instead of a straight jump across the map.

use smallvec::SmallVec;

use crate::angles::normalize_longitude;
use crate::bodies::Body;
use crate::constants::{Degree, RADEG};
use crate::ephemeris::CelestialBodyPosition;
use crate::time::TimeFrame;

use super::{ACGLine, LineKind, LineMeta, VertexRun};

/// Hour angle at which a body of declination `dec` crosses the horizon at
/// latitude `lat`, or `None` when no crossing exists there.
///
/// Arguments
/// ---------
/// * `lat`: geographic latitude in degrees, strictly between −90 and 90.
/// * `dec`: declination in degrees.
///
/// Return
/// ------
/// * The positive root `H = acos(−tan φ · tan δ)` in degrees, within `[0, 180]`.
///   The rising branch uses `+H`, the setting branch `−H`.
pub fn horizon_hour_angle(lat: Degree, dec: Degree) -> Option<Degree> {
    let x = -((lat * RADEG).tan() * (dec * RADEG).tan());
    if x.abs() > 1.0 {
        return None;
    }
    Some(x.acos() / RADEG)
}

/// Sample one horizon-type curve over the full latitude range.
///
/// Shared by the base AC/DC lines (`hour_angle_offset = 0`) and the
/// horizon-type aspect lines (non-zero offset). The branch sign selects rising
/// (`+1`) or setting (`−1`).
///
/// Arguments
/// ---------
/// * `ra`, `dec`: the body's equatorial coordinates in degrees.
/// * `gmst`: Greenwich Mean Sidereal Time in degrees.
/// * `branch_sign`: `+1.0` for the rising branch, `−1.0` for the setting branch.
/// * `hour_angle_offset`: additional hour-angle offset in degrees, zero for base lines.
/// * `lat_step`: latitude sampling resolution in degrees, must be positive.
///
/// Return
/// ------
/// * The vertex runs, split at circumpolar gaps and longitude wraps; runs with
///   fewer than two vertices are dropped.
pub(crate) fn horizon_offset_curve(
    ra: Degree,
    dec: Degree,
    gmst: Degree,
    branch_sign: f64,
    hour_angle_offset: Degree,
    lat_step: Degree,
) -> SmallVec<[VertexRun; 2]> {
    debug_assert!(lat_step > 0.0, "latitude step must be positive");

    let mut runs: SmallVec<[VertexRun; 2]> = SmallVec::new();
    let mut current: VertexRun = Vec::new();

    // Integer stepping keeps the sample grid exact and pole-free.
    let steps = (180.0 / lat_step).round() as i64;
    for i in 1..steps {
        let lat = -90.0 + i as f64 * lat_step;

        let Some(hour_angle) = horizon_hour_angle(lat, dec) else {
            // Circumpolar gap: close the current run.
            flush_run(&mut runs, &mut current);
            continue;
        };

        let lon =
            normalize_longitude(ra - gmst - branch_sign * hour_angle - hour_angle_offset);

        if let Some(&(prev_lon, _)) = current.last() {
            if (lon - prev_lon).abs() > 180.0 {
                // Antimeridian wrap: start a new run rather than jump across the map.
                flush_run(&mut runs, &mut current);
            }
        }

        current.push((lon, lat));
    }
    flush_run(&mut runs, &mut current);

    runs
}

fn flush_run(runs: &mut SmallVec<[VertexRun; 2]>, current: &mut VertexRun) {
    if current.len() >= 2 {
        runs.push(std::mem::take(current));
    } else {
        current.clear();
    }
}

/// Generate the requested subset of {AC, DC} curves for one body.
///
/// An empty result (every latitude circumpolar) is a valid outcome, not an error.
///
/// Arguments
/// ---------
/// * `body`: the body the curves belong to.
/// * `position`: its resolved equatorial position.
/// * `frame`: the request time frame.
/// * `kinds`: requested line kinds; only [`LineKind::Ac`] and [`LineKind::Dc`]
///   are considered here.
/// * `lat_step`: latitude sampling resolution in degrees.
///
/// Return
/// ------
/// * Up to two [`ACGLine`] entries, AC before DC; entries whose sampling produced
///   no usable run are omitted.
pub fn horizon_lines(
    body: Body,
    position: &CelestialBodyPosition,
    frame: &TimeFrame,
    kinds: &[LineKind],
    lat_step: Degree,
) -> Vec<ACGLine> {
    let mut lines = Vec::with_capacity(2);

    for (kind, branch_sign) in [(LineKind::Ac, 1.0), (LineKind::Dc, -1.0)] {
        if !kinds.contains(&kind) {
            continue;
        }
        let runs = horizon_offset_curve(
            position.ra,
            position.dec,
            frame.gmst,
            branch_sign,
            0.0,
            lat_step,
        );
        if runs.is_empty() {
            continue;
        }
        lines.push(ACGLine {
            body,
            kind,
            aspect: None,
            runs,
            meta: LineMeta {
                method: "horizon",
                ..LineMeta::default()
            },
        });
    }

    lines
}

#[cfg(test)]
mod horizon_test {
    use super::*;
    use approx::assert_relative_eq;

    fn frame_j2000() -> TimeFrame {
        TimeFrame::from_epoch_str("2000-01-01T12:00:00Z", (-100_000.0, 200_000.0)).unwrap()
    }

    fn position(ra: Degree, dec: Degree) -> CelestialBodyPosition {
        CelestialBodyPosition {
            ra,
            dec,
            ecl_lon: 0.0,
            ecl_lat: 0.0,
            distance_au: 1.0,
            lon_speed: 0.5,
        }
    }

    #[test]
    fn test_hour_angle_roots_are_negatives() {
        // The AC and DC branches use ±H; substituting either back into the
        // horizon equation must reproduce cos H.
        for (lat, dec) in [(0.0, 0.0), (45.0, -23.0), (-30.0, 10.0), (66.0, 23.0)] {
            let h = horizon_hour_angle(lat, dec).expect("solvable configuration");
            let target = -((lat * RADEG).tan() * (dec * RADEG).tan());
            assert_relative_eq!((h * RADEG).cos(), target, epsilon = 1e-12);
            assert_relative_eq!((-h * RADEG).cos(), target, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_hour_angle_circumpolar() {
        // |tan 70°| · |tan 40°| > 1: no horizon crossing.
        assert_eq!(horizon_hour_angle(70.0, 40.0), None);
        assert_eq!(horizon_hour_angle(-70.0, 40.0), None);
        assert!(horizon_hour_angle(70.0, 1.0).is_some());
    }

    #[test]
    fn test_equatorial_body_single_run() {
        // δ = 0: the horizon equation is solvable at every sampled latitude and
        // the AC curve degenerates to a meridian 90° east of culmination.
        let frame = frame_j2000();
        let lines = horizon_lines(Body::Sun, &position(0.0, 0.0), &frame, &LineKind::BASE, 1.0);

        assert_eq!(lines.len(), 2);
        let ac = &lines[0];
        assert_eq!(ac.kind, LineKind::Ac);
        assert_eq!(ac.vertex_count(), 179);
        for run in &ac.runs {
            for &(lon, _) in run {
                assert_relative_eq!(
                    lon,
                    normalize_longitude(0.0 - frame.gmst - 90.0),
                    epsilon = 1e-9
                );
            }
        }
    }

    #[test]
    fn test_sun_winter_declination_band() {
        // δ ≈ −23°: crossings exist for |φ| < 67° and vanish beyond.
        let frame = frame_j2000();
        let lines = horizon_lines(
            Body::Sun,
            &position(280.15, -23.0),
            &frame,
            &[LineKind::Ac, LineKind::Dc],
            1.0,
        );
        assert_eq!(lines.len(), 2);

        for line in &lines {
            assert!(!line.runs.is_empty());
            let mut sampled = std::collections::BTreeSet::new();
            for run in &line.runs {
                assert!(run.len() >= 2);
                for &(lon, lat) in run {
                    assert!((-67.0..=67.0).contains(&lat), "lat {lat} outside band");
                    assert!((-180.0..=180.0).contains(&lon));
                    sampled.insert(lat as i64);
                }
            }
            // Every integer latitude strictly inside the band is present.
            for lat in -66..=66 {
                assert!(sampled.contains(&lat), "missing latitude {lat}");
            }
        }
    }

    #[test]
    fn test_circumpolar_gap_splits_runs() {
        // δ = 60°: gap for |φ| > 30°, so the sampled band is [-30°, 30°] only.
        let frame = frame_j2000();
        let lines = horizon_lines(Body::Sun, &position(100.0, 60.0), &frame, &[LineKind::Ac], 1.0);
        assert_eq!(lines.len(), 1);

        let lats: Vec<f64> = lines[0]
            .runs
            .iter()
            .flat_map(|run| run.iter().map(|&(_, lat)| lat))
            .collect();
        assert!(lats.iter().all(|&lat| lat.abs() <= 30.0));
        assert!(lats.iter().any(|&lat| lat == 29.0));
        assert!(lats.iter().any(|&lat| lat == -29.0));
    }

    #[test]
    fn test_runs_monotonic_in_latitude_and_wrap_free() {
        let frame = frame_j2000();
        for dec in [-40.0, -5.0, 30.0] {
            let lines = horizon_lines(
                Body::Mars,
                &position(200.0, dec),
                &frame,
                &[LineKind::Ac, LineKind::Dc],
                1.0,
            );
            for line in &lines {
                for run in &line.runs {
                    for pair in run.windows(2) {
                        assert!(pair[1].1 > pair[0].1, "latitude must increase within a run");
                        assert!(
                            (pair[1].0 - pair[0].0).abs() <= 180.0,
                            "run must not wrap across the antimeridian"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_antimeridian_wrap_splits_runs() {
        // RA chosen so the AC curve sweeps across the ±180° antimeridian: the
        // crossing must open a new run instead of a jump across the map.
        let frame = frame_j2000();
        let lines = horizon_lines(Body::Mars, &position(200.0, -40.0), &frame, &[LineKind::Ac], 1.0);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].runs.len() >= 2, "wrap must split the curve");
        for run in &lines[0].runs {
            for pair in run.windows(2) {
                assert!((pair[1].0 - pair[0].0).abs() <= 180.0);
            }
        }
    }

    #[test]
    fn test_extreme_declination_yields_no_lines() {
        // δ close to the pole: no usable run anywhere on the sampled grid.
        let frame = frame_j2000();
        let lines = horizon_lines(
            Body::Sun,
            &position(10.0, 89.8),
            &frame,
            &[LineKind::Ac, LineKind::Dc],
            1.0,
        );
        assert!(lines.is_empty());
    }

    #[test]
    fn test_lat_step_is_tunable() {
        let frame = frame_j2000();
        let coarse = horizon_lines(Body::Sun, &position(0.0, 0.0), &frame, &[LineKind::Ac], 5.0);
        assert_eq!(coarse[0].vertex_count(), 35);
    }
}
