//! Aspect line generation.
//!
//! Aspect lines mark where a body stands at a fixed angular offset α from an
//! angle (MC or AC) instead of exactly on it. Meridian-type aspects shift the
//! target before the standard meridian formula applies, either in ecliptic
//! longitude (reconverted to right ascension through the obliquity rotation) or
//! directly in right ascension, per [`AspectConvention`]. Horizon-type aspects
//! offset the solved hour angle before conversion to longitude.
//!
//! The generator always emits the exact-aspect curve; the orb tolerance in the
//! request only annotates metadata for downstream near-crossing filters and never
//! rejects a line at generation time.

use smallvec::smallvec;

use crate::angles::{normalize_degrees, normalize_longitude};
use crate::bodies::Body;
use crate::constants::Degree;
use crate::ephemeris::CelestialBodyPosition;
use crate::ref_system::equatorial_from_ecliptic;
use crate::time::TimeFrame;

use super::horizon::horizon_offset_curve;
use super::{ACGLine, AspectConvention, LineKind, LineMeta};

/// Effective right ascension for a meridian-type aspect of signed offset `offset`.
///
/// With [`AspectConvention::EclipticLongitude`] the offset is applied to the body's
/// ecliptic longitude on the ecliptic itself (latitude zero, where aspects are
/// measured) and the shifted point is reconverted to equatorial coordinates.
/// With [`AspectConvention::RightAscension`] the offset applies to the right
/// ascension directly.
fn aspect_right_ascension(
    position: &CelestialBodyPosition,
    frame: &TimeFrame,
    offset: Degree,
    convention: AspectConvention,
) -> Degree {
    match convention {
        AspectConvention::EclipticLongitude => {
            let shifted = normalize_degrees(position.ecl_lon - offset);
            equatorial_from_ecliptic(shifted, 0.0, frame.obliquity).0
        }
        AspectConvention::RightAscension => normalize_degrees(position.ra - offset),
    }
}

/// Signed offsets generated for one aspect angle.
///
/// Aspects are symmetric around exactness, so every angle yields a line on each
/// side except the conjunction (0°) and the opposition (180°), which coincide
/// with their mirror.
fn signed_offsets(aspect: Degree) -> Vec<Degree> {
    let folded = normalize_degrees(aspect);
    if folded == 0.0 || folded == 180.0 {
        vec![folded]
    } else {
        vec![folded, -folded]
    }
}

/// Generate every aspect line for one body.
///
/// One line set is produced per `(body, aspect, target-angle-type)` triple: a
/// meridian-type line (kind [`LineKind::McAspect`], a full two-vertex meridian)
/// and a horizon-type curve (kind [`LineKind::AcAspect`], sampled like an AC
/// line with the hour angle offset by α).
///
/// Arguments
/// ---------
/// * `body`: the body the lines belong to.
/// * `position`: its resolved position.
/// * `frame`: the request time frame.
/// * `aspects`: the requested aspect angles in degrees.
/// * `convention`: offset convention for the meridian-type lines.
/// * `lat_step`: latitude sampling resolution for the horizon-type lines.
///
/// Return
/// ------
/// * The aspect lines ordered by declared aspect, then offset sign, meridian
///   before horizon; horizon-type entries with no usable run are omitted.
pub fn aspect_lines(
    body: Body,
    position: &CelestialBodyPosition,
    frame: &TimeFrame,
    aspects: &[Degree],
    convention: AspectConvention,
    lat_step: Degree,
) -> Vec<ACGLine> {
    let mut lines = Vec::new();

    for &aspect in aspects {
        for offset in signed_offsets(aspect) {
            let ra_eff = aspect_right_ascension(position, frame, offset, convention);
            let lon = normalize_longitude(ra_eff - frame.gmst);
            lines.push(ACGLine {
                body,
                kind: LineKind::McAspect,
                aspect: Some(offset),
                runs: smallvec![vec![(lon, -90.0), (lon, 90.0)]],
                meta: LineMeta {
                    method: "aspect_meridian",
                    ..LineMeta::default()
                },
            });

            let runs = horizon_offset_curve(
                position.ra,
                position.dec,
                frame.gmst,
                1.0,
                offset,
                lat_step,
            );
            if runs.is_empty() {
                continue;
            }
            lines.push(ACGLine {
                body,
                kind: LineKind::AcAspect,
                aspect: Some(offset),
                runs,
                meta: LineMeta {
                    method: "aspect_horizon",
                    ..LineMeta::default()
                },
            });
        }
    }

    lines
}

#[cfg(test)]
mod aspect_test {
    use super::*;
    use crate::acg::meridian::mc_longitude;
    use approx::assert_relative_eq;

    fn frame_j2000() -> TimeFrame {
        TimeFrame::from_epoch_str("2000-01-01T12:00:00Z", (-100_000.0, 200_000.0)).unwrap()
    }

    fn ecliptic_body(ecl_lon: Degree, frame: &TimeFrame) -> CelestialBodyPosition {
        let (ra, dec) = equatorial_from_ecliptic(ecl_lon, 0.0, frame.obliquity);
        CelestialBodyPosition {
            ra,
            dec,
            ecl_lon,
            ecl_lat: 0.0,
            distance_au: 1.0,
            lon_speed: 1.0,
        }
    }

    #[test]
    fn test_signed_offsets() {
        assert_eq!(signed_offsets(0.0), vec![0.0]);
        assert_eq!(signed_offsets(180.0), vec![180.0]);
        assert_eq!(signed_offsets(60.0), vec![60.0, -60.0]);
        assert_eq!(signed_offsets(90.0), vec![90.0, -90.0]);
    }

    #[test]
    fn test_zero_aspect_coincides_with_mc() {
        // A 0° aspect to the MC for a body on the ecliptic is the MC line itself.
        let frame = frame_j2000();
        let body = ecliptic_body(123.4, &frame);
        let lines = aspect_lines(
            Body::Venus,
            &body,
            &frame,
            &[0.0],
            AspectConvention::EclipticLongitude,
            1.0,
        );

        let mc_aspect = lines
            .iter()
            .find(|l| l.kind == LineKind::McAspect)
            .expect("meridian-type aspect line");
        assert_relative_eq!(
            mc_aspect.runs[0][0].0,
            mc_longitude(body.ra, frame.gmst),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_sextile_produces_both_sides() {
        let frame = frame_j2000();
        let body = ecliptic_body(200.0, &frame);
        let lines = aspect_lines(
            Body::Jupiter,
            &body,
            &frame,
            &[60.0],
            AspectConvention::EclipticLongitude,
            1.0,
        );

        let offsets: Vec<Degree> = lines
            .iter()
            .filter(|l| l.kind == LineKind::McAspect)
            .map(|l| l.aspect.unwrap())
            .collect();
        assert_eq!(offsets, vec![60.0, -60.0]);

        // Both horizon-type curves exist for a near-ecliptic body.
        assert_eq!(
            lines.iter().filter(|l| l.kind == LineKind::AcAspect).count(),
            2
        );
    }

    #[test]
    fn test_ra_convention_shifts_meridian_exactly() {
        let frame = frame_j2000();
        let body = ecliptic_body(10.0, &frame);
        let lines = aspect_lines(
            Body::Mars,
            &body,
            &frame,
            &[90.0],
            AspectConvention::RightAscension,
            1.0,
        );

        let plus = lines
            .iter()
            .find(|l| l.kind == LineKind::McAspect && l.aspect == Some(90.0))
            .unwrap();
        let expected = normalize_longitude(body.ra - 90.0 - frame.gmst);
        assert_relative_eq!(plus.runs[0][0].0, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_horizon_aspect_offsets_hour_angle() {
        // For an equatorial body H = 90° everywhere, so an offset of 30° moves
        // the whole curve 30° west of the plain AC line.
        let frame = frame_j2000();
        let body = CelestialBodyPosition {
            ra: 50.0,
            dec: 0.0,
            ecl_lon: 50.0,
            ecl_lat: 0.0,
            distance_au: 1.0,
            lon_speed: 1.0,
        };
        let lines = aspect_lines(
            Body::Mercury,
            &body,
            &frame,
            &[30.0],
            AspectConvention::RightAscension,
            1.0,
        );

        let curve = lines
            .iter()
            .find(|l| l.kind == LineKind::AcAspect && l.aspect == Some(30.0))
            .unwrap();
        let expected = normalize_longitude(50.0 - frame.gmst - 90.0 - 30.0);
        for run in &curve.runs {
            for &(lon, _) in run {
                assert_relative_eq!(lon, expected, epsilon = 1e-9);
            }
        }
    }
}
