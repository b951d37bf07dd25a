//! # Time frame conversion
//!
//! Converts a request epoch (UTC instant) into the three time-derived quantities every
//! line computation reads: the Julian Day, the Greenwich Mean Sidereal Time (GMST) and
//! the mean obliquity of the ecliptic. All three are bundled into a [`TimeFrame`],
//! computed once per request and shared immutably by the generators.

use std::str::FromStr;

use hifitime::Epoch;

use crate::astrocarta_errors::AstrocartaError;
use crate::constants::{Degree, Radian, DPI, JDTOMJD, MJD, RADEG, T2000};
use crate::earth_orientation::obleq;

/// Compute the Greenwich Mean Sidereal Time (GMST) in radians
/// for a given Modified Julian Date (UT1 time scale).
///
/// This function implements the IAU 1982/2000 polynomial formula
/// for the mean sidereal time at 0h UT1, plus the fractional-day
/// correction term due to Earth's rotation rate.
///
/// # Arguments
/// * `tjm` - Modified Julian Date (MJD, UT1 time scale)
///
/// # Returns
/// * GMST angle in radians, normalized to the interval [0, 2π).
///
/// # Details
/// The GMST is computed in two steps:
/// 1. Use a cubic polynomial (coefficients C0–C3) to get GMST at 0h UT1
///    in seconds for the given date.
/// 2. Add the contribution of Earth's rotation during the fractional day
///    using the factor `RAP`, which converts solar days to sidereal days.
///
/// # References
/// * IAU 1982, IERS Conventions 1996/2000.
/// * Explanatory Supplement to the Astronomical Almanac (1992).
pub fn gmst(tjm: MJD) -> Radian {
    // Polynomial coefficients for GMST at 0h UT1 (in seconds)
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    // Ratio of sidereal day to solar day
    const RAP: f64 = 1.00273790934;

    // Extract the integer MJD (0h UT1) and compute centuries since J2000.0
    let itjm = tjm.floor();
    let t = (itjm - T2000) / 36525.0;

    // Step 1: GMST at 0h UT1 using the polynomial expression
    let mut gmst0 = ((C3 * t + C2) * t + C1) * t + C0;

    // Convert GMST from seconds to radians (86400 seconds per day)
    gmst0 *= DPI / 86400.0;

    // Step 2: fraction of the current day, scaled by the sidereal rate
    let h = tjm.fract() * DPI;
    let mut gmst = gmst0 + h * RAP;

    // Normalize GMST to the [0, 2π) range
    let mut i: i64 = (gmst / DPI).floor() as i64;
    if gmst < 0.0 {
        i -= 1;
    }
    gmst -= i as f64 * DPI;

    gmst
}

/// Time-derived inputs of one astrocartography request.
///
/// Computed once per request by [`TimeFrame::from_epoch_str`]; all generators read it
/// without mutation, so identical epochs always yield identical frames.
///
/// The UT1−UTC offset (below 0.9 s by definition) is neglected for the sidereal-time
/// argument, an error under 0.004° of Earth rotation and well inside astrocartographic
/// tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeFrame {
    /// The parsed instant, UTC scale.
    pub epoch: Epoch,
    /// Julian Day (UTC).
    pub jd: f64,
    /// Modified Julian Date (UTC).
    pub mjd: MJD,
    /// Greenwich Mean Sidereal Time, degrees in `[0, 360)`.
    pub gmst: Degree,
    /// Mean obliquity of the ecliptic, degrees.
    pub obliquity: Degree,
}

impl TimeFrame {
    /// Build the time frame for a request epoch.
    ///
    /// Arguments
    /// ---------
    /// * `epoch`: the instant as an ISO-8601 string, interpreted as UTC
    ///   (a trailing `Z` designator is accepted).
    /// * `ephem_range`: inclusive `(min, max)` MJD range supported by the position
    ///   provider; instants outside it are rejected.
    ///
    /// Return
    /// ------
    /// * The [`TimeFrame`] for that instant, or [`AstrocartaError::InvalidEpoch`] /
    ///   [`AstrocartaError::EpochOutOfRange`].
    pub fn from_epoch_str(epoch: &str, ephem_range: (MJD, MJD)) -> Result<Self, AstrocartaError> {
        let trimmed = epoch.trim().trim_end_matches('Z');
        let parsed = Epoch::from_str(trimmed)
            .map_err(|e| AstrocartaError::InvalidEpoch(format!("{epoch}: {e}")))?;

        let mjd = parsed.to_mjd_utc_days();
        let (min, max) = ephem_range;
        if mjd < min || mjd > max {
            return Err(AstrocartaError::EpochOutOfRange { mjd, min, max });
        }

        Ok(TimeFrame {
            epoch: parsed,
            jd: mjd + JDTOMJD,
            mjd,
            gmst: gmst(mjd) / RADEG,
            obliquity: obleq(parsed.to_mjd_tt_days()) / RADEG,
        })
    }
}

#[cfg(test)]
mod time_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gmst() {
        let tut = 57028.478514610404;
        let res_gmst = gmst(tut);
        assert_eq!(res_gmst, 4.851925725092499);

        let tut = T2000;
        let res_gmst = gmst(tut);
        assert_eq!(res_gmst, 4.894961212789145);
    }

    #[test]
    fn test_time_frame_j2000() {
        let frame = TimeFrame::from_epoch_str("2000-01-01T12:00:00Z", (-100_000.0, 200_000.0))
            .expect("J2000 must parse");
        assert_eq!(frame.mjd, T2000);
        assert_eq!(frame.jd, 2451545.0);
        // GMST at J2000.0 is 280.46061837° (Meeus)
        assert_relative_eq!(frame.gmst, 280.46061837, epsilon = 1e-4);
        assert_relative_eq!(frame.obliquity, 23.4392911, epsilon = 1e-6);
    }

    #[test]
    fn test_time_frame_is_deterministic() {
        let range = (-100_000.0, 200_000.0);
        let a = TimeFrame::from_epoch_str("2024-03-20T03:06:00", range).unwrap();
        let b = TimeFrame::from_epoch_str("2024-03-20T03:06:00", range).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_epoch() {
        let res = TimeFrame::from_epoch_str("not-a-date", (-100_000.0, 200_000.0));
        assert!(matches!(res, Err(AstrocartaError::InvalidEpoch(_))));
    }

    #[test]
    fn test_epoch_out_of_range() {
        let res = TimeFrame::from_epoch_str("2000-01-01T12:00:00", (60_000.0, 70_000.0));
        assert_eq!(
            res,
            Err(AstrocartaError::EpochOutOfRange {
                mjd: T2000,
                min: 60_000.0,
                max: 70_000.0
            })
        );
    }
}
