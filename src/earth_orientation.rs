use crate::constants::{Radian, RADSEC, T2000};

/// Compute the mean obliquity of the ecliptic at a given epoch (IAU 1976 model).
///
/// This function returns the mean obliquity angle ε, defined as the angle between
/// the Earth's equator and the ecliptic plane, using the standard IAU 1976 polynomial model.
/// The result is expressed in radians and is valid for dates within a few millennia
/// of the J2000 epoch.
///
/// Arguments
/// ---------
/// * `tjm`: Modified Julian Date (TT scale).
///
/// Returns
/// --------
/// * Mean obliquity of the ecliptic in radians.
///
/// Formula
/// -------
/// The obliquity ε is computed as a cubic polynomial in Julian centuries since J2000:
///
/// ```text
/// ε(t) = ε₀ + ε₁·T + ε₂·T² + ε₃·T³
/// ```
/// where:
/// - `T = (tjm - T2000) / 36525.0`,
/// - the coefficients `ε₀`, `ε₁`, `ε₂`, `ε₃` are in arcseconds and internally converted to radians.
///
/// The polynomial is evaluated using Horner’s method for numerical stability.
///
/// # See also
/// * [`equatorial_from_ecliptic`](crate::ref_system::equatorial_from_ecliptic) – uses this
///   obliquity when converting ecliptic coordinates to equatorial ones
/// * [`TimeFrame`](crate::time::TimeFrame) – caches the obliquity once per request
pub fn obleq(tjm: f64) -> Radian {
    // Obliquity coefficients
    let ob0 = ((23.0 * 3600.0 + 26.0 * 60.0) + 21.448) * RADSEC;
    let ob1 = -46.815 * RADSEC;
    let ob2 = -0.0006 * RADSEC;
    let ob3 = 0.00181 * RADSEC;

    let t = (tjm - T2000) / 36525.0;

    ((ob3 * t + ob2) * t + ob1) * t + ob0
}

#[cfg(test)]
mod earth_orientation_test {
    use super::*;
    use crate::constants::RADEG;
    use approx::assert_relative_eq;

    #[test]
    fn test_obliquity_at_j2000() {
        // IAU 1976 value at J2000.0: 23°26'21.448"
        assert_relative_eq!(obleq(T2000) / RADEG, 23.439291111111111, epsilon = 1e-12);
    }

    #[test]
    fn test_obliquity_decreases_with_time() {
        // ε shrinks by roughly 47" per century around J2000
        let eps_2000 = obleq(T2000);
        let eps_2100 = obleq(T2000 + 36525.0);
        let delta_arcsec = (eps_2000 - eps_2100) / RADSEC;
        assert_relative_eq!(delta_arcsec, 46.815, epsilon = 0.01);
    }
}
