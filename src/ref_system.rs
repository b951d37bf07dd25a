//! Reference-system rotations between the ecliptic and equatorial frames.
//!
//! The aspect-line generator needs to move an ecliptic longitude offset back into
//! equatorial coordinates before the meridian formula applies; this module provides
//! the single obliquity rotation that conversion requires. Precession and nutation
//! are deliberately not modelled: astrocartography works with of-date positions
//! supplied by the external provider.

use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::angles::normalize_degrees;
use crate::constants::{Degree, Radian, RADEG};

/// Rotation matrix of angle `alpha` around one of the coordinate axes.
///
/// Arguments
/// ---------
/// * `alpha`: rotation angle in radians.
/// * `k`: axis index, `0`/`1`/`2` for X/Y/Z.
///
/// Return
/// ------
/// * The 3×3 rotation matrix.
///
/// Panics
/// ------
/// * If `k` is not a valid axis index.
pub fn rotmt(alpha: Radian, k: usize) -> Matrix3<f64> {
    let axis = match k {
        0 => Vector3::x_axis(),
        1 => Vector3::y_axis(),
        2 => Vector3::z_axis(),
        _ => panic!("**** ROTMT: invalid axis index {k} (must be 0,1,2) ****"),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Convert ecliptic spherical coordinates to equatorial right ascension and declination.
///
/// The conversion is a single rotation of the ecliptic position vector around the
/// X axis by the obliquity, followed by extraction of the spherical angles.
///
/// Arguments
/// ---------
/// * `ecl_lon`: ecliptic longitude in degrees.
/// * `ecl_lat`: ecliptic latitude in degrees.
/// * `obliquity`: mean obliquity of the ecliptic in degrees, from
///   [`obleq`](crate::earth_orientation::obleq).
///
/// Return
/// ------
/// * `(ra, dec)` in degrees, with `ra` normalized to `[0, 360)`.
///
/// # See also
/// * [`rotmt`] – the underlying axis rotation
pub fn equatorial_from_ecliptic(
    ecl_lon: Degree,
    ecl_lat: Degree,
    obliquity: Degree,
) -> (Degree, Degree) {
    let (lon, lat, eps) = (ecl_lon * RADEG, ecl_lat * RADEG, obliquity * RADEG);

    let ecliptic = Vector3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin());
    let equatorial = rotmt(eps, 0) * ecliptic;

    let ra = equatorial.y.atan2(equatorial.x) / RADEG;
    let dec = equatorial.z.clamp(-1.0, 1.0).asin() / RADEG;

    (normalize_degrees(ra), dec)
}
