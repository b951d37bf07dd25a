use thiserror::Error;

/// Error type for the whole crate.
///
/// Fatality follows the request contract: [`AstrocartaError::InvalidEpoch`],
/// [`AstrocartaError::EpochOutOfRange`] and [`AstrocartaError::InvalidBodyList`] abort the
/// whole request, while [`AstrocartaError::UnknownBody`] and
/// [`AstrocartaError::PositionUnavailable`] are recovered per body: the failing body is
/// dropped from the output and reported in the result's failure list.
///
/// An empty horizon line or an absent paran solution is **not** an error; both are valid
/// outcomes represented as empty geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AstrocartaError {
    #[error("Invalid epoch: {0}")]
    InvalidEpoch(String),

    #[error("Epoch {mjd} MJD outside the supported ephemeris range [{min}, {max}]")]
    EpochOutOfRange { mjd: f64, min: f64, max: f64 },

    #[error("Invalid body list: {0}")]
    InvalidBodyList(String),

    #[error("Unknown body identifier: {0}")]
    UnknownBody(String),

    #[error("Position unavailable for {body}: {reason}")]
    PositionUnavailable { body: String, reason: String },
}
