//! # Celestial body registry
//!
//! Identifiers and classification for every body the engine can draw. The
//! [`Body`] enum is the canonical identifier used in requests, cache keys and
//! emitted features; [`BodyCategory`] drives the rendering-metadata policy
//! (which bodies get line geometry versus a point influence zone).
//!
//! Request intake hands the engine plain string identifiers; [`Body::from_str`]
//! resolves them case-insensitively. Unrecognized identifiers are reported per
//! body, never silently dropped.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::astrocarta_errors::AstrocartaError;

/// Identifier of a celestial body or sensitive point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    NorthNode,
    SouthNode,
    Chiron,
    Ceres,
    Pallas,
    Juno,
    Vesta,
    Regulus,
    Spica,
    Sirius,
    Aldebaran,
    Antares,
    Algol,
    /// Mean Black Moon Lilith (lunar apogee).
    Lilith,
    /// Hypothetical White Moon Selena.
    Selena,
}

/// Coarse classification used by the rendering-metadata policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyCategory {
    Planet,
    Node,
    Asteroid,
    FixedStar,
    SensitivePoint,
}

impl BodyCategory {
    /// All categories, in policy order. Kept in one place so the policy
    /// completeness test cannot drift from the enum.
    pub const ALL: [BodyCategory; 5] = [
        BodyCategory::Planet,
        BodyCategory::Node,
        BodyCategory::Asteroid,
        BodyCategory::FixedStar,
        BodyCategory::SensitivePoint,
    ];
}

impl Body {
    /// Classification of this body for the rendering policy.
    pub fn category(&self) -> BodyCategory {
        use Body::*;
        match self {
            Sun | Moon | Mercury | Venus | Mars | Jupiter | Saturn | Uranus | Neptune | Pluto => {
                BodyCategory::Planet
            }
            NorthNode | SouthNode => BodyCategory::Node,
            Chiron | Ceres | Pallas | Juno | Vesta => BodyCategory::Asteroid,
            Regulus | Spica | Sirius | Aldebaran | Antares | Algol => BodyCategory::FixedStar,
            Lilith | Selena => BodyCategory::SensitivePoint,
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
            Body::NorthNode => "NorthNode",
            Body::SouthNode => "SouthNode",
            Body::Chiron => "Chiron",
            Body::Ceres => "Ceres",
            Body::Pallas => "Pallas",
            Body::Juno => "Juno",
            Body::Vesta => "Vesta",
            Body::Regulus => "Regulus",
            Body::Spica => "Spica",
            Body::Sirius => "Sirius",
            Body::Aldebaran => "Aldebaran",
            Body::Antares => "Antares",
            Body::Algol => "Algol",
            Body::Lilith => "Lilith",
            Body::Selena => "Selena",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Body {
    type Err = AstrocartaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sun" => Ok(Body::Sun),
            "moon" => Ok(Body::Moon),
            "mercury" => Ok(Body::Mercury),
            "venus" => Ok(Body::Venus),
            "mars" => Ok(Body::Mars),
            "jupiter" => Ok(Body::Jupiter),
            "saturn" => Ok(Body::Saturn),
            "uranus" => Ok(Body::Uranus),
            "neptune" => Ok(Body::Neptune),
            "pluto" => Ok(Body::Pluto),
            "northnode" | "north_node" | "rahu" => Ok(Body::NorthNode),
            "southnode" | "south_node" | "ketu" => Ok(Body::SouthNode),
            "chiron" => Ok(Body::Chiron),
            "ceres" => Ok(Body::Ceres),
            "pallas" => Ok(Body::Pallas),
            "juno" => Ok(Body::Juno),
            "vesta" => Ok(Body::Vesta),
            "regulus" => Ok(Body::Regulus),
            "spica" => Ok(Body::Spica),
            "sirius" => Ok(Body::Sirius),
            "aldebaran" => Ok(Body::Aldebaran),
            "antares" => Ok(Body::Antares),
            "algol" => Ok(Body::Algol),
            "lilith" | "blackmoon" | "black_moon" => Ok(Body::Lilith),
            "selena" | "whitemoon" | "white_moon" => Ok(Body::Selena),
            other => Err(AstrocartaError::UnknownBody(other.to_string())),
        }
    }
}
