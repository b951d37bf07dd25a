//! Rendering-metadata policy.
//!
//! A static lookup table decides, per body category, whether a body is drawn as
//! ordinary line geometry or as a point influence zone, together with its
//! stacking-order hint and influence radius. The table is an explicit enumerated
//! mapping so completeness is testable independently of any geometry.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::bodies::{Body, BodyCategory};
use crate::constants::Kilometer;

/// How a body is rendered downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RenderMode {
    /// Ordinary line geometry (MC/IC/AC/DC and aspect lines).
    Line,
    /// A single zenith point with an influence radius; no line geometry.
    InfluencePoint,
}

/// Per-category rendering rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderDisposition {
    pub mode: RenderMode,
    /// Stacking-order hint; lower draws first.
    pub z_order: u8,
    /// Influence-zone radius, kilometers. Zero for line-mode categories.
    pub influence_radius_km: Kilometer,
}

static DISPOSITIONS: Lazy<HashMap<BodyCategory, RenderDisposition>> = Lazy::new(|| {
    HashMap::from([
        (
            BodyCategory::Planet,
            RenderDisposition {
                mode: RenderMode::Line,
                z_order: 10,
                influence_radius_km: 0.0,
            },
        ),
        (
            BodyCategory::Node,
            RenderDisposition {
                mode: RenderMode::Line,
                z_order: 20,
                influence_radius_km: 0.0,
            },
        ),
        (
            BodyCategory::Asteroid,
            RenderDisposition {
                mode: RenderMode::Line,
                z_order: 30,
                influence_radius_km: 0.0,
            },
        ),
        (
            BodyCategory::FixedStar,
            RenderDisposition {
                mode: RenderMode::InfluencePoint,
                z_order: 40,
                influence_radius_km: 150.0,
            },
        ),
        (
            BodyCategory::SensitivePoint,
            RenderDisposition {
                mode: RenderMode::InfluencePoint,
                z_order: 50,
                influence_radius_km: 100.0,
            },
        ),
    ])
});

/// Rendering rules for one body category.
pub fn disposition(category: BodyCategory) -> RenderDisposition {
    // The completeness test guarantees every category is present.
    DISPOSITIONS[&category]
}

/// Rendering color hint for one body, CSS hex.
pub fn body_color(body: Body) -> &'static str {
    use Body::*;
    match body {
        Sun => "#f9a825",
        Moon => "#b0bec5",
        Mercury => "#8d6e63",
        Venus => "#66bb6a",
        Mars => "#e53935",
        Jupiter => "#5e35b1",
        Saturn => "#37474f",
        Uranus => "#00acc1",
        Neptune => "#1e88e5",
        Pluto => "#6d4c41",
        NorthNode | SouthNode => "#9e9d24",
        Chiron | Ceres | Pallas | Juno | Vesta => "#7cb342",
        Regulus | Spica | Sirius | Aldebaran | Antares | Algol => "#fdd835",
        Lilith => "#4a148c",
        Selena => "#eceff1",
    }
}
