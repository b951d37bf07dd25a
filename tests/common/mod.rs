use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use hifitime::Epoch;

use astrocarta::astrocarta_errors::AstrocartaError;
use astrocarta::bodies::Body;
use astrocarta::ephemeris::{CelestialBodyPosition, PositionProvider, ResolveFlags};

/// Deterministic in-memory provider: serves scripted positions regardless of the
/// instant, counts calls, and fails for any body without a script entry.
pub struct ScriptedProvider {
    positions: HashMap<Body, CelestialBodyPosition>,
    pub calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(positions: Vec<(Body, CelestialBodyPosition)>) -> Arc<Self> {
        Arc::new(ScriptedProvider {
            positions: positions.into_iter().collect(),
            calls: AtomicUsize::new(0),
        })
    }
}

impl PositionProvider for ScriptedProvider {
    fn position(
        &self,
        body: Body,
        _epoch: Epoch,
        _flags: ResolveFlags,
    ) -> Result<CelestialBodyPosition, AstrocartaError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.positions
            .get(&body)
            .copied()
            .ok_or_else(|| AstrocartaError::PositionUnavailable {
                body: body.to_string(),
                reason: "no scripted position".to_string(),
            })
    }
}

pub fn position(ra: f64, dec: f64) -> CelestialBodyPosition {
    CelestialBodyPosition {
        ra,
        dec,
        ecl_lon: ra,
        ecl_lat: 0.0,
        distance_au: 1.0,
        lon_speed: 1.0,
    }
}

/// The Sun around 2000-01-01T12:00:00Z: RA ≈ 280.15°, δ ≈ −23.0°.
pub fn sun_j2000() -> CelestialBodyPosition {
    CelestialBodyPosition {
        ra: 280.15,
        dec: -23.0,
        ecl_lon: 280.6,
        ecl_lat: 0.0,
        distance_au: 0.983,
        lon_speed: 1.019,
    }
}
