//! # Astrocarta: the computation façade
//!
//! This module defines the [`Astrocarta`] struct, the central façade that wires together:
//!
//! 1. **Position resolution** — the external [`PositionProvider`] behind the
//!    write-once concurrent cache ([`PositionResolver`]).
//! 2. **The time frame converter** — one [`TimeFrame`](crate::time::TimeFrame) per request.
//! 3. **The line generators** — meridian, horizon, aspect and paran computation.
//! 4. **Feature assembly** — rendering policy, metadata and deterministic ordering.
//!
//! ## Typical usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use astrocarta::astrocarta::Astrocarta;
//! use astrocarta::acg::ACGRequest;
//! # use astrocarta::ephemeris::{PositionProvider, CelestialBodyPosition, ResolveFlags};
//! # use astrocarta::bodies::Body;
//! # use astrocarta::astrocarta_errors::AstrocartaError;
//! # struct Swiss;
//! # impl PositionProvider for Swiss {
//! #     fn position(&self, _: Body, _: hifitime::Epoch, _: ResolveFlags)
//! #         -> Result<CelestialBodyPosition, AstrocartaError> { unimplemented!() }
//! # }
//!
//! let engine = Astrocarta::new(Arc::new(Swiss));
//! let request = ACGRequest::new(
//!     "2000-01-01T12:00:00Z",
//!     vec!["Sun".into(), "Moon".into(), "Mars".into()],
//! );
//! let result = engine.compute_acg(&request)?;
//! for feature in &result.features {
//!     println!("{:?}", feature.body());
//! }
//! # Ok::<(), astrocarta::astrocarta_errors::AstrocartaError>(())
//! ```
//!
//! ## Failure isolation
//!
//! A slow or failing provider call for one body never corrupts the others: the
//! failing body is dropped from the feature list and reported in
//! [`ACGResult::failures`](crate::acg::ACGResult), while fatal request errors
//! (bad epoch, no recognizable body) surface as `Err`.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::acg::{
    aspect::aspect_lines,
    assembler::assemble,
    horizon::horizon_lines,
    meridian::meridian_lines,
    paran::locate_parans,
    policy::{disposition, RenderMode},
    ACGRequest, ACGResult, AcgConfig, BodyFailure, BodyOutput,
};
use crate::astrocarta_errors::AstrocartaError;
use crate::bodies::Body;
use crate::ephemeris::{PositionProvider, PositionResolver};
use crate::time::TimeFrame;

/// The astrocartography engine.
///
/// Owns the position resolver (provider + cache) and the computation
/// configuration. One instance serves many concurrent requests; the only shared
/// mutable state is the resolver cache, which is safe under concurrent use.
pub struct Astrocarta {
    resolver: PositionResolver,
    config: AcgConfig,
}

impl Astrocarta {
    /// Construct an engine with the default [`AcgConfig`].
    pub fn new(provider: Arc<dyn PositionProvider>) -> Self {
        Self::with_config(provider, AcgConfig::default())
    }

    /// Construct an engine with an explicit configuration.
    pub fn with_config(provider: Arc<dyn PositionProvider>, config: AcgConfig) -> Self {
        Astrocarta {
            resolver: PositionResolver::with_caching(provider, config.caching),
            config,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &AcgConfig {
        &self.config
    }

    /// Compute the full astrocartography result for one request.
    ///
    /// Arguments
    /// ---------
    /// * `request`: epoch, body identifiers and options, as declared by the caller.
    ///
    /// Return
    /// ------
    /// * The assembled [`ACGResult`], or a fatal [`AstrocartaError`] when the epoch
    ///   is unusable or no body identifier could be recognized.
    pub fn compute_acg(&self, request: &ACGRequest) -> Result<ACGResult, AstrocartaError> {
        let started = Instant::now();

        if request.bodies.is_empty() {
            return Err(AstrocartaError::InvalidBodyList(
                "empty body list".to_string(),
            ));
        }

        let mut failures: Vec<BodyFailure> = Vec::new();
        let mut bodies: Vec<(String, Body)> = Vec::new();
        for id in &request.bodies {
            match Body::from_str(id) {
                Ok(body) => bodies.push((id.clone(), body)),
                Err(err) => {
                    warn!(body_id = %id, "unrecognized body identifier");
                    failures.push(BodyFailure {
                        body_id: id.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }
        if bodies.is_empty() {
            return Err(AstrocartaError::InvalidBodyList(format!(
                "no recognized body among {:?}",
                request.bodies
            )));
        }

        let frame = TimeFrame::from_epoch_str(&request.epoch, self.resolver.ephemeris_range())?;
        debug!(
            mjd = frame.mjd,
            gmst = frame.gmst,
            obliquity = frame.obliquity,
            "time frame computed"
        );

        // Per-body generation, in request-declared order. Bodies are independent;
        // a provider failure for one is recorded and the loop moves on.
        let mut outputs: Vec<BodyOutput> = Vec::with_capacity(bodies.len());
        for (id, body) in &bodies {
            let position =
                match self
                    .resolver
                    .resolve(*body, frame.epoch, request.options.flags)
                {
                    Ok(position) => position,
                    Err(err) => {
                        warn!(%body, %err, "body dropped from result");
                        failures.push(BodyFailure {
                            body_id: id.clone(),
                            reason: err.to_string(),
                        });
                        continue;
                    }
                };

            let mut lines = Vec::new();
            if disposition(body.category()).mode == RenderMode::Line {
                lines.extend(meridian_lines(
                    *body,
                    &position,
                    &frame,
                    &request.options.line_kinds,
                ));
                lines.extend(horizon_lines(
                    *body,
                    &position,
                    &frame,
                    &request.options.line_kinds,
                    self.config.lat_step,
                ));
                lines.extend(aspect_lines(
                    *body,
                    &position,
                    &frame,
                    &request.options.aspects,
                    self.config.aspect_convention,
                    self.config.lat_step,
                ));
            }

            outputs.push(BodyOutput {
                body: *body,
                position,
                lines,
            });
        }

        let parans = if request.options.include_parans {
            let resolved: Vec<_> = outputs
                .iter()
                .map(|output| (output.body, Arc::clone(&output.position)))
                .collect();
            locate_parans(&resolved, &frame, &self.config)
        } else {
            Vec::new()
        };

        let features = assemble(outputs, &frame, &request.options);
        debug!(
            features = features.len(),
            parans = parans.len(),
            failures = failures.len(),
            "request assembled"
        );

        Ok(ACGResult {
            frame,
            features,
            parans,
            failures,
            elapsed: started.elapsed(),
        })
    }
}
