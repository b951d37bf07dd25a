//! # Astrocartography core: data model and line generators
//!
//! This module gathers the geometric heart of the crate:
//!
//! - The request/result data model ([`ACGRequest`], [`ACGResult`], [`ACGLine`],
//!   [`ACGPoint`], [`ParanPoint`]).
//! - The generators: [`meridian`] (MC/IC), [`horizon`] (AC/DC), [`aspect`]
//!   (offset angular lines) and [`paran`] (simultaneous-angularity latitudes).
//! - The rendering-metadata [`policy`] and the final [`assembler`].
//!
//! ## Conventions
//!
//! - Geographic longitudes are east-positive degrees, normalized to `(-180, 180]`
//!   at emission. Latitudes stay within `[-90, 90]`; the poles are never sampled.
//! - The local hour angle `H` of a body at geographic longitude `λ` is
//!   `H = GMST + λ − RA`; a body culminates at `H = 0` and sits on the horizon
//!   where `cos H = −tan φ · tan δ`.
//! - A "line" is an ordered list of vertex runs. A run breaks wherever the body is
//!   circumpolar at a sampled latitude (no horizon solution) or where the emitted
//!   longitude wraps across the ±180° antimeridian.

pub mod aspect;
pub mod assembler;
pub mod horizon;
pub mod meridian;
pub mod paran;
pub mod policy;

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::angles::normalize_longitude;
use crate::bodies::Body;
use crate::constants::{Degree, GeoVertex, Kilometer};
use crate::ephemeris::{CelestialBodyPosition, ResolveFlags};
use crate::time::TimeFrame;

/// One contiguous, independently renderable polyline of `(longitude, latitude)` vertices.
pub type VertexRun = Vec<GeoVertex>;

/// The kind of angular line a feature represents.
///
/// The declaration order is the stable emission order within one body.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum LineKind {
    /// Midheaven: the body culminates on this meridian.
    Mc,
    /// Anti-midheaven: the body anti-culminates on this meridian.
    Ic,
    /// Ascendant: the body rises on this curve.
    Ac,
    /// Descendant: the body sets on this curve.
    Dc,
    /// Aspect offset applied to the midheaven condition.
    McAspect,
    /// Aspect offset applied to the ascendant condition.
    AcAspect,
}

impl LineKind {
    /// The four base kinds a request may ask for, in emission order.
    pub const BASE: [LineKind; 4] = [LineKind::Mc, LineKind::Ic, LineKind::Ac, LineKind::Dc];
}

/// Descriptive metadata attached to every emitted line or point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineMeta {
    /// Rendering color hint, CSS hex.
    pub color: &'static str,
    /// Stacking-order hint from the rendering policy (lower draws first).
    pub z_order: u8,
    /// Monotonically increasing priority over the whole feature list.
    pub render_priority: u32,
    /// Generation method tag (`"meridian"`, `"horizon"`, ...).
    pub method: &'static str,
    /// Orb tolerance echoed from the request, for downstream near-crossing filters.
    pub orb: Degree,
    /// Whether the body was in retrograde motion at the request instant.
    pub retrograde: bool,
    /// Geographic point where the body stands exactly overhead.
    pub zenith: GeoVertex,
    /// Great-circle distance from the natal reference to the feature, if a
    /// reference was supplied. Annotation only, never affects geometry.
    pub natal_distance_km: Option<Kilometer>,
}

impl Default for LineMeta {
    fn default() -> Self {
        LineMeta {
            color: "#808080",
            z_order: 0,
            render_priority: 0,
            method: "",
            orb: 0.0,
            retrograde: false,
            zenith: (0.0, 0.0),
            natal_distance_km: None,
        }
    }
}

/// One line-type result for one body.
///
/// The vertex runs are ordered by increasing sampled latitude and never wrap
/// across the antimeridian within a single run; circumpolar latitude bands and
/// longitude wraps both split the line into disjoint runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ACGLine {
    pub body: Body,
    pub kind: LineKind,
    /// Signed aspect offset in degrees for aspect kinds, `None` for base kinds.
    pub aspect: Option<Degree>,
    pub runs: SmallVec<[VertexRun; 2]>,
    pub meta: LineMeta,
}

impl ACGLine {
    /// Total number of vertices across all runs.
    pub fn vertex_count(&self) -> usize {
        self.runs.iter().map(Vec::len).sum()
    }
}

/// A degenerate "line" for bodies rendered as influence zones only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ACGPoint {
    pub body: Body,
    /// The body's zenith point.
    pub coord: GeoVertex,
    /// Radius of the influence zone, kilometers. Always positive for emitted points.
    pub influence_radius_km: Kilometer,
    /// When set, consumers must render the influence zone instead of line geometry.
    pub influence_only: bool,
    pub meta: LineMeta,
}

/// Which meridian condition a paran uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeridianCrossing {
    Culmination,
    AntiCulmination,
}

/// Which horizon condition a paran uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HorizonCrossing {
    Rising,
    Setting,
}

/// A latitude at which two bodies are simultaneously angular by two different conditions.
///
/// The longitude comes from the meridian body's MC or IC line; the latitude solves the
/// horizon body's horizon equation at that fixed longitude.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParanPoint {
    pub meridian_body: Body,
    pub horizon_body: Body,
    pub coord: GeoVertex,
    pub meridian: MeridianCrossing,
    pub horizon: HorizonCrossing,
}

/// Convention for the aspect offset applied to meridian-type aspect lines.
///
/// The exact-offset convention differs between astrocartography traditions; it is
/// configurable here and should be validated against a reference chart before exact
/// aspect-line positions are relied upon. Horizon-type aspect lines always offset
/// the solved hour angle directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AspectConvention {
    /// Offset the body's ecliptic longitude, then reconvert to right ascension
    /// through the obliquity rotation (zodiacal aspects).
    #[default]
    EclipticLongitude,
    /// Offset the right ascension directly (mundane aspects).
    RightAscension,
}

/// Tunable computation parameters. Explicit, no hidden defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcgConfig {
    /// Latitude sampling step for horizon-type curves, degrees.
    pub lat_step: Degree,
    /// Usable latitude band for paran solutions; solved latitudes beyond this
    /// magnitude are reported as "no paran".
    pub paran_lat_max: Degree,
    /// Offset convention for meridian-type aspect lines.
    pub aspect_convention: AspectConvention,
    /// Whether resolved positions are cached across resolves.
    pub caching: bool,
}

impl Default for AcgConfig {
    fn default() -> Self {
        AcgConfig {
            lat_step: 1.0,
            paran_lat_max: 89.0,
            aspect_convention: AspectConvention::EclipticLongitude,
            caching: true,
        }
    }
}

/// Per-request options, handed over verbatim by the intake layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcgOptions {
    /// Requested base line kinds; aspect kinds are driven by `aspects` instead.
    pub line_kinds: Vec<LineKind>,
    /// Aspect angles in degrees (e.g. `60.0` for sextile). Each angle yields
    /// lines on both sides of exactness except for `0°` and `180°`.
    pub aspects: Vec<Degree>,
    /// Orb tolerance echoed into feature metadata for downstream filtering.
    pub orb: Degree,
    pub include_parans: bool,
    /// Flags passed through to the position provider.
    pub flags: ResolveFlags,
    /// Optional natal reference point for relative-distance annotations.
    pub natal_reference: Option<GeoVertex>,
}

impl Default for AcgOptions {
    fn default() -> Self {
        AcgOptions {
            line_kinds: LineKind::BASE.to_vec(),
            aspects: Vec::new(),
            orb: 1.0,
            include_parans: false,
            flags: ResolveFlags::NONE,
            natal_reference: None,
        }
    }
}

/// One astrocartography request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ACGRequest {
    /// The instant, ISO-8601, interpreted as UTC.
    pub epoch: String,
    /// Body identifiers as declared by the caller; emission order follows this list.
    pub bodies: Vec<String>,
    pub options: AcgOptions,
}

impl ACGRequest {
    /// Request every base line kind for `bodies` at `epoch`, default options.
    pub fn new(epoch: impl Into<String>, bodies: Vec<String>) -> Self {
        ACGRequest {
            epoch: epoch.into(),
            bodies,
            options: AcgOptions::default(),
        }
    }
}

/// A per-body failure recovered during a request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyFailure {
    /// The identifier as the caller declared it.
    pub body_id: String,
    pub reason: String,
}

/// An emitted feature: either line geometry or an influence point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AcgFeature {
    Line(ACGLine),
    Point(ACGPoint),
}

impl AcgFeature {
    pub fn body(&self) -> Body {
        match self {
            AcgFeature::Line(line) => line.body,
            AcgFeature::Point(point) => point.body,
        }
    }

    pub fn render_priority(&self) -> u32 {
        match self {
            AcgFeature::Line(line) => line.meta.render_priority,
            AcgFeature::Point(point) => point.meta.render_priority,
        }
    }
}

/// The complete result of one request.
#[derive(Debug, Clone, PartialEq)]
pub struct ACGResult {
    pub frame: TimeFrame,
    pub features: Vec<AcgFeature>,
    pub parans: Vec<ParanPoint>,
    /// Per-body failures; the request as a whole still succeeded.
    pub failures: Vec<BodyFailure>,
    /// Wall-clock duration of the whole computation.
    pub elapsed: Duration,
}

/// Geographic point where a body stands exactly overhead: the latitude is the
/// declination, the longitude is where the body culminates.
pub fn zenith_point(position: &CelestialBodyPosition, frame: &TimeFrame) -> GeoVertex {
    (normalize_longitude(position.ra - frame.gmst), position.dec)
}

/// Raw per-body output handed to the assembler: the resolved position plus the
/// generated lines, in generation order.
pub struct BodyOutput {
    pub body: Body,
    pub position: Arc<CelestialBodyPosition>,
    pub lines: Vec<ACGLine>,
}
