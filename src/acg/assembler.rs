//! Feature assembly.
//!
//! Turns raw per-body generator output into the final feature list: applies the
//! rendering policy (line geometry versus influence point), attaches descriptive
//! metadata, and enforces a deterministic emission order (request-declared body
//! order first, then line kind, then signed aspect offset) regardless of the
//! order in which bodies completed upstream.

use crate::angles::great_circle_km;
use crate::constants::{GeoVertex, Kilometer};
use crate::time::TimeFrame;

use super::policy::{body_color, disposition, RenderMode};
use super::{zenith_point, ACGPoint, AcgFeature, AcgOptions, BodyOutput, LineMeta};

/// Assemble the final feature list.
///
/// Arguments
/// ---------
/// * `outputs`: raw per-body outputs in request-declared order; any completion
///   ordering upstream is already erased by this argument's order.
/// * `frame`: the request time frame.
/// * `options`: supplies the orb echo and the optional natal reference.
///
/// Return
/// ------
/// * The features in stable order, `render_priority` strictly increasing from 0.
pub fn assemble(
    outputs: Vec<BodyOutput>,
    frame: &TimeFrame,
    options: &AcgOptions,
) -> Vec<AcgFeature> {
    let mut features = Vec::new();

    for output in outputs {
        let rules = disposition(output.body.category());
        let zenith = zenith_point(&output.position, frame);
        let base_meta = LineMeta {
            color: body_color(output.body),
            z_order: rules.z_order,
            orb: options.orb,
            retrograde: output.position.is_retrograde(),
            zenith,
            ..LineMeta::default()
        };

        match rules.mode {
            RenderMode::InfluencePoint => {
                // Influence-only bodies never emit line geometry, whatever the
                // requested line kinds were.
                features.push(AcgFeature::Point(ACGPoint {
                    body: output.body,
                    coord: zenith,
                    influence_radius_km: rules.influence_radius_km,
                    influence_only: true,
                    meta: LineMeta {
                        method: "zenith",
                        natal_distance_km: options
                            .natal_reference
                            .map(|reference| great_circle_km(reference, zenith)),
                        ..base_meta.clone()
                    },
                }));
            }
            RenderMode::Line => {
                let mut lines = output.lines;
                lines.sort_by(|a, b| {
                    (a.kind, a.aspect.unwrap_or(0.0))
                        .partial_cmp(&(b.kind, b.aspect.unwrap_or(0.0)))
                        .expect("aspect offsets are finite")
                });

                for mut line in lines {
                    line.meta = LineMeta {
                        method: line.meta.method,
                        natal_distance_km: options
                            .natal_reference
                            .map(|reference| nearest_vertex_km(reference, &line.runs)),
                        ..base_meta.clone()
                    };
                    features.push(AcgFeature::Line(line));
                }
            }
        }
    }

    for (priority, feature) in features.iter_mut().enumerate() {
        let meta = match feature {
            AcgFeature::Line(line) => &mut line.meta,
            AcgFeature::Point(point) => &mut point.meta,
        };
        meta.render_priority = priority as u32;
    }

    features
}

/// Distance from `reference` to the closest vertex of any run.
fn nearest_vertex_km(reference: GeoVertex, runs: &[Vec<GeoVertex>]) -> Kilometer {
    runs.iter()
        .flatten()
        .map(|&vertex| great_circle_km(reference, vertex))
        .fold(f64::INFINITY, f64::min)
}
