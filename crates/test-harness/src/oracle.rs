//! Verification oracles: pure functions returning pass/fail verdicts.
//!
//! Oracles report through `OracleVerdict` instead of panicking, so one pass
//! can collect every failure.

use std::collections::HashMap;

use connector_types::{ConnectorParameters, Stage};
use geom_kernel::{BoundingBox, MockHole, RenderMesh};
use shape_builder::{BuildPlan, Primitive};

/// The result of a single oracle check.
#[derive(Debug, Clone)]
pub struct OracleVerdict {
    pub oracle_name: String,
    pub passed: bool,
    pub detail: String,
}

impl OracleVerdict {
    fn pass(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
        }
    }

    fn fail(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
        }
    }

    fn from_failures(name: &str, checked: usize, what: &str, failures: Vec<String>) -> Self {
        if failures.is_empty() {
            Self::pass(name, format!("all {checked} {what} ok"))
        } else {
            Self::fail(
                name,
                format!("{} of {checked} {what} failed: {}", failures.len(), failures.join("; ")),
            )
        }
    }
}

const PLAN_EPS: f64 = 1e-6;

// ── Plan Oracles ────────────────────────────────────────────────────────────

/// Every slot cut must measure board + tolerance across two of its axes.
pub fn check_slot_cross_sections(plan: &BuildPlan, params: &ConnectorParameters) -> OracleVerdict {
    let w = params.board_width + params.tolerance;
    let t = params.board_thickness + params.tolerance;
    let slots: Vec<_> = plan.steps_in(Stage::SlotCut).collect();
    let failures = slots
        .iter()
        .filter_map(|step| {
            let size = step.shape()?.envelope().size();
            let matches = (0..3).any(|i| {
                (0..3).any(|j| {
                    i != j && (size[i] - w).abs() < PLAN_EPS && (size[j] - t).abs() < PLAN_EPS
                })
            });
            (!matches).then(|| format!("{} is {:?}", step.label, size))
        })
        .collect();
    OracleVerdict::from_failures("slot_cross_sections", slots.len(), "slots", failures)
}

/// Every rib is a box thinner than the wall that stays inside the body.
pub fn check_ribs(plan: &BuildPlan, wall_thickness: f64) -> OracleVerdict {
    let body = plan.body_envelope();
    let ribs: Vec<_> = plan.steps_in(Stage::Rib).collect();
    let failures = ribs
        .iter()
        .filter_map(|step| {
            let shape = step.shape()?;
            let Primitive::Box { size } = shape.primitive else {
                return Some(format!("{} is not a box", step.label));
            };
            let thickness = size.iter().cloned().fold(f64::INFINITY, f64::min);
            if thickness >= wall_thickness {
                Some(format!("{} is {thickness} thick", step.label))
            } else if !body.contains(&shape.envelope(), PLAN_EPS) {
                Some(format!("{} leaves the body", step.label))
            } else {
                None
            }
        })
        .collect();
    OracleVerdict::from_failures("ribs", ribs.len(), "ribs", failures)
}

/// Taper depth never exceeds `max_depth`.
pub fn check_taper_depth(plan: &BuildPlan, max_depth: f64) -> OracleVerdict {
    let tapers: Vec<_> = plan.steps_in(Stage::Taper).collect();
    let failures = tapers
        .iter()
        .filter_map(|step| {
            let depth = match step.shape()?.primitive {
                Primitive::Wedge { depth, .. } => depth,
                Primitive::Loft { length, .. } => length,
                _ => return Some(format!("{} is not a wedge or loft", step.label)),
            };
            (depth > max_depth + PLAN_EPS).then(|| format!("{} is {depth} deep", step.label))
        })
        .collect();
    OracleVerdict::from_failures("taper_depth", tapers.len(), "tapers", failures)
}

/// The realized solid occupies exactly the body envelope of its plan.
pub fn check_envelope(plan: &BuildPlan, actual: &BoundingBox, eps: f64) -> OracleVerdict {
    let expected = plan.body_envelope();
    let off = (0..3).find(|&i| {
        (actual.min[i] - expected.min[i]).abs() > eps || (actual.max[i] - expected.max[i]).abs() > eps
    });
    match off {
        None => OracleVerdict::pass("envelope", format!("size {:?}", actual.size())),
        Some(i) => OracleVerdict::fail(
            "envelope",
            format!(
                "axis {i}: expected [{:.3}, {:.3}], got [{:.3}, {:.3}]",
                expected.min[i], expected.max[i], actual.min[i], actual.max[i]
            ),
        ),
    }
}

/// Holes start on the body surface and go exactly one wall deep.
pub fn check_holes_on_surface(holes: &[MockHole], body: &BoundingBox, wall: f64) -> OracleVerdict {
    let failures = holes
        .iter()
        .filter_map(|hole| {
            let axis = hole.face.axis.index();
            let surface = if hole.face.positive {
                body.max[axis]
            } else {
                body.min[axis]
            };
            if (hole.center[axis] - surface).abs() > PLAN_EPS {
                Some(format!("hole on {} starts at {:?}", hole.face, hole.center))
            } else if (hole.depth - wall).abs() > PLAN_EPS {
                Some(format!("hole on {} is {} deep", hole.face, hole.depth))
            } else {
                None
            }
        })
        .collect();
    OracleVerdict::from_failures("holes_on_surface", holes.len(), "holes", failures)
}

// ── Mesh Oracles ────────────────────────────────────────────────────────────

/// Check that the mesh is watertight: every triangle edge shared by exactly 2 triangles.
///
/// Edges are matched by position quantized to 1e-4, so meshes with
/// per-face vertices still pair up.
pub fn check_watertight_mesh(mesh: &RenderMesh) -> OracleVerdict {
    type Key = (i64, i64, i64);

    fn key(v: [f32; 3]) -> Key {
        let q = |x: f32| (x as f64 * 10000.0).round() as i64;
        (q(v[0]), q(v[1]), q(v[2]))
    }

    let mut edge_counts: HashMap<(Key, Key), usize> = HashMap::new();
    for i in 0..mesh.triangle_count() {
        let [a, b, c] = mesh.triangle(i).map(key);
        for (p, q) in [(a, b), (b, c), (c, a)] {
            *edge_counts.entry((p.min(q), p.max(q))).or_insert(0) += 1;
        }
    }

    let unpaired = edge_counts.values().filter(|&&c| c != 2).count();
    if unpaired == 0 {
        OracleVerdict::pass(
            "watertight_mesh",
            format!("all {} edges paired", edge_counts.len()),
        )
    } else {
        OracleVerdict::fail(
            "watertight_mesh",
            format!("{unpaired} unpaired edges out of {}", edge_counts.len()),
        )
    }
}

/// Check that stored normals agree with the geometric winding.
pub fn check_consistent_normals(mesh: &RenderMesh) -> OracleVerdict {
    let norms = &mesh.normals;
    let total = mesh.triangle_count();
    let mut inconsistent = 0usize;

    for t in 0..total {
        let idx: Vec<usize> = mesh.indices[t * 3..t * 3 + 3]
            .iter()
            .map(|&i| i as usize * 3)
            .collect();
        if idx.iter().any(|&i| i + 2 >= norms.len()) {
            continue;
        }
        let g = file_export::stl::facet_normal(&mesh.triangle(t));
        let dot: f32 = (0..3)
            .map(|k| g[k] * (norms[idx[0] + k] + norms[idx[1] + k] + norms[idx[2] + k]))
            .sum();
        if dot < 0.0 {
            inconsistent += 1;
        }
    }

    if inconsistent == 0 {
        OracleVerdict::pass(
            "consistent_normals",
            format!("all {total} triangles have consistent winding"),
        )
    } else {
        OracleVerdict::fail(
            "consistent_normals",
            format!("{inconsistent} of {total} triangles have reversed normals"),
        )
    }
}

/// Check that no triangle has zero area.
pub fn check_no_degenerate_triangles(mesh: &RenderMesh) -> OracleVerdict {
    let total = mesh.triangle_count();
    let degenerate = (0..total)
        .filter(|&i| {
            let [a, b, c] = mesh.triangle(i);
            let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
            let v = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
            let n = [
                u[1] * v[2] - u[2] * v[1],
                u[2] * v[0] - u[0] * v[2],
                u[0] * v[1] - u[1] * v[0],
            ];
            (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt() / 2.0 < 1e-12
        })
        .count();

    if degenerate == 0 {
        OracleVerdict::pass(
            "no_degenerate_triangles",
            format!("all {total} triangles have non-zero area"),
        )
    } else {
        OracleVerdict::fail(
            "no_degenerate_triangles",
            format!("{degenerate} of {total} triangles are degenerate"),
        )
    }
}

/// Check that all index values are within bounds.
pub fn check_valid_indices(mesh: &RenderMesh) -> OracleVerdict {
    let vertex_count = mesh.vertices.len() / 3;
    let bad: Vec<(usize, u32)> = mesh
        .indices
        .iter()
        .enumerate()
        .filter(|(_, &idx)| idx as usize >= vertex_count)
        .map(|(i, &idx)| (i, idx))
        .collect();

    if bad.is_empty() {
        OracleVerdict::pass("valid_indices", format!("all indices < {vertex_count}"))
    } else {
        OracleVerdict::fail(
            "valid_indices",
            format!(
                "{} out-of-bounds indices (vertex_count={vertex_count}): {:?}",
                bad.len(),
                &bad[..bad.len().min(5)]
            ),
        )
    }
}

/// Compare the extent of a tessellation with the solid's bounding box.
///
/// Curved faces are chordal approximations, so `tolerance` should cover
/// the tessellation tolerance.
pub fn check_mesh_envelope(mesh: &RenderMesh, expected: &BoundingBox, tolerance: f64) -> OracleVerdict {
    let Some((lo, hi)) = crate::helpers::mesh_bounding_box(mesh) else {
        return OracleVerdict::fail("mesh_envelope", "mesh has no vertices".to_string());
    };
    let actual = BoundingBox::new(lo.map(f64::from), hi.map(f64::from));
    let off: Vec<String> = (0..3)
        .flat_map(|i| {
            [("min", actual.min[i], expected.min[i]), ("max", actual.max[i], expected.max[i])]
                .into_iter()
                .filter(|(_, got, want)| (got - want).abs() > tolerance)
                .map(move |(side, got, want)| format!("{side}[{i}] {got:.3} vs {want:.3}"))
        })
        .collect();
    if off.is_empty() {
        OracleVerdict::pass("mesh_envelope", format!("size {:?}", actual.size()))
    } else {
        OracleVerdict::fail("mesh_envelope", format!("{} (tol={tolerance})", off.join(", ")))
    }
}

// ── Composite ───────────────────────────────────────────────────────────────

/// Run every mesh check. Geometry checks are skipped when indices are out of range.
pub fn run_all_mesh_checks(mesh: &RenderMesh) -> Vec<OracleVerdict> {
    let indices = check_valid_indices(mesh);
    if !indices.passed {
        return vec![indices];
    }
    vec![
        check_watertight_mesh(mesh),
        check_consistent_normals(mesh),
        check_no_degenerate_triangles(mesh),
        indices,
    ]
}

/// Run every plan check for `params`, using `max_taper_depth` as the taper limit.
pub fn run_plan_checks(
    plan: &BuildPlan,
    params: &ConnectorParameters,
    max_taper_depth: f64,
) -> Vec<OracleVerdict> {
    vec![
        check_slot_cross_sections(plan, params),
        check_ribs(plan, params.wall_thickness),
        check_taper_depth(plan, max_taper_depth),
    ]
}
