//! Helper functions: error type, parameter fixtures, mesh math.

use std::collections::HashMap;

use connector_types::ConnectorParameters;
use geom_kernel::RenderMesh;

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("connector not found: {name}")]
    ConnectorNotFound { name: String },

    #[error("duplicate name: {name}")]
    DuplicateName { name: String },

    #[error("build failed: {0}")]
    Build(#[from] shape_builder::BuildError),

    #[error("kernel error: {0}")]
    Kernel(#[from] geom_kernel::KernelError),

    #[error("export failed: {0}")]
    Export(#[from] file_export::ExportError),

    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("STL error: {reason}")]
    StlError { reason: String },
}

// ── Parameter Fixtures ──────────────────────────────────────────────────────

/// 20 × 10 board inserted 30 deep, default wall and tolerance, no features.
pub fn reference_board() -> ConnectorParameters {
    ConnectorParameters::new(20.0, 10.0, 30.0)
}

/// [`reference_board`] with taper, ribs and screw holes.
pub fn reference_board_all_features() -> ConnectorParameters {
    reference_board().with_all_features()
}

/// A spread of board shapes: thin, square, deep and shallow.
pub fn board_variants() -> Vec<(&'static str, ConnectorParameters)> {
    vec![
        ("reference", reference_board()),
        ("thin plywood", ConnectorParameters::new(40.0, 3.0, 15.0)),
        ("square dowel", ConnectorParameters::new(12.0, 12.0, 12.0)),
        ("deep shelf", ConnectorParameters::new(18.0, 18.0, 60.0).with_wall_thickness(4.0)),
        (
            "tight fit",
            ConnectorParameters::new(25.0, 5.0, 22.0)
                .with_tolerance(0.0)
                .with_wall_thickness(1.2),
        ),
    ]
}

// ── Mesh Math Utilities ─────────────────────────────────────────────────────

/// Axis-aligned bounding box of a RenderMesh as (min, max), or `None` when empty.
pub fn mesh_bounding_box(mesh: &RenderMesh) -> Option<([f32; 3], [f32; 3])> {
    if mesh.vertices.len() < 3 {
        return None;
    }
    let mut min = [f32::MAX; 3];
    let mut max = [f32::MIN; 3];
    for chunk in mesh.vertices.chunks(3) {
        for i in 0..3 {
            min[i] = min[i].min(chunk[i]);
            max[i] = max[i].max(chunk[i]);
        }
    }
    Some((min, max))
}

/// Enclosed volume of a triangle mesh by the divergence theorem.
///
/// Meaningful only for closed meshes.
pub fn mesh_volume(mesh: &RenderMesh) -> f64 {
    let mut volume = 0.0f64;
    for i in 0..mesh.triangle_count() {
        let [a, b, c] = mesh.triangle(i).map(|v| v.map(f64::from));
        volume += a[0] * (b[1] * c[2] - c[1] * b[2]) + b[0] * (c[1] * a[2] - a[1] * c[2])
            + c[0] * (a[1] * b[2] - b[1] * a[2]);
    }
    (volume / 6.0).abs()
}

/// Total surface area of a triangle mesh.
pub fn mesh_surface_area(mesh: &RenderMesh) -> f64 {
    (0..mesh.triangle_count())
        .map(|i| {
            let [a, b, c] = mesh.triangle(i).map(|v| v.map(f64::from));
            let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
            let v = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
            let n = [
                u[1] * v[2] - u[2] * v[1],
                u[2] * v[0] - u[0] * v[2],
                u[0] * v[1] - u[1] * v[0],
            ];
            (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt() / 2.0
        })
        .sum()
}

/// Count mesh edges by vertex index: returns (total_edges, boundary_edges).
///
/// A boundary edge belongs to exactly one triangle.
pub fn count_mesh_edges(mesh: &RenderMesh) -> (usize, usize) {
    let mut edge_counts: HashMap<(u32, u32), usize> = HashMap::new();
    for tri in mesh.indices.chunks(3) {
        if tri.len() < 3 {
            continue;
        }
        for &(a, b) in &[(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            *edge_counts.entry((a.min(b), a.max(b))).or_insert(0) += 1;
        }
    }
    let boundary = edge_counts.values().filter(|&&c| c == 1).count();
    (edge_counts.len(), boundary)
}

#[cfg(test)]
pub(crate) fn unit_cube() -> RenderMesh {
    RenderMesh {
        vertices: vec![
            0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0,
            1.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0,
        ],
        normals: vec![0.0; 24],
        indices: vec![
            0, 2, 1, 0, 3, 2, // bottom
            4, 5, 6, 4, 6, 7, // top
            0, 1, 5, 0, 5, 4, // front
            2, 3, 7, 2, 7, 6, // back
            0, 4, 7, 0, 7, 3, // left
            1, 2, 6, 1, 6, 5, // right
        ],
    }
}
