//! Tessellation wrapper around truck-meshalgo.
//!
//! Produces a flat RenderMesh suitable for STL/DXF writers and bounding boxes.

use truck_meshalgo::prelude::*;
use truck_meshalgo::tessellation::{MeshableShape, MeshedShape};

use crate::types::*;

type TruckSolid = truck_modeling::Solid;

/// Tessellate a truck Solid into a RenderMesh.
///
/// Faces are meshed one at a time so that reversed faces get their
/// triangles flipped and the resulting winding is outward everywhere.
pub fn tessellate_solid(
    solid: &TruckSolid,
    tolerance: f64,
) -> std::result::Result<RenderMesh, KernelError> {
    if !(tolerance.is_finite() && tolerance > 0.0) {
        return Err(KernelError::TessellationFailed {
            reason: format!("tolerance must be positive, got {tolerance}"),
        });
    }

    let meshed_solid = solid.triangulation(tolerance);

    let mut out = RenderMesh::default();

    for shell in meshed_solid.boundaries().iter() {
        for face in shell.face_iter() {
            let maybe_mesh: Option<PolygonMesh> = face.surface();
            let Some(face_mesh) = maybe_mesh else {
                continue;
            };

            let face_mesh = if !face.orientation() {
                let mut m = face_mesh;
                m.invert();
                m
            } else {
                face_mesh
            };

            append_mesh(&mut out, &face_mesh);
        }
    }

    if out.is_empty() {
        return tessellate_solid_merged(solid, tolerance);
    }
    Ok(out)
}

/// Fallback tessellation: merge everything into a single PolygonMesh.
fn tessellate_solid_merged(
    solid: &TruckSolid,
    tolerance: f64,
) -> std::result::Result<RenderMesh, KernelError> {
    let mesh = solid.triangulation(tolerance).to_polygon();
    let mut out = RenderMesh::default();
    append_mesh(&mut out, &mesh);

    if out.is_empty() {
        return Err(KernelError::TessellationFailed {
            reason: "solid produced no triangles".to_string(),
        });
    }
    Ok(out)
}

fn append_mesh(out: &mut RenderMesh, mesh: &PolygonMesh) {
    let base_vertex = (out.vertices.len() / 3) as u32;
    let positions = mesh.positions();
    let normals = mesh.normals();

    for pos in positions {
        out.vertices.push(pos[0] as f32);
        out.vertices.push(pos[1] as f32);
        out.vertices.push(pos[2] as f32);
    }

    if normals.len() == positions.len() {
        for norm in normals {
            out.normals.push(norm[0] as f32);
            out.normals.push(norm[1] as f32);
            out.normals.push(norm[2] as f32);
        }
    } else {
        // Normals are indexed separately from positions in truck; when they
        // don't line up one-to-one, leave them to the writers to recompute.
        out.normals
            .extend(std::iter::repeat(0.0).take(positions.len() * 3));
    }

    for tri in mesh.tri_faces() {
        for v in tri.iter() {
            out.indices.push(v.pos as u32 + base_vertex);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives;

    #[test]
    fn test_tessellate_box_covers_extents() {
        let solid = primitives::make_box([2.0, 4.0, 6.0]);
        let mesh = tessellate_solid(&solid, 0.1).unwrap();

        assert!(mesh.triangle_count() >= 12);
        assert_eq!(mesh.vertices.len(), mesh.normals.len());

        let size = mesh.bounds().unwrap().size();
        assert!((size[0] - 2.0).abs() < 1e-5);
        assert!((size[1] - 4.0).abs() < 1e-5);
        assert!((size[2] - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_non_positive_tolerance_rejected() {
        let solid = primitives::make_box([1.0, 1.0, 1.0]);
        assert!(matches!(
            tessellate_solid(&solid, 0.0),
            Err(KernelError::TessellationFailed { .. })
        ));
    }
}
