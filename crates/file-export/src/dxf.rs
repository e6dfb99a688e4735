//! DXF R12 output: each mesh triangle becomes a `3DFACE` entity.

use std::fmt::Write as _;

use geom_kernel::RenderMesh;

use crate::errors::ExportError;

/// Write a group code / value pair.
fn pair(out: &mut String, code: u16, value: impl std::fmt::Display) {
    // Writing into a String cannot fail.
    let _ = write!(out, "{code}\n{value}\n");
}

fn header(out: &mut String) {
    pair(out, 0, "SECTION");
    pair(out, 2, "HEADER");
    pair(out, 9, "$ACADVER");
    pair(out, 1, "AC1009");
    pair(out, 9, "$INSUNITS");
    pair(out, 70, 4); // millimetres
    pair(out, 0, "ENDSEC");

    pair(out, 0, "SECTION");
    pair(out, 2, "TABLES");
    pair(out, 0, "ENDSEC");
}

fn face(out: &mut String, layer: &str, tri: [[f32; 3]; 3]) {
    pair(out, 0, "3DFACE");
    pair(out, 8, layer);
    // R12 faces always carry four corners; a triangle repeats the last one.
    let corners = [tri[0], tri[1], tri[2], tri[2]];
    for (k, [x, y, z]) in corners.into_iter().enumerate() {
        let k = k as u16;
        pair(out, 10 + k, format_args!("{x:.6}"));
        pair(out, 20 + k, format_args!("{y:.6}"));
        pair(out, 30 + k, format_args!("{z:.6}"));
    }
}

/// Encode a mesh as an R12 DXF document on the given layer.
pub fn write_dxf(mesh: &RenderMesh, layer: &str) -> Result<String, ExportError> {
    if mesh.is_empty() {
        return Err(ExportError::EmptyMesh);
    }
    let mut out = String::with_capacity(mesh.triangle_count() * 200 + 256);
    header(&mut out);

    pair(&mut out, 0, "SECTION");
    pair(&mut out, 2, "ENTITIES");
    for i in 0..mesh.triangle_count() {
        face(&mut out, layer, mesh.triangle(i));
    }
    pair(&mut out, 0, "ENDSEC");
    pair(&mut out, 0, "EOF");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_face_per_triangle() {
        let mesh = RenderMesh {
            vertices: vec![0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 3.0, 1.5],
            normals: vec![],
            indices: vec![0, 1, 2, 2, 1, 0],
        };
        let dxf = write_dxf(&mesh, "connector").unwrap();
        assert!(dxf.contains("AC1009"));
        assert_eq!(dxf.matches("3DFACE").count(), 2);
        assert!(dxf.contains("33\n1.500000\n"));
        assert!(dxf.ends_with("0\nEOF\n"));
    }

    #[test]
    fn test_empty_mesh_is_rejected() {
        assert!(matches!(
            write_dxf(&RenderMesh::default(), "x"),
            Err(ExportError::EmptyMesh)
        ));
    }
}
