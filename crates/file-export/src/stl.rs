//! STL writers for tessellated connectors, binary and ASCII.

use std::fmt::Write as _;

use geom_kernel::{KernelError, RenderMesh};

use crate::errors::ExportError;

/// Size of one binary STL facet record in bytes.
const FACET_BYTES: usize = 50;

/// Reject empty meshes and indices that point past the vertex buffer.
fn check_mesh(mesh: &RenderMesh) -> Result<usize, ExportError> {
    let tri_count = mesh.triangle_count();
    if tri_count == 0 {
        return Err(ExportError::EmptyMesh);
    }
    let vertex_count = mesh.vertices.len() / 3;
    if let Some(&bad) = mesh.indices.iter().find(|&&i| i as usize >= vertex_count) {
        return Err(KernelError::TessellationFailed {
            reason: format!("index {bad} out of range (vertex count = {vertex_count})"),
        }
        .into());
    }
    Ok(tri_count)
}

/// Unit facet normal from the winding of `tri`, +Z for degenerate facets.
pub fn facet_normal(tri: &[[f32; 3]; 3]) -> [f32; 3] {
    let a = [
        tri[1][0] - tri[0][0],
        tri[1][1] - tri[0][1],
        tri[1][2] - tri[0][2],
    ];
    let b = [
        tri[2][0] - tri[0][0],
        tri[2][1] - tri[0][1],
        tri[2][2] - tri[0][2],
    ];
    let n = [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ];
    let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
    if len > 1e-12 {
        [n[0] / len, n[1] / len, n[2] / len]
    } else {
        [0.0, 0.0, 1.0]
    }
}

/// Encode a mesh as binary STL.
///
/// Layout: 80-byte header, little-endian u32 triangle count, then per
/// triangle a normal, three vertices (all f32 triples) and a u16 attribute.
pub fn write_binary_stl(mesh: &RenderMesh, name: &str) -> Result<Vec<u8>, ExportError> {
    let tri_count = check_mesh(mesh)?;
    let mut buf = Vec::with_capacity(84 + tri_count * FACET_BYTES);

    let header = format!("binary STL: {name}");
    let header_bytes = header.as_bytes();
    buf.extend_from_slice(&header_bytes[..header_bytes.len().min(80)]);
    buf.resize(80, 0u8);
    buf.extend_from_slice(&(tri_count as u32).to_le_bytes());

    for i in 0..tri_count {
        let tri = mesh.triangle(i);
        for value in facet_normal(&tri).iter().chain(tri.iter().flatten()) {
            buf.extend_from_slice(&value.to_le_bytes());
        }
        buf.extend_from_slice(&0u16.to_le_bytes());
    }

    Ok(buf)
}

/// Encode a mesh as ASCII STL.
pub fn write_ascii_stl(mesh: &RenderMesh, name: &str) -> Result<String, ExportError> {
    let tri_count = check_mesh(mesh)?;
    let mut out = String::with_capacity(tri_count * 300);
    // Writing into a String cannot fail.
    let _ = writeln!(out, "solid {name}");
    for i in 0..tri_count {
        let tri = mesh.triangle(i);
        let [nx, ny, nz] = facet_normal(&tri);
        let _ = writeln!(out, "  facet normal {nx} {ny} {nz}");
        out.push_str("    outer loop\n");
        for [x, y, z] in tri {
            let _ = writeln!(out, "      vertex {x} {y} {z}");
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    }
    let _ = writeln!(out, "endsolid {name}");
    Ok(out)
}
