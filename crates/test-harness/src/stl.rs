//! STL readers, used to check exported files against the mesh they came from.
//!
//! Vertices are not welded: every facet contributes three fresh vertices, so
//! oracles that match edges by position still apply.

use geom_kernel::RenderMesh;

use crate::helpers::HarnessError;

fn stl_error(reason: impl Into<String>) -> HarnessError {
    HarnessError::StlError {
        reason: reason.into(),
    }
}

fn push_facet(mesh: &mut RenderMesh, normal: [f32; 3], corners: [[f32; 3]; 3]) {
    for corner in corners {
        let index = (mesh.vertices.len() / 3) as u32;
        mesh.vertices.extend_from_slice(&corner);
        mesh.normals.extend_from_slice(&normal);
        mesh.indices.push(index);
    }
}

fn read_f32(bytes: &[u8], at: usize) -> f32 {
    f32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// Parse a binary STL file.
pub fn read_binary_stl(bytes: &[u8]) -> Result<RenderMesh, HarnessError> {
    if bytes.len() < 84 {
        return Err(stl_error(format!("{} bytes is shorter than the header", bytes.len())));
    }
    let count = u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]) as usize;
    let expected = 84 + count * 50;
    if bytes.len() != expected {
        return Err(stl_error(format!(
            "{count} facets need {expected} bytes, file has {}",
            bytes.len()
        )));
    }

    let mut mesh = RenderMesh::default();
    for facet in 0..count {
        let base = 84 + facet * 50;
        let vec3 = |k: usize| {
            let at = base + k * 12;
            [read_f32(bytes, at), read_f32(bytes, at + 4), read_f32(bytes, at + 8)]
        };
        push_facet(&mut mesh, vec3(0), [vec3(1), vec3(2), vec3(3)]);
    }
    Ok(mesh)
}

fn parse_triple<'a>(mut words: impl Iterator<Item = &'a str>) -> Result<[f32; 3], HarnessError> {
    let mut out = [0.0f32; 3];
    for value in &mut out {
        let word = words.next().ok_or_else(|| stl_error("missing coordinate"))?;
        *value = word
            .parse()
            .map_err(|_| stl_error(format!("bad number {word:?}")))?;
    }
    Ok(out)
}

/// Parse an ASCII STL document.
pub fn read_ascii_stl(text: &str) -> Result<RenderMesh, HarnessError> {
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
    match lines.next() {
        Some(first) if first.starts_with("solid") => {}
        _ => return Err(stl_error("missing 'solid' header")),
    }

    let mut mesh = RenderMesh::default();
    let mut normal = [0.0f32; 3];
    let mut corners: Vec<[f32; 3]> = Vec::with_capacity(3);
    for line in lines {
        let mut words = line.split_whitespace();
        match words.next() {
            Some("facet") => {
                if words.next() != Some("normal") {
                    return Err(stl_error(format!("malformed facet line {line:?}")));
                }
                normal = parse_triple(words)?;
                corners.clear();
            }
            Some("vertex") => corners.push(parse_triple(words)?),
            Some("endfacet") => {
                let [a, b, c] = corners[..] else {
                    return Err(stl_error(format!("facet with {} vertices", corners.len())));
                };
                push_facet(&mut mesh, normal, [a, b, c]);
            }
            Some("endsolid") => return Ok(mesh),
            _ => {}
        }
    }
    Err(stl_error("missing 'endsolid'"))
}
