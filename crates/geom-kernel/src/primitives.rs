//! Higher-level primitive builders on top of truck's sweep API.
//!
//! truck has no built-in box/wedge/loft. Everything is a planar face swept
//! along a vector, or a homotopy between two wires closed by planar caps.
//! All primitives come out centred on the origin.

use std::f64::consts::PI;

use truck_modeling::builder;
use truck_modeling::topology::{Edge, Face, Shell, Solid, Vertex, Wire};
use truck_modeling::{Point3, Rad, Vector3};

use crate::types::{KernelError, Section};

/// Create a box solid via successive translational sweeps, centred on the origin.
pub fn make_box(size: [f64; 3]) -> Solid {
    let [w, h, d] = size;
    let v = builder::vertex(Point3::new(-w / 2.0, -h / 2.0, -d / 2.0));
    let edge = builder::tsweep(&v, Vector3::new(w, 0.0, 0.0));
    let face = builder::tsweep(&edge, Vector3::new(0.0, h, 0.0));
    builder::tsweep(&face, Vector3::new(0.0, 0.0, d))
}

/// Trapezoidal prism: XY trapezoid swept along +Z.
pub fn make_wedge(
    depth: f64,
    base_width: f64,
    tip_width: f64,
    height: f64,
) -> Result<Solid, KernelError> {
    let z = -height / 2.0;
    let points = [
        Point3::new(-depth / 2.0, -base_width / 2.0, z),
        Point3::new(depth / 2.0, -tip_width / 2.0, z),
        Point3::new(depth / 2.0, tip_width / 2.0, z),
        Point3::new(-depth / 2.0, base_width / 2.0, z),
    ];
    let wire = polygon_wire(&points);
    let face = builder::try_attach_plane(&[wire]).map_err(|e| KernelError::ConstructionFailed {
        reason: format!("wedge profile: {e}"),
    })?;
    Ok(builder::tsweep(&face, Vector3::new(0.0, 0.0, height)))
}

/// Cylinder along Z: circle wire → face → translational sweep, centred on the origin.
pub fn make_cylinder(radius: f64, height: f64) -> Result<Solid, KernelError> {
    let wire = circle_wire(
        Point3::new(0.0, 0.0, -height / 2.0),
        radius,
        Vector3::unit_z(),
        Vector3::unit_x(),
    );
    let face = builder::try_attach_plane(&[wire]).map_err(|e| KernelError::ConstructionFailed {
        reason: format!("cylinder profile: {e}"),
    })?;
    Ok(builder::tsweep(&face, Vector3::new(0.0, 0.0, height)))
}

/// Loft along X between two sections of the same kind.
///
/// The side faces are a ruled homotopy between the two section wires; the
/// ends are capped with planar faces.
pub fn make_loft(length: f64, start: Section, end: Section) -> Result<Solid, KernelError> {
    if !start.same_kind(&end) {
        return Err(KernelError::ConstructionFailed {
            reason: "loft sections must both be rectangles or both circles".to_string(),
        });
    }

    let start_wire = section_wire(-length / 2.0, &start);
    let end_wire = section_wire(length / 2.0, &end);

    let mut shell: Shell = builder::try_wire_homotopy(&start_wire, &end_wire).map_err(|e| {
        KernelError::ConstructionFailed {
            reason: format!("loft sides: {e}"),
        }
    })?;
    let (start_cap, end_cap) = caps(&start_wire, &end_wire)?;
    shell.push(start_cap.clone());
    shell.push(end_cap.clone());

    match Solid::try_new(vec![shell]) {
        Ok(solid) => Ok(solid),
        Err(_) => {
            // Cap orientation depends on how truck winds the homotopy; retry flipped.
            let mut shell: Shell =
                builder::try_wire_homotopy(&start_wire, &end_wire).map_err(|e| {
                    KernelError::ConstructionFailed {
                        reason: format!("loft sides: {e}"),
                    }
                })?;
            shell.push(start_cap.inverse());
            shell.push(end_cap.inverse());
            Solid::try_new(vec![shell]).map_err(|e| KernelError::ConstructionFailed {
                reason: format!("loft shell is not a closed solid: {e}"),
            })
        }
    }
}

fn caps(start_wire: &Wire, end_wire: &Wire) -> Result<(Face, Face), KernelError> {
    let start_cap = builder::try_attach_plane(&[start_wire.inverse()]).map_err(|e| {
        KernelError::ConstructionFailed {
            reason: format!("loft start cap: {e}"),
        }
    })?;
    let end_cap = builder::try_attach_plane(&[end_wire.clone()]).map_err(|e| {
        KernelError::ConstructionFailed {
            reason: format!("loft end cap: {e}"),
        }
    })?;
    Ok((start_cap, end_cap))
}

/// Closed section wire lying in the plane `x = x`.
fn section_wire(x: f64, section: &Section) -> Wire {
    match *section {
        Section::Rect { width, height } => {
            let (hw, hh) = (width / 2.0, height / 2.0);
            polygon_wire(&[
                Point3::new(x, -hw, -hh),
                Point3::new(x, hw, -hh),
                Point3::new(x, hw, hh),
                Point3::new(x, -hw, hh),
            ])
        }
        Section::Circle { radius } => circle_wire(
            Point3::new(x, 0.0, 0.0),
            radius,
            Vector3::unit_x(),
            Vector3::unit_y(),
        ),
    }
}

/// Closed polyline wire with shared vertices between consecutive edges.
fn polygon_wire(points: &[Point3]) -> Wire {
    let vertices: Vec<Vertex> = points.iter().map(|&p| builder::vertex(p)).collect();
    let n = vertices.len();
    let edges: Vec<Edge> = (0..n)
        .map(|i| builder::line(&vertices[i], &vertices[(i + 1) % n]))
        .collect();
    Wire::from_iter(edges)
}

/// Full circle about `axis` through `center`, starting in the `radial` direction.
fn circle_wire(center: Point3, radius: f64, axis: Vector3, radial: Vector3) -> Wire {
    let v = builder::vertex(center + radial * radius);
    builder::rsweep(&v, center, axis, Rad(2.0 * PI))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extents(solid: &Solid) -> ([f64; 3], [f64; 3]) {
        let mut min = [f64::MAX; 3];
        let mut max = [f64::MIN; 3];
        for shell in solid.boundaries() {
            for v in shell.vertex_iter() {
                let p = v.point();
                for i in 0..3 {
                    min[i] = min[i].min(p[i]);
                    max[i] = max[i].max(p[i]);
                }
            }
        }
        (min, max)
    }

    #[test]
    fn test_make_box_topology() {
        let solid = make_box([1.0, 2.0, 3.0]);

        let boundaries = solid.boundaries();
        assert_eq!(boundaries.len(), 1, "Box should have 1 shell");

        let shell = &boundaries[0];
        let faces: Vec<_> = shell.face_iter().collect();

        let mut edge_ids = std::collections::HashSet::new();
        for edge in shell.edge_iter() {
            edge_ids.insert(edge.id());
        }
        let mut vert_ids = std::collections::HashSet::new();
        for v in shell.vertex_iter() {
            vert_ids.insert(v.id());
        }

        assert_eq!(faces.len(), 6, "Box should have 6 faces");
        assert_eq!(edge_ids.len(), 12, "Box should have 12 edges");
        assert_eq!(vert_ids.len(), 8, "Box should have 8 vertices");
    }

    #[test]
    fn test_make_box_is_centred() {
        let (min, max) = extents(&make_box([2.0, 3.0, 4.0]));
        let eps = 1e-10;
        assert!((min[0] + 1.0).abs() < eps && (max[0] - 1.0).abs() < eps);
        assert!((min[1] + 1.5).abs() < eps && (max[1] - 1.5).abs() < eps);
        assert!((min[2] + 2.0).abs() < eps && (max[2] - 2.0).abs() < eps);
    }

    #[test]
    fn test_make_wedge_widens_towards_tip() {
        let solid = make_wedge(2.0, 4.0, 6.0, 1.0).unwrap();
        let (min, max) = extents(&solid);
        let eps = 1e-10;
        assert!((max[0] - min[0] - 2.0).abs() < eps);
        assert!((max[1] - min[1] - 6.0).abs() < eps);
        assert!((max[2] - min[2] - 1.0).abs() < eps);
        assert_eq!(solid.boundaries()[0].face_iter().count(), 6);
    }

    #[test]
    fn test_make_cylinder_has_caps_and_side() {
        let solid = make_cylinder(1.0, 2.0).unwrap();
        let faces = solid.boundaries()[0].face_iter().count();
        assert!(faces >= 3, "Cylinder should have at least 3 faces");
    }

    #[test]
    fn test_make_rect_loft_closes() {
        let solid = make_loft(
            2.0,
            Section::Rect {
                width: 6.0,
                height: 4.0,
            },
            Section::Rect {
                width: 6.0,
                height: 2.0,
            },
        )
        .unwrap();
        assert_eq!(solid.boundaries()[0].face_iter().count(), 6);
    }

    #[test]
    fn test_make_loft_rejects_mixed_sections() {
        let err = make_loft(
            1.0,
            Section::Rect {
                width: 1.0,
                height: 1.0,
            },
            Section::Circle { radius: 1.0 },
        )
        .unwrap_err();
        assert!(matches!(err, KernelError::ConstructionFailed { .. }));
    }
}
