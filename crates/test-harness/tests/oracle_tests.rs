use connector_types::{Stage, Topology};
use geom_kernel::{BoundingBox, FaceSelector, MockHole, RenderMesh};
use shape_builder::{plan, PlannedStep, ShapeSpec};
use test_harness::helpers::{reference_board, reference_board_all_features};
use test_harness::oracle::*;

// ── Plan oracles ────────────────────────────────────────────────────────────

#[test]
fn test_plan_checks_pass_for_reference_connectors() {
    let params = reference_board_all_features();
    for topology in Topology::ALL {
        let p = plan(&params, topology).unwrap();
        for verdict in run_plan_checks(&p, &params, 2.0) {
            assert!(verdict.passed, "{topology} {}: {}", verdict.oracle_name, verdict.detail);
        }
    }
}

#[test]
fn test_wrong_slot_is_caught() {
    let params = reference_board();
    let p = plan(&params, Topology::EndToEnd)
        .unwrap()
        .then(PlannedStep::subtract(
            Stage::SlotCut,
            "undersized",
            ShapeSpec::cuboid([10.0, 20.0, 10.0]),
        ));
    let verdict = check_slot_cross_sections(&p, &params);
    assert!(!verdict.passed);
    assert!(verdict.detail.contains("undersized"));
}

#[test]
fn test_thick_rib_is_caught() {
    let params = reference_board();
    let p = plan(&params, Topology::EndToEnd).unwrap().then(PlannedStep::union(
        Stage::Rib,
        "slab",
        ShapeSpec::cuboid([5.0, 26.0, 16.0]),
    ));
    assert!(!check_ribs(&p, params.wall_thickness).passed);
}

#[test]
fn test_deep_taper_is_caught() {
    let params = reference_board().with_taper(true);
    let p = plan(&params, Topology::EndToEnd).unwrap();
    assert!(check_taper_depth(&p, 2.0).passed);
    assert!(!check_taper_depth(&p, 1.0).passed);
}

#[test]
fn test_envelope_mismatch_names_axis() {
    let p = plan(&reference_board(), Topology::EndToEnd).unwrap();
    let wrong = BoundingBox::centered([66.0, 26.0, 17.0]);
    let verdict = check_envelope(&p, &wrong, 1e-9);
    assert!(!verdict.passed);
    assert!(verdict.detail.starts_with("axis 2"));
    assert!(check_envelope(&p, &BoundingBox::centered([66.0, 26.0, 16.0]), 1e-9).passed);
}

#[test]
fn test_floating_hole_is_caught() {
    let body = BoundingBox::centered([10.0, 10.0, 10.0]);
    let on_top = MockHole {
        face: FaceSelector::top(),
        center: [0.0, 0.0, 5.0],
        diameter: 5.0,
        depth: 3.0,
    };
    let floating = MockHole {
        center: [0.0, 0.0, 4.0],
        ..on_top.clone()
    };
    assert!(check_holes_on_surface(&[on_top.clone()], &body, 3.0).passed);
    assert!(!check_holes_on_surface(&[on_top, floating], &body, 3.0).passed);
}

// ── Mesh oracles ────────────────────────────────────────────────────────────

fn open_triangle() -> RenderMesh {
    RenderMesh {
        vertices: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        normals: vec![0.0, 0.0, -1.0, 0.0, 0.0, -1.0, 0.0, 0.0, -1.0],
        indices: vec![0, 1, 2],
    }
}

#[test]
fn test_open_mesh_is_not_watertight() {
    assert!(!check_watertight_mesh(&open_triangle()).passed);
}

#[test]
fn test_reversed_normals_are_caught() {
    let verdict = check_consistent_normals(&open_triangle());
    assert!(!verdict.passed);
    assert!(verdict.detail.starts_with("1 of 1"));
}

#[test]
fn test_degenerate_triangle_is_caught() {
    let mut mesh = open_triangle();
    mesh.vertices[6..9].copy_from_slice(&[2.0, 0.0, 0.0]);
    assert!(!check_no_degenerate_triangles(&mesh).passed);
}

#[test]
fn test_bad_indices_short_circuit_mesh_checks() {
    let mut mesh = open_triangle();
    mesh.indices[1] = 9;
    let verdicts = run_all_mesh_checks(&mesh);
    assert_eq!(verdicts.len(), 1);
    assert_eq!(verdicts[0].oracle_name, "valid_indices");
    assert!(!verdicts[0].passed);
}
