//! Scenario tests on the MockKernel: dimensions, features and failure paths
//! across every topology.

use approx::assert_relative_eq;
use connector_types::{Stage, Topology};
use file_export::ExportFormat;
use geom_kernel::{FaceSelector, MockKernel, MockOp};
use shape_builder::BuildConfig;
use test_harness::assertions::{assert_all_pass, assert_size, assert_watertight};
use test_harness::helpers::{board_variants, reference_board, reference_board_all_features};
use test_harness::oracle::check_holes_on_surface;
use test_harness::{stl, ConnectorBench, HarnessError};

#[test]
fn test_reference_end_to_end() {
    let mut bench = ConnectorBench::mock();
    bench
        .build("e2e", Topology::EndToEnd, &reference_board_all_features())
        .unwrap();

    let bb = bench.bounding_box("e2e").unwrap();
    assert_size(&bb, [66.0, 26.0, 16.0], 1e-9, "e2e").unwrap();

    let solid = bench.solid("e2e").unwrap();
    let holes = bench.kernel().holes(&solid);
    assert_eq!(holes.len(), 4);
    assert_eq!(holes.iter().filter(|h| h.face == FaceSelector::top()).count(), 2);
    assert_eq!(holes.iter().filter(|h| h.face == FaceSelector::bottom()).count(), 2);
    bench.assert_verified("e2e", 1e-9).unwrap();
}

#[test]
fn test_every_topology_passes_plan_oracles() {
    for (variant, params) in board_variants() {
        let params = params.with_all_features();
        let mut bench = ConnectorBench::mock();
        bench.build_all(&params).unwrap();
        for entry in bench.entries() {
            let ctx = format!("{variant} / {}", entry.name);
            bench.assert_verified(&entry.name, 1e-9).unwrap_or_else(|e| panic!("{e}"));

            let bb = bench.bounding_box(&entry.name).unwrap();
            let holes = bench.kernel().holes(&entry.solid);
            assert_all_pass(
                &[check_holes_on_surface(&holes, &bb, params.wall_thickness)],
                &ctx,
            )
            .unwrap();
        }
    }
}

#[test]
fn test_angle_connector_footprint() {
    let mut bench = ConnectorBench::mock();
    bench.build("l", Topology::Angle, &reference_board()).unwrap();
    let size = bench.bounding_box("l").unwrap().size();
    // Arms of depth + corner (16) in the plane, board width + walls across.
    assert_relative_eq!(size[0], 46.0, epsilon = 1e-9);
    assert_relative_eq!(size[1], 46.0, epsilon = 1e-9);
    assert_relative_eq!(size[2], 26.0, epsilon = 1e-9);
}

#[test]
fn test_segment_hole_thresholds() {
    let config = BuildConfig::default();
    let mut bench = ConnectorBench::mock();
    let shallow = reference_board().with_screw_holes(true);
    let mut deep = shallow.clone();
    deep.board_depth = 80.0;
    bench.build("shallow", Topology::TJunctionSegment, &shallow).unwrap();
    bench.build("deep", Topology::TJunctionSegment, &deep).unwrap();

    let run = |name: &str| {
        shape_builder::DerivedDimensions::derive(&bench.entry(name).unwrap().params, Topology::TJunctionSegment)
            .run_length
    };
    assert!(run("shallow") > config.hole_depth_threshold);
    assert!(run("shallow") <= config.inner_hole_depth_threshold);
    assert_eq!(bench.plan("shallow").unwrap().holes().count(), 2);
    assert_eq!(bench.plan("deep").unwrap().holes().count(), 4);
}

#[test]
fn test_exports_read_back_as_closed_meshes() {
    let mut bench = ConnectorBench::mock();
    bench.build_all(&reference_board_all_features()).unwrap();
    for topology in Topology::ALL {
        let name = topology.name();
        let bytes = bench.export_stl(name).unwrap();
        let mesh = stl::read_binary_stl(&bytes).unwrap();
        assert_watertight(&mesh, name).unwrap();

        let step = bench.export(name, ExportFormat::Step).unwrap();
        assert!(String::from_utf8(step).unwrap().starts_with("ISO-10303-21;"));
    }
    assert_eq!(bench.kernel().count(MockOp::Tessellate), 8);
}

#[test]
fn test_duplicate_name_is_rejected() {
    let mut bench = ConnectorBench::mock();
    bench.build("c", Topology::Cross, &reference_board()).unwrap();
    let err = bench.build("c", Topology::Cross, &reference_board()).err().unwrap();
    assert!(matches!(err, HarnessError::DuplicateName { .. }));
}

#[test]
fn test_build_failure_is_recorded() {
    let mut bench = ConnectorBench::new(MockKernel::failing_on(MockOp::Union));
    let err = bench
        .build("ribbed", Topology::EndToEnd, &reference_board().with_ribs(true))
        .err()
        .unwrap();
    match err {
        HarnessError::Build(e) => assert_eq!(e.stage(), Some(Stage::Rib)),
        other => panic!("expected build error, got {other:?}"),
    }
    assert_eq!(bench.errors().len(), 1);
    assert!(bench.entry("ribbed").is_err());
}

#[test]
fn test_invalid_parameters_never_reach_kernel() {
    let mut bench = ConnectorBench::mock();
    let mut params = reference_board();
    params.board_thickness = -2.0;
    assert!(bench.build("bad", Topology::CornerSegment, &params).is_err());
    assert!(bench.kernel().calls().is_empty());
}

#[test]
fn test_bench_keeps_only_finished_solids() {
    let mut bench = ConnectorBench::mock();
    bench.build_all(&reference_board_all_features()).unwrap();
    assert_eq!(bench.kernel().solid_count(), Topology::ALL.len());
    for entry in bench.entries() {
        assert!(bench.bounding_box(&entry.name).is_ok(), "{}", entry.name);
    }
}
