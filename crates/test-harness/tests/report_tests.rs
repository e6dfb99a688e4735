use connector_types::Topology;
use geom_kernel::{MockKernel, MockOp};
use test_harness::helpers::{reference_board, reference_board_all_features};
use test_harness::{ConnectorBench, ConnectorReport};

#[test]
fn test_report_lists_connectors_and_stages() {
    let mut bench = ConnectorBench::mock();
    bench
        .build("shelf", Topology::TConn, &reference_board_all_features())
        .unwrap();
    let report = ConnectorReport::generate(&bench, 1e-9);

    assert!(report.all_passed());
    let text = report.to_text();
    assert!(text.contains("Connectors (1 built, 0 errors)"));
    assert!(text.contains("\"shelf\" [t_conn]"));
    assert!(text.contains("slot-cut subtract \"stem slot\""));
    assert!(text.contains("hole=3"));
    assert!(text.contains("Size: 66.00 x "));
    assert!(text.contains("[PASS] slot_cross_sections"));
    assert!(text.ends_with("Errors: none\n"));
}

#[test]
fn test_report_without_features_omits_feature_stages() {
    let mut bench = ConnectorBench::mock();
    bench.build("plain", Topology::Cross, &reference_board()).unwrap();
    let report = ConnectorReport::generate(&bench, 1e-9);
    let entry = &report.entries[0];
    let stages: Vec<String> = entry.stage_counts.iter().map(|(s, _)| s.to_string()).collect();
    assert_eq!(stages, ["construction", "slot-cut"]);
}

#[test]
fn test_report_includes_errors() {
    let mut bench = ConnectorBench::new(MockKernel::failing_on(MockOp::Subtract));
    let _ = bench.build("broken", Topology::Angle, &reference_board());
    let report = ConnectorReport::generate(&bench, 1e-9);
    assert!(!report.all_passed());
    assert!(report.entries.is_empty());
    let text = report.to_string();
    assert!(text.contains("Errors (1):"));
    assert!(text.contains("\"broken\": "));
}
