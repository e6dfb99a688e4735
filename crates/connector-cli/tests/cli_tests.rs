use clap::Parser;
use connector_cli::{generate, resolve_config, resolve_parameters, resolve_topologies, Cli};
use connector_types::{ConnectorParameters, Topology};
use geom_kernel::MockKernel;

fn cli(args: &[&str]) -> Cli {
    let mut full = vec!["connector-gen"];
    full.extend_from_slice(args);
    Cli::try_parse_from(full).unwrap()
}

#[test]
fn flags_become_parameters() {
    let c = cli(&[
        "-t", "angle", "--width", "20", "--thickness", "10", "--depth", "30", "--wall", "4",
        "--ribs",
    ]);
    let params = resolve_parameters(&c).unwrap();
    assert_eq!(params.board_width, 20.0);
    assert_eq!(params.wall_thickness, 4.0);
    assert!(params.add_ribs);
    assert!(!params.add_taper);
    assert_eq!(resolve_topologies(&c).unwrap(), vec![Topology::Angle]);
}

#[test]
fn missing_dimensions_are_an_error() {
    let c = cli(&["-t", "cross", "--width", "20"]);
    assert!(resolve_parameters(&c).is_err());
}

#[test]
fn topology_and_all_conflict() {
    assert!(Cli::try_parse_from(["connector-gen", "-t", "cross", "--all"]).is_err());
}

#[test]
fn unknown_topology_is_an_error() {
    let c = cli(&["-t", "hexagon"]);
    assert!(resolve_topologies(&c).is_err());
}

#[test]
fn params_file_replaces_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("params.json");
    let params = ConnectorParameters::new(18.0, 6.0, 25.0).with_screw_holes(true);
    std::fs::write(&path, serde_json::to_string(&params).unwrap()).unwrap();

    let c = cli(&["-t", "t_conn", "--params", path.to_str().unwrap()]);
    assert_eq!(resolve_parameters(&c).unwrap(), params);
}

#[test]
fn all_topologies_are_written_with_manifests() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let plan = dir.path().join("plans.json");
    let c = cli(&[
        "--all",
        "--width", "20",
        "--thickness", "10",
        "--depth", "30",
        "--taper", "--ribs", "--screw-holes",
        "--format", "STL",
        "--name", "shelf",
        "--manifest",
        "--output-dir", out.to_str().unwrap(),
        "--plan", plan.to_str().unwrap(),
    ]);

    let paths = generate(&c, MockKernel::new).unwrap();
    assert_eq!(paths.len(), Topology::ALL.len());
    for (path, topology) in paths.iter().zip(Topology::ALL) {
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            format!("shelf_{}.stl", topology.name())
        );
        assert!(std::fs::metadata(path).unwrap().len() > 0);
        let mut manifest = path.clone().into_os_string();
        manifest.push(".json");
        assert!(std::path::Path::new(&manifest).exists());
    }
    let plans: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(plan).unwrap()).unwrap();
    assert_eq!(plans.as_array().unwrap().len(), 8);
}

#[test]
fn bad_format_builds_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let c = cli(&[
        "-t", "cross",
        "--width", "20",
        "--thickness", "10",
        "--depth", "30",
        "--format", "XYZ",
        "--output-dir", dir.path().to_str().unwrap(),
    ]);
    assert!(generate(&c, MockKernel::new).is_err());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn invalid_parameters_fail_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let c = cli(&[
        "-t", "end_to_end",
        "--width", "0",
        "--thickness", "10",
        "--depth", "30",
        "--output-dir", dir.path().to_str().unwrap(),
    ]);
    let err = generate(&c, MockKernel::new).unwrap_err();
    assert!(err.to_string().contains("failed"));
}

#[test]
fn zero_rib_spacing_config_is_rejected_before_building() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");
    std::fs::write(&config, r#"{ "rib_spacing": 0.0 }"#).unwrap();
    let out = dir.path().join("out");
    let c = cli(&[
        "-t", "t_junction_segment",
        "--width", "20",
        "--thickness", "10",
        "--depth", "30",
        "--ribs",
        "--config", config.to_str().unwrap(),
        "--output-dir", out.to_str().unwrap(),
    ]);

    let err = resolve_config(&c).unwrap_err();
    assert!(format!("{err:#}").contains("rib_spacing"));
    assert!(generate(&c, MockKernel::new).is_err());
    assert!(!out.exists());
}
