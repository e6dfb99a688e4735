use connector_types::{ConnectorParameters, Stage, Topology};
use file_export::{
    export, export_bytes, output_file_name, write_manifest, ExportError, ExportFormat,
    ExportManifest, ExportOptions,
};
use geom_kernel::{KernelError, MockKernel, MockOp};

fn built(kernel: &mut MockKernel, topology: Topology) -> geom_kernel::KernelSolidHandle {
    let params = ConnectorParameters::new(20.0, 10.0, 30.0).with_all_features();
    shape_builder::build(kernel, &params, topology).unwrap()
}

// ── Format dispatch ─────────────────────────────────────────────────────────

#[test]
fn unknown_format_fails_before_kernel_work() {
    let mut kernel = MockKernel::new();
    let solid = built(&mut kernel, Topology::EndToEnd);
    let before = kernel.calls().len();
    let dir = tempfile::tempdir().unwrap();

    let err = export(
        &mut kernel,
        &solid,
        &dir.path().join("out.xyz"),
        "XYZ",
        &ExportOptions::default(),
    )
    .unwrap_err();

    assert!(matches!(err, ExportError::UnsupportedFormat(ref s) if s == "XYZ"));
    assert_eq!(kernel.calls().len(), before);
    assert!(!dir.path().join("out.xyz").exists());
}

#[test]
fn stl_and_step_produce_non_empty_files() {
    let mut kernel = MockKernel::new();
    let solid = built(&mut kernel, Topology::EndToEnd);
    let dir = tempfile::tempdir().unwrap();

    for (format, name) in [("STL", "c.stl"), ("step", "c.step"), ("dxf", "c.dxf")] {
        let path = dir.path().join(name);
        export(&mut kernel, &solid, &path, format, &ExportOptions::default()).unwrap();
        let len = std::fs::metadata(&path).unwrap().len();
        assert!(len > 0, "{format} file is empty");
    }
    assert_eq!(kernel.count(MockOp::Tessellate), 2);
    assert_eq!(kernel.count(MockOp::ExportStep), 1);
}

#[test]
fn binary_stl_triangle_count_matches_mesh() {
    let mut kernel = MockKernel::new();
    let solid = built(&mut kernel, Topology::Cross);
    let bytes = export_bytes(
        &mut kernel,
        &solid,
        ExportFormat::Stl,
        "cross",
        &ExportOptions::default(),
    )
    .unwrap();
    let count = u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]) as usize;
    assert_eq!(count, 12);
    assert_eq!(bytes.len(), 84 + count * 50);
}

#[test]
fn ascii_option_writes_text_stl() {
    let mut kernel = MockKernel::new();
    let solid = built(&mut kernel, Topology::Angle);
    let options = ExportOptions {
        ascii: true,
        ..Default::default()
    };
    let bytes = export_bytes(&mut kernel, &solid, ExportFormat::Stl, "angle", &options).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.starts_with("solid angle"));
}

#[test]
fn parent_directories_are_created() {
    let mut kernel = MockKernel::new();
    let solid = built(&mut kernel, Topology::TConn);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/deeper/t.stp");
    let format = export(&mut kernel, &solid, &path, "stp", &ExportOptions::default()).unwrap();
    assert_eq!(format, ExportFormat::Step);
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("ISO-10303-21;"));
}

#[test]
fn kernel_failure_is_reported_as_export_stage() {
    let mut kernel = MockKernel::failing_on(MockOp::Tessellate);
    let solid = built(&mut kernel, Topology::EndToEnd);
    let err = export_bytes(
        &mut kernel,
        &solid,
        ExportFormat::Stl,
        "x",
        &ExportOptions::default(),
    )
    .unwrap_err();
    match err {
        ExportError::KernelOperationFailed { stage, source } => {
            assert_eq!(stage, Stage::Export);
            assert!(matches!(source, KernelError::TessellationFailed { .. }));
        }
        other => panic!("expected kernel failure, got {other:?}"),
    }
}

// ── Naming and manifest ────────────────────────────────────────────────────

#[test]
fn manifest_is_written_next_to_export() {
    let mut kernel = MockKernel::new();
    let params = ConnectorParameters::new(20.0, 10.0, 30.0);
    let solid = shape_builder::build(&mut kernel, &params, Topology::SingleSlotSegment).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let file = output_file_name("shelf", Topology::SingleSlotSegment, ExportFormat::Stl);
    let path = dir.path().join(&file);

    let format = export(&mut kernel, &solid, &path, "stl", &ExportOptions::default()).unwrap();
    let manifest = ExportManifest::new(Topology::SingleSlotSegment, format, params, file.clone());
    let manifest_path = write_manifest(&manifest, &path).unwrap();

    let json = std::fs::read_to_string(manifest_path).unwrap();
    let back: ExportManifest = serde_json::from_str(&json).unwrap();
    assert_eq!(back.file, "shelf_single_slot_segment.stl");
    assert_eq!(back.id, manifest.id);
}
