//! Assertion helpers that fail with a diagnostic instead of panicking.

use geom_kernel::{BoundingBox, RenderMesh};

use crate::helpers::HarnessError;
use crate::oracle::OracleVerdict;

fn failed(detail: String) -> HarnessError {
    HarnessError::AssertionFailed { detail }
}

/// Assert a tessellation spans the expected box within `tol`.
pub fn assert_mesh_envelope(
    mesh: &RenderMesh,
    expected: &BoundingBox,
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    let verdict = crate::oracle::check_mesh_envelope(mesh, expected, tol);
    if verdict.passed {
        Ok(())
    } else {
        Err(failed(format!("[{ctx}] {}", verdict.detail)))
    }
}

/// Assert a solid's size along each axis.
pub fn assert_size(
    bb: &BoundingBox,
    expected: [f64; 3],
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    let size = bb.size();
    match (0..3).find(|&i| (size[i] - expected[i]).abs() > tol) {
        None => Ok(()),
        Some(i) => Err(failed(format!(
            "[{ctx}] size[{i}]: expected {:.3}, got {:.3} (tol={tol})",
            expected[i], size[i]
        ))),
    }
}

/// Assert every verdict passed, listing all failures.
pub fn assert_all_pass(verdicts: &[OracleVerdict], ctx: &str) -> Result<(), HarnessError> {
    let failures: Vec<String> = verdicts
        .iter()
        .filter(|v| !v.passed)
        .map(|v| format!("{}: {}", v.oracle_name, v.detail))
        .collect();
    if failures.is_empty() {
        Ok(())
    } else {
        Err(failed(format!("[{ctx}] {}", failures.join(" | "))))
    }
}

/// Assert a mesh is closed and has triangles.
pub fn assert_watertight(mesh: &RenderMesh, ctx: &str) -> Result<(), HarnessError> {
    if mesh.is_empty() {
        return Err(failed(format!("[{ctx}] mesh is empty")));
    }
    let verdict = crate::oracle::check_watertight_mesh(mesh);
    if verdict.passed {
        Ok(())
    } else {
        Err(failed(format!("[{ctx}] {}", verdict.detail)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::unit_cube;

    #[test]
    fn size_mismatch_names_the_axis() {
        let bb = BoundingBox::centered([2.0, 3.0, 4.0]);
        assert!(assert_size(&bb, [2.0, 3.0, 4.0], 1e-9, "ok").is_ok());
        let err = assert_size(&bb, [2.0, 3.5, 4.0], 1e-9, "box").unwrap_err();
        assert!(err.to_string().contains("size[1]"));
    }

    #[test]
    fn unit_cube_is_watertight_and_bounded() {
        let cube = unit_cube();
        assert!(assert_watertight(&cube, "cube").is_ok());
        let unit = BoundingBox::new([0.0; 3], [1.0; 3]);
        assert!(assert_mesh_envelope(&cube, &unit, 1e-6, "cube").is_ok());
        let err = assert_mesh_envelope(&cube, &BoundingBox::new([0.0; 3], [2.0; 3]), 1e-6, "cube")
            .unwrap_err();
        assert!(err.to_string().contains("max[0]"));
    }

    #[test]
    fn empty_mesh_is_not_watertight() {
        assert!(assert_watertight(&RenderMesh::default(), "empty").is_err());
    }
}
