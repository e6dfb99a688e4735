use std::path::Path;

use geom_kernel::{Kernel, KernelSolidHandle};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::dxf::write_dxf;
use crate::errors::ExportError;
use crate::format::ExportFormat;
use crate::stl::{write_ascii_stl, write_binary_stl};

/// Default chordal tolerance for mesh output.
pub const DEFAULT_STL_TOLERANCE: f64 = 0.01;

/// Options for mesh-based formats. STEP ignores them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Tessellation tolerance for STL and DXF.
    pub stl_tolerance: f64,
    /// Write ASCII instead of binary STL.
    pub ascii: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            stl_tolerance: DEFAULT_STL_TOLERANCE,
            ascii: false,
        }
    }
}

/// Encode `solid` in `format` without touching the filesystem.
pub fn export_bytes(
    kernel: &mut dyn Kernel,
    solid: &KernelSolidHandle,
    format: ExportFormat,
    name: &str,
    options: &ExportOptions,
) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Step => Ok(kernel.export_step(solid)?.into_bytes()),
        ExportFormat::Stl | ExportFormat::Dxf => {
            let mesh = kernel.tessellate(solid, options.stl_tolerance)?;
            debug!(triangles = mesh.triangle_count(), "tessellated for export");
            match format {
                ExportFormat::Stl if options.ascii => Ok(write_ascii_stl(&mesh, name)?.into_bytes()),
                ExportFormat::Stl => write_binary_stl(&mesh, name),
                _ => Ok(write_dxf(&mesh, name)?.into_bytes()),
            }
        }
    }
}

/// Write `solid` to `path` in the named format.
///
/// The format string is parsed before the kernel is used, so an unknown
/// format leaves the kernel untouched. Missing parent directories are created.
#[instrument(skip_all, fields(path = %path.display(), format = format))]
pub fn export(
    kernel: &mut dyn Kernel,
    solid: &KernelSolidHandle,
    path: &Path,
    format: &str,
    options: &ExportOptions,
) -> Result<ExportFormat, ExportError> {
    let format: ExportFormat = format.parse()?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(crate::naming::DEFAULT_BASE_NAME);

    let bytes = export_bytes(kernel, solid, format, name, options)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ExportError::io(parent, e))?;
    }
    std::fs::write(path, &bytes).map_err(|e| ExportError::io(path, e))?;
    info!(bytes = bytes.len(), %format, "connector exported");
    Ok(format)
}
