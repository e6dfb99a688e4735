use connector_types::Stage;
use geom_kernel::KernelError;

/// Errors during connector export.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExportError {
    #[error("unsupported export format: {0:?} (expected step, stl or dxf)")]
    UnsupportedFormat(String),

    #[error("kernel operation failed during {stage}: {source}")]
    KernelOperationFailed {
        stage: Stage,
        #[source]
        source: KernelError,
    },

    #[error("tessellation produced no triangles")]
    EmptyMesh,

    #[error("I/O error on {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("failed to encode manifest: {0}")]
    Manifest(String),
}

impl ExportError {
    pub(crate) fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        ExportError::Io {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<KernelError> for ExportError {
    fn from(source: KernelError) -> Self {
        ExportError::KernelOperationFailed {
            stage: Stage::Export,
            source,
        }
    }
}
