use connector_types::{ParameterError, Stage, Topology};
use geom_kernel::KernelError;

/// Errors from building a connector.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BuildError {
    /// Rejected before any kernel call was made.
    #[error("invalid parameter: {reason}")]
    InvalidParameter { reason: String },

    /// A kernel call failed. No partial solid is returned.
    #[error("{topology} connector failed during {stage}: {source}")]
    KernelOperationFailed {
        topology: Topology,
        stage: Stage,
        source: KernelError,
    },
}

impl BuildError {
    pub fn stage(&self) -> Option<Stage> {
        match self {
            BuildError::InvalidParameter { .. } => None,
            BuildError::KernelOperationFailed { stage, .. } => Some(*stage),
        }
    }
}

impl From<ParameterError> for BuildError {
    fn from(err: ParameterError) -> Self {
        BuildError::InvalidParameter {
            reason: err.to_string(),
        }
    }
}
