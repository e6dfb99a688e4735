//! Parametric board-connector construction.
//!
//! [`plan`] lays out a connector as kernel-independent steps; [`build`]
//! executes that plan on a [`geom_kernel::Kernel`].

pub mod batch;
pub mod builder;
pub mod config;
pub mod dimensions;
pub mod execute;
pub mod features;
pub mod plan;
pub mod topologies;
pub mod types;

use connector_types::{ConnectorParameters, Topology};
use geom_kernel::{Kernel, KernelSolidHandle};

pub use batch::{build_batch, BatchOutcome};
pub use builder::ShapeBuilder;
pub use config::BuildConfig;
pub use dimensions::DerivedDimensions;
pub use execute::execute_plan;
pub use features::FeatureApplier;
pub use plan::{BuildPlan, HoleSpec, PlannedStep, Primitive, ShapeSpec, Step, Transform};
pub use types::BuildError;

/// Plan a connector with the default configuration.
pub fn plan(params: &ConnectorParameters, topology: Topology) -> Result<BuildPlan, BuildError> {
    ShapeBuilder::default().plan(params, topology)
}

/// Build a connector with the default configuration.
pub fn build(
    kernel: &mut dyn Kernel,
    params: &ConnectorParameters,
    topology: Topology,
) -> Result<KernelSolidHandle, BuildError> {
    ShapeBuilder::default().build(kernel, params, topology)
}
