use connector_types::{ConnectorParameters, Topology, DEFAULT_ANGLE};
use geom_kernel::{Kernel, KernelSolidHandle};
use tracing::{info, instrument, warn};

use crate::config::BuildConfig;
use crate::dimensions::DerivedDimensions;
use crate::execute::execute_plan;
use crate::features::FeatureApplier;
use crate::plan::BuildPlan;
use crate::topologies::layout_for;
use crate::types::BuildError;

/// Turns connector parameters into plans and solids.
///
/// Holds no per-build state, so one builder can serve any number of builds.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeBuilder {
    config: BuildConfig,
}

impl ShapeBuilder {
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Validate the configuration and parameters, then lay out every step
    /// for `topology`.
    ///
    /// Makes no kernel calls.
    pub fn plan(
        &self,
        params: &ConnectorParameters,
        topology: Topology,
    ) -> Result<BuildPlan, BuildError> {
        self.config.validate()?;
        params.validate(topology)?;

        if topology == Topology::Angle && params.angle != DEFAULT_ANGLE {
            warn!(
                requested = params.angle,
                "only right-angle connectors are built; using 90 degrees"
            );
        }

        let dims = DerivedDimensions::derive(params, topology);
        let layout = layout_for(topology, dims, self.config);
        let plan = FeatureApplier::enabled(params)
            .into_iter()
            .fold(layout.base_plan(), |plan, applier| {
                applier.apply(plan, layout.as_ref())
            });
        Ok(plan)
    }

    /// Plan and execute a connector, returning the final solid.
    #[instrument(skip_all, fields(topology = %topology))]
    pub fn build(
        &self,
        kernel: &mut dyn Kernel,
        params: &ConnectorParameters,
        topology: Topology,
    ) -> Result<KernelSolidHandle, BuildError> {
        let plan = self.plan(params, topology)?;
        let solid = execute_plan(kernel, &plan)?;
        info!(
            steps = plan.steps.len(),
            taper = params.add_taper,
            ribs = params.add_ribs,
            screw_holes = params.add_screw_holes,
            "connector built"
        );
        Ok(solid)
    }
}
