//! Runs a [`BuildPlan`] against a kernel.

use connector_types::Stage;
use geom_kernel::{Kernel, KernelError, KernelSolidHandle};
use tracing::{debug, instrument};

use crate::plan::{BuildPlan, Primitive, ShapeSpec, Step, Transform};
use crate::types::BuildError;

/// Execute a plan, threading the latest solid through every step.
///
/// Stops at the first kernel failure and reports the stage it happened in.
/// Tool solids and superseded intermediates are released as the chain
/// advances, so only the returned solid stays in the kernel.
#[instrument(skip_all, fields(topology = %plan.topology, steps = plan.steps.len()))]
pub fn execute_plan(
    kernel: &mut dyn Kernel,
    plan: &BuildPlan,
) -> Result<KernelSolidHandle, BuildError> {
    let topology = plan.topology;
    let fail = |stage: Stage| {
        move |source: KernelError| BuildError::KernelOperationFailed {
            topology,
            stage,
            source,
        }
    };

    let seed = realize(kernel, &plan.seed).map_err(fail(Stage::Construction))?;
    plan.steps.iter().try_fold(seed, |solid, planned| {
        debug!(stage = %planned.stage, label = %planned.label, "applying step");
        let next = apply_step(kernel, &solid, &planned.step);
        kernel.release(&solid);
        next.map_err(fail(planned.stage))
    })
}

/// Build a primitive and apply its transforms in order.
pub fn realize(
    kernel: &mut dyn Kernel,
    shape: &ShapeSpec,
) -> Result<KernelSolidHandle, KernelError> {
    let base = match shape.primitive {
        Primitive::Box { size } => kernel.make_box(size)?,
        Primitive::Wedge {
            depth,
            base_width,
            tip_width,
            height,
        } => kernel.make_wedge(depth, base_width, tip_width, height)?,
        Primitive::Loft { length, start, end } => {
            kernel.make_loft(length, start, end)?
        }
        Primitive::Cylinder { radius, height } => {
            kernel.make_cylinder(radius, height)?
        }
    };
    shape.transforms
        .iter()
        .try_fold(base, |solid, transform| {
            let moved = match *transform {
                Transform::Rotate { axis, degrees } => kernel.rotate(&solid, axis, degrees),
                Transform::Translate { offset } => kernel.translate(&solid, offset),
            };
            kernel.release(&solid);
            moved
        })
}

fn apply_step(
    kernel: &mut dyn Kernel,
    solid: &KernelSolidHandle,
    step: &Step,
) -> Result<KernelSolidHandle, KernelError> {
    match step {
        Step::Union { shape } => {
            let tool = realize(kernel, shape)?;
            let merged = kernel.boolean_union(solid, &tool);
            kernel.release(&tool);
            merged
        }
        Step::Subtract { shape } => {
            let tool = realize(kernel, shape)?;
            let cut = kernel.boolean_subtract(solid, &tool);
            kernel.release(&tool);
            cut
        }
        Step::Hole { hole } => {
            let face = kernel.select_face(solid, hole.face)?;
            kernel.cut_hole(solid, &face, hole.offset, hole.diameter, hole.depth)
        }
    }
}
