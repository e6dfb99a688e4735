//! Per-topology layouts.
//!
//! Coordinates: boards run along X (or Y for a second arm), board width lies
//! along Y and thickness along Z, so the top face is `>Z`. The L-shaped
//! angle connector is the exception and is documented in its module.

mod angle;
mod cross;
mod end_to_end;
mod segments;
mod t_conn;

use connector_types::{Stage, Topology};
use geom_kernel::{Axis, Section};

use crate::config::BuildConfig;
use crate::dimensions::DerivedDimensions;
use crate::plan::{BuildPlan, PlannedStep, ShapeSpec};

pub use angle::AngleLayout;
pub use cross::CrossLayout;
pub use end_to_end::EndToEndLayout;
pub use segments::{
    CornerSegmentLayout, CrossJunctionSegmentLayout, SingleSlotSegmentLayout,
    TJunctionSegmentLayout,
};
pub use t_conn::TConnLayout;

/// Where a topology puts its body, cavities and optional features.
pub trait ConnectorLayout {
    fn topology(&self) -> Topology;

    /// Body construction and slot cuts.
    fn base_plan(&self) -> BuildPlan;

    fn taper_steps(&self) -> Vec<PlannedStep> {
        Vec::new()
    }

    fn rib_steps(&self) -> Vec<PlannedStep> {
        Vec::new()
    }

    /// Whether the ribs run through the channels, so every slot and taper
    /// cut has to be made again once they are in.
    fn ribs_cross_channels(&self) -> bool {
        false
    }

    fn hole_steps(&self) -> Vec<PlannedStep> {
        Vec::new()
    }
}

/// Layout for `topology` at the given dimensions.
pub fn layout_for(
    topology: Topology,
    dims: DerivedDimensions,
    config: BuildConfig,
) -> Box<dyn ConnectorLayout> {
    match topology {
        Topology::EndToEnd => Box::new(EndToEndLayout { dims, config }),
        Topology::Angle => Box::new(AngleLayout { dims, config }),
        Topology::TConn => Box::new(TConnLayout { dims, config }),
        Topology::Cross => Box::new(CrossLayout { dims, config }),
        Topology::SingleSlotSegment => Box::new(SingleSlotSegmentLayout { dims, config }),
        Topology::CornerSegment => Box::new(CornerSegmentLayout { dims, config }),
        Topology::TJunctionSegment => Box::new(TJunctionSegmentLayout { dims, config }),
        Topology::CrossJunctionSegment => Box::new(CrossJunctionSegmentLayout { dims, config }),
    }
}

/// A straight run's through slot along X, overshooting both ends by half the tolerance.
fn through_slot(dims: &DerivedDimensions, length: f64) -> ShapeSpec {
    ShapeSpec::cuboid([length + dims.tolerance, dims.slot_width, dims.slot_height])
}

/// Full cross-section rib box across a run along X.
fn cross_rib(thickness: f64, dims: &DerivedDimensions) -> ShapeSpec {
    ShapeSpec::cuboid([thickness, dims.body_width, dims.body_height])
}

/// Wedge lead-in whose wide side sits flush with the `+X` end of a run of
/// `length`, then turned about Z by `degrees` to face another end.
fn end_wedge(
    depth: f64,
    base_width: f64,
    tip_width: f64,
    height: f64,
    length: f64,
    degrees: f64,
) -> ShapeSpec {
    let wedge = ShapeSpec::wedge(depth, base_width, tip_width, height)
        .at([length / 2.0 - depth / 2.0, 0.0, 0.0]);
    if degrees == 0.0 {
        wedge
    } else {
        wedge.turned(Axis::Z, degrees)
    }
}

/// Round lead-in for segments: a frustum widening towards the `+X` end of
/// a run of `length`, turned about Z by `degrees`.
fn end_frustum(dims: &DerivedDimensions, depth: f64, length: f64, degrees: f64) -> ShapeSpec {
    let inner = dims.slot_height / 2.0;
    let outer = inner + depth.min(dims.wall) / 2.0;
    let frustum = ShapeSpec::loft(
        depth,
        Section::Circle { radius: inner },
        Section::Circle { radius: outer },
    )
    .at([length / 2.0 - depth / 2.0, 0.0, 0.0]);
    if degrees == 0.0 {
        frustum
    } else {
        frustum.turned(Axis::Z, degrees)
    }
}

fn taper_step(label: impl Into<String>, shape: ShapeSpec) -> PlannedStep {
    PlannedStep::subtract(Stage::Taper, label, shape)
}

fn rib_step(label: impl Into<String>, shape: ShapeSpec) -> PlannedStep {
    PlannedStep::union(Stage::Rib, label, shape)
}
