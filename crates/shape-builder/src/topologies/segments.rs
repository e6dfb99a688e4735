//! Segment variants: smaller pieces meant to be combined into assemblies.
//!
//! Segments use round lead-ins instead of wedges and size their ribs with
//! the segment clamp.

use connector_types::{Stage, Topology};
use geom_kernel::{Axis, FaceSelector};

use super::{cross_rib, end_frustum, rib_step, taper_step, through_slot, ConnectorLayout};
use crate::config::BuildConfig;
use crate::dimensions::DerivedDimensions;
use crate::features::{
    depth_hole_offsets, rib_positions, screw_hole, segment_rib_thickness, taper_depth,
};
use crate::plan::{BuildPlan, PlannedStep, ShapeSpec};

fn top_holes(
    config: &BuildConfig,
    dims: &DerivedDimensions,
    offsets: impl IntoIterator<Item = [f64; 2]>,
) -> Vec<PlannedStep> {
    offsets
        .into_iter()
        .map(|offset| {
            PlannedStep::hole(
                format!("hole ({:.2}, {:.2})", offset[0], offset[1]),
                screw_hole(config, FaceSelector::top(), offset, dims.wall),
            )
        })
        .collect()
}

/// Straight single-board segment.
pub struct SingleSlotSegmentLayout {
    pub dims: DerivedDimensions,
    pub config: BuildConfig,
}

impl ConnectorLayout for SingleSlotSegmentLayout {
    fn topology(&self) -> Topology {
        Topology::SingleSlotSegment
    }

    fn base_plan(&self) -> BuildPlan {
        let d = &self.dims;
        BuildPlan::new(
            Topology::SingleSlotSegment,
            ShapeSpec::cuboid([d.run_length, d.body_width, d.body_height]),
        )
        .then(PlannedStep::subtract(
            Stage::SlotCut,
            "slot",
            through_slot(d, d.run_length),
        ))
    }

    /// Round lead-in at the `+X` end only.
    fn taper_steps(&self) -> Vec<PlannedStep> {
        let d = &self.dims;
        let depth = taper_depth(&self.config, d.run_length, None);
        vec![taper_step(
            "taper +x",
            end_frustum(d, depth, d.run_length, 0.0),
        )]
    }

    fn rib_steps(&self) -> Vec<PlannedStep> {
        let d = &self.dims;
        let t = segment_rib_thickness(&self.config, d.wall);
        vec![rib_step("rib", cross_rib(t, d))]
    }

    fn hole_steps(&self) -> Vec<PlannedStep> {
        let d = &self.dims;
        if d.run_length > self.config.hole_depth_threshold {
            top_holes(&self.config, d, [[0.0, 0.0]])
        } else {
            Vec::new()
        }
    }
}

/// Compact corner block with two perpendicular slot stubs meeting at its centre.
///
/// The block's height runs along Z and carries the board width; the stubs
/// open through the `+X` and `+Y` faces.
pub struct CornerSegmentLayout {
    pub dims: DerivedDimensions,
    pub config: BuildConfig,
}

impl ConnectorLayout for CornerSegmentLayout {
    fn topology(&self) -> Topology {
        Topology::CornerSegment
    }

    fn base_plan(&self) -> BuildPlan {
        let d = &self.dims;
        let side = d.run_length;
        let stub_len = side / 2.0 + d.tolerance;
        let stub = ShapeSpec::cuboid([stub_len, d.slot_height, d.slot_width])
            .at([stub_len / 2.0, 0.0, 0.0]);
        BuildPlan::new(
            Topology::CornerSegment,
            ShapeSpec::cuboid([side, side, d.body_width]),
        )
        .then(PlannedStep::subtract(Stage::SlotCut, "stub +x", stub.clone()))
        .then(PlannedStep::subtract(
            Stage::SlotCut,
            "stub +y",
            stub.turned(Axis::Z, 90.0),
        ))
    }

    fn rib_steps(&self) -> Vec<PlannedStep> {
        let d = &self.dims;
        let t = segment_rib_thickness(&self.config, d.wall);
        vec![rib_step(
            "diagonal rib",
            ShapeSpec::cuboid([t, d.run_length, d.body_width]).turned(Axis::Z, 45.0),
        )]
    }

    /// Depth rule over the block side; each offset lands above one of the stubs.
    fn hole_steps(&self) -> Vec<PlannedStep> {
        let d = &self.dims;
        let offsets = depth_hole_offsets(&self.config, d.run_length)
            .into_iter()
            .filter(|o| *o > 0.0)
            .flat_map(|o| [[o, 0.0], [0.0, o]]);
        top_holes(&self.config, d, offsets)
    }
}

/// T junction at segment scale: bar along X, stem half as long along +Y.
pub struct TJunctionSegmentLayout {
    pub dims: DerivedDimensions,
    pub config: BuildConfig,
}

impl TJunctionSegmentLayout {
    fn stem_base(&self) -> f64 {
        self.dims.body_width / 2.0
    }

    fn stem_centre(&self) -> f64 {
        self.stem_base() + self.dims.branch_length / 2.0
    }
}

impl ConnectorLayout for TJunctionSegmentLayout {
    fn topology(&self) -> Topology {
        Topology::TJunctionSegment
    }

    fn base_plan(&self) -> BuildPlan {
        let d = &self.dims;
        let stem_slot_len = d.branch_length + d.tolerance;
        BuildPlan::new(
            Topology::TJunctionSegment,
            ShapeSpec::cuboid([d.run_length, d.body_width, d.body_height]),
        )
        .then(PlannedStep::union(
            Stage::Construction,
            "stem",
            ShapeSpec::cuboid([d.body_width, d.branch_length, d.body_height])
                .at([0.0, self.stem_centre(), 0.0]),
        ))
        .then(PlannedStep::subtract(
            Stage::SlotCut,
            "bar slot",
            through_slot(d, d.run_length),
        ))
        .then(PlannedStep::subtract(
            Stage::SlotCut,
            "stem slot",
            ShapeSpec::cuboid([d.slot_width, stem_slot_len, d.slot_height])
                .at([0.0, self.stem_base() + stem_slot_len / 2.0, 0.0]),
        ))
    }

    /// Round lead-ins at both bar ends and the stem end.
    fn taper_steps(&self) -> Vec<PlannedStep> {
        let d = &self.dims;
        let bar_depth = taper_depth(&self.config, d.run_length, None);
        let stem_depth = taper_depth(&self.config, d.branch_length, None);
        // A frustum laid out on a run of this length ends exactly at the stem's free end.
        let stem_run = 2.0 * (self.stem_base() + d.branch_length);
        vec![
            taper_step("taper +x", end_frustum(d, bar_depth, d.run_length, 0.0)),
            taper_step("taper -x", end_frustum(d, bar_depth, d.run_length, 180.0)),
            taper_step("taper +y", end_frustum(d, stem_depth, stem_run, 90.0)),
        ]
    }

    fn rib_steps(&self) -> Vec<PlannedStep> {
        let d = &self.dims;
        let t = segment_rib_thickness(&self.config, d.wall);
        let mut steps: Vec<PlannedStep> = rib_positions(&self.config, d.run_length)
            .into_iter()
            .enumerate()
            .map(|(i, x)| rib_step(format!("bar rib {i}"), cross_rib(t, d).at([x, 0.0, 0.0])))
            .collect();
        steps.push(rib_step(
            "stem rib",
            ShapeSpec::cuboid([d.body_width, t, d.body_height]).at([0.0, self.stem_centre(), 0.0]),
        ));
        steps
    }

    fn hole_steps(&self) -> Vec<PlannedStep> {
        let d = &self.dims;
        let offsets = depth_hole_offsets(&self.config, d.run_length)
            .into_iter()
            .map(|x| [x, 0.0]);
        top_holes(&self.config, d, offsets)
    }
}

/// Cross junction at segment scale.
pub struct CrossJunctionSegmentLayout {
    pub dims: DerivedDimensions,
    pub config: BuildConfig,
}

impl ConnectorLayout for CrossJunctionSegmentLayout {
    fn topology(&self) -> Topology {
        Topology::CrossJunctionSegment
    }

    fn base_plan(&self) -> BuildPlan {
        let d = &self.dims;
        let side = d.run_length;
        BuildPlan::new(
            Topology::CrossJunctionSegment,
            ShapeSpec::cuboid([side, side, d.body_height]),
        )
        .then(PlannedStep::subtract(
            Stage::SlotCut,
            "slot x",
            through_slot(d, side),
        ))
        .then(PlannedStep::subtract(
            Stage::SlotCut,
            "slot y",
            through_slot(d, side).turned(Axis::Z, 90.0),
        ))
    }

    /// Round lead-ins at all four entrances.
    fn taper_steps(&self) -> Vec<PlannedStep> {
        let d = &self.dims;
        let depth = taper_depth(&self.config, d.run_length, None);
        [0.0, 90.0, 180.0, 270.0]
            .into_iter()
            .map(|degrees| {
                taper_step(
                    format!("taper {degrees}°"),
                    end_frustum(d, depth, d.run_length, degrees),
                )
            })
            .collect()
    }

    fn rib_steps(&self) -> Vec<PlannedStep> {
        let d = &self.dims;
        let t = segment_rib_thickness(&self.config, d.wall);
        [0.0, 45.0, 90.0, 135.0]
            .into_iter()
            .map(|degrees| {
                let rib = ShapeSpec::cuboid([t, d.run_length, d.body_height]);
                let rib = if degrees == 0.0 {
                    rib
                } else {
                    rib.turned(Axis::Z, degrees)
                };
                rib_step(format!("rib {degrees}°"), rib)
            })
            .collect()
    }

    fn ribs_cross_channels(&self) -> bool {
        true
    }

    fn hole_steps(&self) -> Vec<PlannedStep> {
        let d = &self.dims;
        let offsets = depth_hole_offsets(&self.config, d.run_length)
            .into_iter()
            .map(|x| [x, 0.0]);
        top_holes(&self.config, d, offsets)
    }
}
