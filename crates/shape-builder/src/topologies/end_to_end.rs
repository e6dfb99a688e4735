use connector_types::{Stage, Topology};
use geom_kernel::FaceSelector;

use super::{cross_rib, end_wedge, rib_step, taper_step, through_slot, ConnectorLayout};
use crate::config::BuildConfig;
use crate::dimensions::DerivedDimensions;
use crate::features::{rib_thickness, screw_hole, taper_depth};
use crate::plan::{BuildPlan, PlannedStep, ShapeSpec};

/// Straight connector: two boards meet in the middle of one slot.
pub struct EndToEndLayout {
    pub dims: DerivedDimensions,
    pub config: BuildConfig,
}

impl ConnectorLayout for EndToEndLayout {
    fn topology(&self) -> Topology {
        Topology::EndToEnd
    }

    fn base_plan(&self) -> BuildPlan {
        let d = &self.dims;
        BuildPlan::new(
            Topology::EndToEnd,
            ShapeSpec::cuboid([d.run_length, d.body_width, d.body_height]),
        )
        .then(PlannedStep::subtract(
            Stage::SlotCut,
            "slot",
            through_slot(d, d.run_length),
        ))
    }

    fn taper_steps(&self) -> Vec<PlannedStep> {
        let d = &self.dims;
        let depth = taper_depth(&self.config, d.run_length, Some(d.wall));
        let tip = d.slot_width + self.config.wedge_flare;
        [("taper +x", 0.0), ("taper -x", 180.0)]
            .into_iter()
            .map(|(label, degrees)| {
                taper_step(
                    label,
                    end_wedge(depth, d.slot_width, tip, d.slot_height, d.run_length, degrees),
                )
            })
            .collect()
    }

    fn rib_steps(&self) -> Vec<PlannedStep> {
        let d = &self.dims;
        let t = rib_thickness(&self.config, d.wall);
        [0.0, -d.run_length / 4.0, d.run_length / 4.0]
            .into_iter()
            .enumerate()
            .map(|(i, x)| rib_step(format!("rib {i}"), cross_rib(t, d).at([x, 0.0, 0.0])))
            .collect()
    }

    fn hole_steps(&self) -> Vec<PlannedStep> {
        let d = &self.dims;
        let x = d.run_length / 2.0 - d.board_depth / 2.0;
        [FaceSelector::top(), FaceSelector::bottom()]
            .into_iter()
            .flat_map(|face| [(face, -x), (face, x)])
            .map(|(face, x)| {
                PlannedStep::hole(
                    format!("hole {face} x={x:.2}"),
                    screw_hole(&self.config, face, [x, 0.0], d.wall),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use connector_types::ConnectorParameters;

    fn layout() -> EndToEndLayout {
        let params = ConnectorParameters::new(20.0, 10.0, 30.0);
        EndToEndLayout {
            dims: DerivedDimensions::derive(&params, Topology::EndToEnd),
            config: BuildConfig::default(),
        }
    }

    #[test]
    fn test_slot_runs_through_both_ends() {
        let plan = layout().base_plan();
        let slot = plan.steps_in(Stage::SlotCut).next().unwrap();
        let bb = slot.shape().unwrap().envelope();
        assert!(bb.min[0] < -33.0 && bb.max[0] > 33.0);
    }

    #[test]
    fn test_wedges_sit_flush_with_ends() {
        let tapers = layout().taper_steps();
        assert_eq!(tapers.len(), 2);
        let right = tapers[0].shape().unwrap().envelope();
        let left = tapers[1].shape().unwrap().envelope();
        assert_relative_eq!(right.max[0], 33.0, epsilon = 1e-9);
        assert_relative_eq!(left.min[0], -33.0, epsilon = 1e-9);
        assert_relative_eq!(right.size()[1], 21.2, epsilon = 1e-9);
    }

    #[test]
    fn test_holes_mirror_top_and_bottom() {
        let steps = layout().hole_steps();
        assert_eq!(steps.len(), 4);
        let plan = BuildPlan::new(Topology::EndToEnd, ShapeSpec::cuboid([1.0; 3])).extended(steps);
        let xs: Vec<f64> = plan.holes().map(|h| h.offset[0]).collect();
        assert_eq!(xs, vec![-18.0, 18.0, -18.0, 18.0]);
        assert_eq!(plan.holes().filter(|h| h.face == FaceSelector::top()).count(), 2);
    }
}
