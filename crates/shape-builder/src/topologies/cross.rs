use connector_types::{Stage, Topology};
use geom_kernel::{Axis, FaceSelector};

use super::{end_wedge, rib_step, taper_step, through_slot, ConnectorLayout};
use crate::config::BuildConfig;
use crate::dimensions::DerivedDimensions;
use crate::features::{depth_hole_offsets, screw_hole, segment_rib_thickness, taper_depth};
use crate::plan::{BuildPlan, PlannedStep, ShapeSpec};

/// Turns applied to the second slot and to the diagonal ribs.
const SLOT_TURNS: [f64; 2] = [0.0, 90.0];
const RIB_TURNS: [f64; 4] = [0.0, 45.0, 90.0, 135.0];

/// Square cross: two through slots crossing at the centre.
///
/// Each slot spans the whole side so a board slides in from either face and
/// fills one half of it. The ribs run through both channels and the channels
/// are cut again after them.
pub struct CrossLayout {
    pub dims: DerivedDimensions,
    pub config: BuildConfig,
}

impl ConnectorLayout for CrossLayout {
    fn topology(&self) -> Topology {
        Topology::Cross
    }

    fn base_plan(&self) -> BuildPlan {
        let d = &self.dims;
        let side = d.run_length;
        SLOT_TURNS.into_iter().fold(
            BuildPlan::new(
                Topology::Cross,
                ShapeSpec::cuboid([side, side, d.body_height]),
            ),
            |plan, degrees| {
                let slot = through_slot(d, side);
                let slot = if degrees == 0.0 {
                    slot
                } else {
                    slot.turned(Axis::Z, degrees)
                };
                plan.then(PlannedStep::subtract(
                    Stage::SlotCut,
                    format!("slot {degrees}°"),
                    slot,
                ))
            },
        )
    }

    /// One lead-in wedge per slot, at its positive end.
    fn taper_steps(&self) -> Vec<PlannedStep> {
        let d = &self.dims;
        let slot_len = d.run_length + d.tolerance;
        let depth = taper_depth(&self.config, slot_len, None);
        let tip = d.slot_width + self.config.slot_wedge_flare;
        SLOT_TURNS
            .into_iter()
            .map(|degrees| {
                taper_step(
                    format!("taper {degrees}°"),
                    end_wedge(depth, d.slot_width, tip, d.slot_height, d.run_length, degrees),
                )
            })
            .collect()
    }

    fn rib_steps(&self) -> Vec<PlannedStep> {
        let d = &self.dims;
        let t = segment_rib_thickness(&self.config, d.wall);
        RIB_TURNS
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
        depth_hole_offsets(&self.config, d.run_length)
            .into_iter()
            .map(|x| {
                PlannedStep::hole(
                    format!("hole x={x:.2}"),
                    screw_hole(&self.config, FaceSelector::top(), [x, 0.0], d.wall),
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

    fn layout(width: f64, depth: f64) -> CrossLayout {
        let params = ConnectorParameters::new(width, 10.0, depth);
        CrossLayout {
            dims: DerivedDimensions::derive(&params, Topology::Cross),
            config: BuildConfig::default(),
        }
    }

    #[test]
    fn test_slots_cross_at_right_angles() {
        let plan = layout(20.0, 30.0).base_plan();
        let slots: Vec<_> = plan
            .steps_in(Stage::SlotCut)
            .map(|s| s.shape().unwrap().envelope().size())
            .collect();
        assert_relative_eq!(slots[0][0], 60.2, epsilon = 1e-9);
        assert_relative_eq!(slots[1][1], 60.2, epsilon = 1e-9);
        assert_relative_eq!(slots[1][0], 20.2, epsilon = 1e-9);
    }

    #[test]
    fn test_slots_open_through_opposite_faces() {
        let l = layout(20.0, 30.0);
        let plan = l.base_plan();
        let body = plan.body_envelope();
        let slots: Vec<_> = plan
            .steps_in(Stage::SlotCut)
            .map(|s| s.shape().unwrap().envelope())
            .collect();
        for (slot, axis) in slots.iter().zip([0, 1]) {
            assert!(slot.min[axis] < body.min[axis]);
            assert!(slot.max[axis] > body.max[axis]);
        }

        // Tapers are limited by the slot they open, a quarter of 60.2.
        let shallow = CrossLayout {
            config: BuildConfig {
                max_taper_depth: 100.0,
                ..BuildConfig::default()
            },
            ..l
        };
        for taper in shallow.taper_steps() {
            let bb = taper.shape().unwrap().envelope();
            assert_relative_eq!(bb.size()[0].min(bb.size()[1]), 60.2 / 4.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_square_side_uses_larger_board_dimension() {
        let bb = layout(50.0, 30.0).base_plan().body_envelope();
        assert_relative_eq!(bb.size()[0], 100.0, epsilon = 1e-9);
        assert_relative_eq!(bb.size()[1], 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_four_ribs_stay_inside_square() {
        let l = layout(20.0, 30.0);
        let body = l.base_plan().body_envelope();
        let ribs = l.rib_steps();
        assert_eq!(ribs.len(), 4);
        for rib in &ribs {
            assert!(body.contains(&rib.shape().unwrap().envelope(), 1e-9));
        }
    }

    #[test]
    fn test_holes_follow_depth_rule() {
        // side 60 > 40: both pairs
        assert_eq!(layout(20.0, 30.0).hole_steps().len(), 4);
        // side 2 * max(8, 8) = 16: none
        assert!(layout(8.0, 8.0).hole_steps().is_empty());
    }
}
