//! L-shaped connector.
//!
//! The L lies in the XY plane with its solid corner occupying `[0, c]²`,
//! where `c` is the body height. One arm runs along +X and the other along
//! +Y. Board thickness lies in the plane of the L and board width along Z,
//! so screw holes go in through the `>Z` face.

use connector_types::{Stage, Topology};
use geom_kernel::{Axis, FaceSelector, Section};

use super::{rib_step, taper_step, ConnectorLayout};
use crate::config::BuildConfig;
use crate::dimensions::DerivedDimensions;
use crate::features::{rib_thickness, screw_hole, taper_depth};
use crate::plan::{BuildPlan, PlannedStep, ShapeSpec};

/// Fraction of an arm's length at which its rib and hole sit.
const FEATURE_FRACTION: f64 = 0.75;

pub struct AngleLayout {
    pub dims: DerivedDimensions,
    pub config: BuildConfig,
}

impl AngleLayout {
    fn corner(&self) -> f64 {
        self.dims.corner_size
    }

    fn arm(&self) -> f64 {
        self.dims.run_length
    }

    fn feature_point(&self) -> f64 {
        FEATURE_FRACTION * self.arm()
    }

    /// Place a shape laid out along +X on the X arm, or mirror it onto the Y arm.
    fn on_arm(&self, shape: ShapeSpec, along: f64, y_arm: bool) -> ShapeSpec {
        let c = self.corner();
        let z = self.dims.body_width / 2.0;
        if y_arm {
            shape.turned(Axis::Z, 90.0).at([c / 2.0, along, z])
        } else {
            shape.at([along, c / 2.0, z])
        }
    }
}

impl ConnectorLayout for AngleLayout {
    fn topology(&self) -> Topology {
        Topology::Angle
    }

    fn base_plan(&self) -> BuildPlan {
        let d = &self.dims;
        let (c, arm) = (self.corner(), self.arm());
        let arm_box = || ShapeSpec::cuboid([arm, c, d.body_width]);
        // Channels stop at the corner and overshoot the outer end by the tolerance.
        let channel_len = d.board_depth + d.tolerance;
        let channel = || ShapeSpec::cuboid([channel_len, d.slot_height, d.slot_width]);
        let channel_centre = c + channel_len / 2.0;

        BuildPlan::new(Topology::Angle, self.on_arm(arm_box(), arm / 2.0, false))
            .then(PlannedStep::union(
                Stage::Construction,
                "arm +y",
                self.on_arm(arm_box(), arm / 2.0, true),
            ))
            .then(PlannedStep::subtract(
                Stage::SlotCut,
                "channel +x",
                self.on_arm(channel(), channel_centre, false),
            ))
            .then(PlannedStep::subtract(
                Stage::SlotCut,
                "channel +y",
                self.on_arm(channel(), channel_centre, true),
            ))
    }

    fn taper_steps(&self) -> Vec<PlannedStep> {
        let d = &self.dims;
        let depth = taper_depth(&self.config, d.board_depth, Some(d.wall));
        let flare = self.config.wedge_flare.min(d.wall / 2.0);
        // In-plane extent stays flared; the board-width (Z) extent halves inward.
        let outer = Section::Rect {
            width: d.slot_height + 2.0 * flare,
            height: d.slot_width,
        };
        let inner = Section::Rect {
            width: d.slot_height + 2.0 * flare,
            height: d.slot_width / 2.0,
        };
        let along = self.arm() - depth / 2.0;
        [("taper +x", false), ("taper +y", true)]
            .into_iter()
            .map(|(label, y_arm)| {
                taper_step(
                    label,
                    self.on_arm(ShapeSpec::loft(depth, inner, outer), along, y_arm),
                )
            })
            .collect()
    }

    fn rib_steps(&self) -> Vec<PlannedStep> {
        let d = &self.dims;
        let t = rib_thickness(&self.config, d.wall);
        let rib = || ShapeSpec::cuboid([t, self.corner(), d.body_width]);
        [("rib +x", false), ("rib +y", true)]
            .into_iter()
            .map(|(label, y_arm)| rib_step(label, self.on_arm(rib(), self.feature_point(), y_arm)))
            .collect()
    }

    fn hole_steps(&self) -> Vec<PlannedStep> {
        let c = self.corner();
        let p = self.feature_point();
        [("hole +x", [p, c / 2.0]), ("hole +y", [c / 2.0, p])]
            .into_iter()
            .map(|(label, offset)| {
                PlannedStep::hole(
                    label,
                    screw_hole(&self.config, FaceSelector::top(), offset, self.dims.wall),
                )
            })
            .collect()
    }
}
