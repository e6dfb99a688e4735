use connector_types::{Stage, Topology};
use geom_kernel::{Axis, FaceSelector};

use super::{cross_rib, end_wedge, rib_step, taper_step, through_slot, ConnectorLayout};
use crate::config::BuildConfig;
use crate::dimensions::DerivedDimensions;
use crate::features::{rib_thickness, screw_hole, taper_depth};
use crate::plan::{BuildPlan, PlannedStep, ShapeSpec};

/// T connector: a straight bar along X with a stem rising along +Y.
///
/// The stem's slot is confined to the stem; it does not open into the bar's slot.
pub struct TConnLayout {
    pub dims: DerivedDimensions,
    pub config: BuildConfig,
}

impl TConnLayout {
    /// Y coordinate where the stem meets the bar.
    fn stem_base(&self) -> f64 {
        self.dims.body_width / 2.0
    }

    fn stem_centre(&self) -> f64 {
        self.stem_base() + self.dims.branch_length / 2.0
    }

    fn stem_end(&self) -> f64 {
        self.stem_base() + self.dims.branch_length
    }
}

impl ConnectorLayout for TConnLayout {
    fn topology(&self) -> Topology {
        Topology::TConn
    }

    fn base_plan(&self) -> BuildPlan {
        let d = &self.dims;
        let stem_slot_len = d.branch_length + d.tolerance;
        BuildPlan::new(
            Topology::TConn,
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

    fn taper_steps(&self) -> Vec<PlannedStep> {
        let d = &self.dims;
        let tip = d.slot_width + self.config.wedge_flare;
        let bar_depth = taper_depth(&self.config, d.run_length, Some(d.wall));
        let stem_depth = taper_depth(&self.config, d.branch_length, Some(d.wall));

        let mut steps: Vec<PlannedStep> = [("taper +x", 0.0), ("taper -x", 180.0)]
            .into_iter()
            .map(|(label, degrees)| {
                taper_step(
                    label,
                    end_wedge(bar_depth, d.slot_width, tip, d.slot_height, d.run_length, degrees),
                )
            })
            .collect();
        steps.push(taper_step(
            "taper +y",
            ShapeSpec::wedge(stem_depth, d.slot_width, tip, d.slot_height)
                .turned(Axis::Z, 90.0)
                .at([0.0, self.stem_end() - stem_depth / 2.0, 0.0]),
        ));
        steps
    }

    fn rib_steps(&self) -> Vec<PlannedStep> {
        let d = &self.dims;
        let t = rib_thickness(&self.config, d.wall);
        let mut steps: Vec<PlannedStep> = [0.0, -d.run_length / 4.0, d.run_length / 4.0]
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
        let stem_hole = self.stem_end() - d.board_depth / 2.0;
        [
            ("hole top", FaceSelector::top(), [0.0, 0.0]),
            ("hole bottom", FaceSelector::bottom(), [0.0, 0.0]),
            ("hole stem", FaceSelector::top(), [0.0, stem_hole]),
        ]
        .into_iter()
        .map(|(label, face, offset)| {
            PlannedStep::hole(label, screw_hole(&self.config, face, offset, d.wall))
        })
        .collect()
    }
}
