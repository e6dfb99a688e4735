//! Optional features and the sizing rules they share.
//!
//! Each enabled feature is a [`FeatureApplier`] that appends its steps to a
//! plan. The topology layout decides where the feature goes; the rules here
//! decide how big it is.

use connector_types::ConnectorParameters;
use geom_kernel::FaceSelector;

use crate::config::BuildConfig;
use crate::plan::{BuildPlan, HoleSpec};
use crate::topologies::ConnectorLayout;

/// An optional feature, applied in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureApplier {
    Taper,
    Ribs,
    ScrewHoles,
}

impl FeatureApplier {
    /// Appliers switched on by the parameters, in the order they run.
    pub fn enabled(params: &ConnectorParameters) -> Vec<FeatureApplier> {
        [
            (params.add_taper, FeatureApplier::Taper),
            (params.add_ribs, FeatureApplier::Ribs),
            (params.add_screw_holes, FeatureApplier::ScrewHoles),
        ]
        .into_iter()
        .filter_map(|(on, applier)| on.then_some(applier))
        .collect()
    }

    pub fn apply(self, plan: BuildPlan, layout: &dyn ConnectorLayout) -> BuildPlan {
        match self {
            FeatureApplier::Taper => plan.extended(layout.taper_steps()),
            FeatureApplier::Ribs if layout.ribs_cross_channels() => {
                let recuts = plan.channel_recuts();
                plan.extended(layout.rib_steps()).extended(recuts)
            }
            FeatureApplier::Ribs => plan.extended(layout.rib_steps()),
            FeatureApplier::ScrewHoles => plan.extended(layout.hole_steps()),
        }
    }
}

/// Taper depth: the configured maximum, a quarter of the limiting run, and
/// optionally the wall thickness, whichever is smallest.
pub fn taper_depth(config: &BuildConfig, limiting_length: f64, wall: Option<f64>) -> f64 {
    let depth = config.max_taper_depth.min(limiting_length / 4.0);
    match wall {
        Some(w) => depth.min(w),
        None => depth,
    }
}

/// Rib thickness for the full-size connectors: half the wall at most.
pub fn rib_thickness(config: &BuildConfig, wall: f64) -> f64 {
    config.rib_thickness.min(wall / 2.0)
}

/// Rib thickness for segments and the cross: wall minus 0.5 at most,
/// falling back to half the wall on very thin walls.
pub fn segment_rib_thickness(config: &BuildConfig, wall: f64) -> f64 {
    let preferred = config.segment_rib_thickness.min(wall - 0.5);
    if preferred > 0.0 {
        preferred
    } else {
        config.segment_rib_thickness.min(wall / 2.0)
    }
}

/// Evenly spaced rib centres along a run of `length` centred on the origin.
///
/// Places `max(1, floor(length / spacing) - 1)` ribs.
pub fn rib_positions(config: &BuildConfig, length: f64) -> Vec<f64> {
    let count = ((length / config.rib_spacing).floor() as i64 - 1).max(1) as usize;
    (0..count)
        .map(|i| length * (i as f64 + 1.0) / (count as f64 + 1.0) - length / 2.0)
        .collect()
}

/// Hole offsets along a run of `depth`: none up to the first threshold, a
/// pair at a quarter of the depth, and an inner pair at an eighth past the
/// second threshold.
pub fn depth_hole_offsets(config: &BuildConfig, depth: f64) -> Vec<f64> {
    let mut offsets = Vec::new();
    if depth > config.hole_depth_threshold {
        offsets.extend([-depth / 4.0, depth / 4.0]);
        if depth > config.inner_hole_depth_threshold {
            offsets.extend([-depth / 8.0, depth / 8.0]);
        }
    }
    offsets
}

/// Screw hole through `face` at `offset`, as deep as the wall.
pub fn screw_hole(
    config: &BuildConfig,
    face: FaceSelector,
    offset: [f64; 2],
    wall: f64,
) -> HoleSpec {
    HoleSpec {
        face,
        offset,
        diameter: config.hole_diameter,
        depth: wall,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_enabled_order_is_fixed() {
        let p = ConnectorParameters::new(20.0, 10.0, 30.0)
            .with_screw_holes(true)
            .with_taper(true);
        assert_eq!(
            FeatureApplier::enabled(&p),
            vec![FeatureApplier::Taper, FeatureApplier::ScrewHoles]
        );
    }

    #[test]
    fn test_taper_depth_clamps() {
        let cfg = BuildConfig::default();
        assert_relative_eq!(taper_depth(&cfg, 66.0, Some(3.0)), 2.0);
        assert_relative_eq!(taper_depth(&cfg, 66.0, Some(1.2)), 1.2);
        assert_relative_eq!(taper_depth(&cfg, 4.0, None), 1.0);
    }

    #[test]
    fn test_rib_thickness_stays_below_wall() {
        let cfg = BuildConfig::default();
        for wall in [0.2, 0.5, 0.8, 1.0, 3.0, 10.0] {
            assert!(rib_thickness(&cfg, wall) < wall);
            assert!(segment_rib_thickness(&cfg, wall) < wall);
            assert!(segment_rib_thickness(&cfg, wall) > 0.0);
        }
        assert_relative_eq!(segment_rib_thickness(&cfg, 3.0), 2.0);
        assert_relative_eq!(segment_rib_thickness(&cfg, 0.4), 0.2);
    }

    #[test]
    fn test_rib_positions() {
        let cfg = BuildConfig::default();
        assert_eq!(rib_positions(&cfg, 36.0), vec![0.0]);
        let ribs = rib_positions(&cfg, 80.0);
        assert_eq!(ribs.len(), 3);
        assert_relative_eq!(ribs[0], -20.0);
        assert_relative_eq!(ribs[1], 0.0);
        assert_relative_eq!(ribs[2], 20.0);
    }

    #[test]
    fn test_depth_hole_thresholds() {
        let cfg = BuildConfig::default();
        assert!(depth_hole_offsets(&cfg, 20.0).is_empty());
        assert_eq!(depth_hole_offsets(&cfg, 36.0), vec![-9.0, 9.0]);
        assert_eq!(depth_hole_offsets(&cfg, 40.0).len(), 2);
        assert_eq!(depth_hole_offsets(&cfg, 48.0), vec![-12.0, 12.0, -6.0, 6.0]);
    }
}
