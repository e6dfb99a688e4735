use connector_types::ParameterError;
use serde::{Deserialize, Serialize};

/// Fixed sizes and thresholds used while laying out connector features.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Diameter of every screw hole.
    pub hole_diameter: f64,
    /// Upper bound on any taper depth.
    pub max_taper_depth: f64,
    /// How much wider the mouth of a straight connector's wedge is than the slot.
    pub wedge_flare: f64,
    /// How much wider a cross slot's lead-in wedge is than the slot.
    pub slot_wedge_flare: f64,
    /// Preferred rib thickness on the full-size connectors, clamped to half the wall.
    pub rib_thickness: f64,
    /// Preferred rib thickness on segments and the cross, clamped to wall minus 0.5.
    pub segment_rib_thickness: f64,
    /// Target distance between ribs on segment runs.
    pub rib_spacing: f64,
    /// Depth above which a pair of holes is placed.
    pub hole_depth_threshold: f64,
    /// Depth above which an inner pair of holes is added.
    pub inner_hole_depth_threshold: f64,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            hole_diameter: 5.0,
            max_taper_depth: 2.0,
            wedge_flare: 1.0,
            slot_wedge_flare: 2.0,
            rib_thickness: 1.5,
            segment_rib_thickness: 2.0,
            rib_spacing: 20.0,
            hole_depth_threshold: 20.0,
            inner_hole_depth_threshold: 40.0,
        }
    }
}

impl BuildConfig {
    /// Reject sizes and thresholds no connector can be laid out with.
    ///
    /// Configs loaded from files skip the defaults, so this runs before every plan.
    pub fn validate(&self) -> Result<(), ParameterError> {
        let positive = [
            ("hole_diameter", self.hole_diameter),
            ("max_taper_depth", self.max_taper_depth),
            ("rib_thickness", self.rib_thickness),
            ("segment_rib_thickness", self.segment_rib_thickness),
            ("rib_spacing", self.rib_spacing),
            ("hole_depth_threshold", self.hole_depth_threshold),
            ("inner_hole_depth_threshold", self.inner_hole_depth_threshold),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ParameterError {
                    field,
                    problem: "must be a finite positive number",
                    value,
                });
            }
        }

        for (field, value) in [
            ("wedge_flare", self.wedge_flare),
            ("slot_wedge_flare", self.slot_wedge_flare),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ParameterError {
                    field,
                    problem: "must be a finite non-negative number",
                    value,
                });
            }
        }

        if self.hole_depth_threshold > self.inner_hole_depth_threshold {
            return Err(ParameterError {
                field: "hole_depth_threshold",
                problem: "must not exceed inner_hole_depth_threshold",
                value: self.hole_depth_threshold,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(BuildConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_rib_spacing_is_rejected() {
        let config = BuildConfig {
            rib_spacing: 0.0,
            ..BuildConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.field, "rib_spacing");
    }

    #[test]
    fn test_non_finite_and_negative_values_are_rejected() {
        let nan_hole = BuildConfig {
            hole_diameter: f64::NAN,
            ..BuildConfig::default()
        };
        assert_eq!(nan_hole.validate().unwrap_err().field, "hole_diameter");

        let no_taper = BuildConfig {
            max_taper_depth: -1.0,
            ..BuildConfig::default()
        };
        assert_eq!(no_taper.validate().unwrap_err().field, "max_taper_depth");

        let pinched = BuildConfig {
            wedge_flare: -0.5,
            ..BuildConfig::default()
        };
        assert_eq!(pinched.validate().unwrap_err().field, "wedge_flare");
    }

    #[test]
    fn test_thresholds_must_be_ordered() {
        let config = BuildConfig {
            hole_depth_threshold: 50.0,
            inner_hole_depth_threshold: 40.0,
            ..BuildConfig::default()
        };
        assert_eq!(config.validate().unwrap_err().field, "hole_depth_threshold");
        let equal = BuildConfig {
            hole_depth_threshold: 40.0,
            ..BuildConfig::default()
        };
        assert!(equal.validate().is_ok());
    }
}
