use serde::{Deserialize, Serialize};

use crate::topology::Topology;

/// Default material thickness around the board cavity, in millimetres.
pub const DEFAULT_WALL_THICKNESS: f64 = 3.0;
/// Default clearance added to every cavity dimension, in millimetres.
pub const DEFAULT_TOLERANCE: f64 = 0.2;
/// Default corner angle for the angle connector, in degrees.
pub const DEFAULT_ANGLE: f64 = 90.0;

/// Parameters for a single connector build.
///
/// Read-only input to the shape builder. All lengths are millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorParameters {
    /// Width of the board being joined.
    pub board_width: f64,
    /// Thickness of the board being joined.
    pub board_thickness: f64,
    /// How far the board reaches into the connector.
    pub board_depth: f64,
    /// Material thickness surrounding the board cavity.
    #[serde(default = "default_wall_thickness")]
    pub wall_thickness: f64,
    /// Clearance added to cavity dimensions so the board slides in.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Cut a lead-in at cavity entrances.
    #[serde(default)]
    pub add_taper: bool,
    /// Union reinforcement ribs.
    #[serde(default)]
    pub add_ribs: bool,
    /// Drill 5 mm screw holes.
    #[serde(default)]
    pub add_screw_holes: bool,
    /// Corner angle in degrees. Only read by the angle connector.
    #[serde(default = "default_angle")]
    pub angle: f64,
}

fn default_wall_thickness() -> f64 {
    DEFAULT_WALL_THICKNESS
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

fn default_angle() -> f64 {
    DEFAULT_ANGLE
}

/// A parameter that failed validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{field} {problem} (got {value})")]
pub struct ParameterError {
    /// Name of the offending field.
    pub field: &'static str,
    /// What is wrong with it.
    pub problem: &'static str,
    /// The rejected value.
    pub value: f64,
}

impl ConnectorParameters {
    /// Create parameters for a board with default wall, tolerance and no features.
    pub fn new(board_width: f64, board_thickness: f64, board_depth: f64) -> Self {
        Self {
            board_width,
            board_thickness,
            board_depth,
            wall_thickness: DEFAULT_WALL_THICKNESS,
            tolerance: DEFAULT_TOLERANCE,
            add_taper: false,
            add_ribs: false,
            add_screw_holes: false,
            angle: DEFAULT_ANGLE,
        }
    }

    pub fn with_wall_thickness(mut self, wall_thickness: f64) -> Self {
        self.wall_thickness = wall_thickness;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_taper(mut self, enabled: bool) -> Self {
        self.add_taper = enabled;
        self
    }

    pub fn with_ribs(mut self, enabled: bool) -> Self {
        self.add_ribs = enabled;
        self
    }

    pub fn with_screw_holes(mut self, enabled: bool) -> Self {
        self.add_screw_holes = enabled;
        self
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Turn every optional feature on.
    pub fn with_all_features(self) -> Self {
        self.with_taper(true).with_ribs(true).with_screw_holes(true)
    }

    /// Check every dimension before any geometry is requested.
    ///
    /// The angle is only checked for [`Topology::Angle`].
    pub fn validate(&self, topology: Topology) -> Result<(), ParameterError> {
        let lengths = [
            ("board_width", self.board_width),
            ("board_thickness", self.board_thickness),
            ("board_depth", self.board_depth),
            ("wall_thickness", self.wall_thickness),
        ];
        for (field, value) in lengths {
            if !value.is_finite() {
                return Err(ParameterError {
                    field,
                    problem: "must be a finite number",
                    value,
                });
            }
            if value <= 0.0 {
                return Err(ParameterError {
                    field,
                    problem: "must be positive",
                    value,
                });
            }
        }

        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ParameterError {
                field: "tolerance",
                problem: "must be a finite non-negative number",
                value: self.tolerance,
            });
        }

        if topology == Topology::Angle
            && !(self.angle.is_finite() && self.angle > 0.0 && self.angle < 360.0)
        {
            return Err(ParameterError {
                field: "angle",
                problem: "must be strictly between 0 and 360 degrees",
                value: self.angle,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> ConnectorParameters {
        ConnectorParameters::new(20.0, 10.0, 30.0)
    }

    #[test]
    fn test_defaults_match_documented_values() {
        let p = board();
        assert_eq!(p.wall_thickness, 3.0);
        assert_eq!(p.tolerance, 0.2);
        assert_eq!(p.angle, 90.0);
        assert!(!p.add_taper && !p.add_ribs && !p.add_screw_holes);
    }

    #[test]
    fn test_valid_parameters_pass_for_every_topology() {
        for topology in Topology::ALL {
            assert!(board().with_all_features().validate(topology).is_ok());
        }
    }

    #[test]
    fn test_zero_width_rejected() {
        let mut p = board();
        p.board_width = 0.0;
        let err = p.validate(Topology::EndToEnd).unwrap_err();
        assert_eq!(err.field, "board_width");
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let err = board()
            .with_tolerance(-1.0)
            .validate(Topology::Cross)
            .unwrap_err();
        assert_eq!(err.field, "tolerance");
    }

    #[test]
    fn test_zero_tolerance_allowed() {
        assert!(board().with_tolerance(0.0).validate(Topology::Cross).is_ok());
    }

    #[test]
    fn test_angle_only_checked_for_angle_topology() {
        let p = board().with_angle(400.0);
        assert_eq!(p.validate(Topology::Angle).unwrap_err().field, "angle");
        assert!(p.validate(Topology::EndToEnd).is_ok());
    }

    #[test]
    fn test_angle_bounds_are_exclusive() {
        assert!(board().with_angle(0.0).validate(Topology::Angle).is_err());
        assert!(board().with_angle(360.0).validate(Topology::Angle).is_err());
        assert!(board().with_angle(45.0).validate(Topology::Angle).is_ok());
    }

    #[test]
    fn test_nan_wall_rejected() {
        let err = board()
            .with_wall_thickness(f64::NAN)
            .validate(Topology::EndToEnd)
            .unwrap_err();
        assert_eq!(err.field, "wall_thickness");
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let p: ConnectorParameters = serde_json::from_str(
            r#"{"board_width": 20, "board_thickness": 10, "board_depth": 30, "add_ribs": true}"#,
        )
        .unwrap();
        assert_eq!(p.wall_thickness, 3.0);
        assert_eq!(p.tolerance, 0.2);
        assert!(p.add_ribs);
        assert!(!p.add_taper);
    }
}
