use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ExportError;

/// Interchange formats a connector can be written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Step,
    Stl,
    Dxf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Step, ExportFormat::Stl, ExportFormat::Dxf];

    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Step => "step",
            ExportFormat::Stl => "stl",
            ExportFormat::Dxf => "dxf",
        }
    }

    /// Whether the writer needs a triangle mesh rather than the B-rep.
    pub fn is_mesh(self) -> bool {
        !matches!(self, ExportFormat::Step)
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "step" | "stp" => Ok(ExportFormat::Step),
            "stl" => Ok(ExportFormat::Stl),
            "dxf" => Ok(ExportFormat::Dxf),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("STEP".parse::<ExportFormat>().unwrap(), ExportFormat::Step);
        assert_eq!("stp".parse::<ExportFormat>().unwrap(), ExportFormat::Step);
        assert_eq!("Stl".parse::<ExportFormat>().unwrap(), ExportFormat::Stl);
        assert_eq!(" dxf ".parse::<ExportFormat>().unwrap(), ExportFormat::Dxf);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        match "XYZ".parse::<ExportFormat>() {
            Err(ExportError::UnsupportedFormat(s)) => assert_eq!(s, "XYZ"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_display_matches_extension() {
        for format in ExportFormat::ALL {
            assert_eq!(format.to_string(), format.extension());
        }
        assert!(!ExportFormat::Step.is_mesh());
        assert!(ExportFormat::Dxf.is_mesh());
    }
}
