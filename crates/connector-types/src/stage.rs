use std::fmt;

use serde::{Deserialize, Serialize};

/// Phase of a build in which a kernel call happens.
///
/// Carried by kernel failures so callers can tell which step to adjust.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Construction,
    SlotCut,
    Taper,
    Rib,
    Hole,
    Export,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Construction => "construction",
            Stage::SlotCut => "slot-cut",
            Stage::Taper => "taper",
            Stage::Rib => "rib",
            Stage::Hole => "hole",
            Stage::Export => "export",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
