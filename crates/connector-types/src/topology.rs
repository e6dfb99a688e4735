use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the eight connector shape families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    /// Straight connector joining two boards end to end.
    EndToEnd,
    /// L-shaped connector with a solid corner.
    Angle,
    /// T-shaped connector.
    TConn,
    /// Cross-shaped connector.
    Cross,
    /// Minimal single-board straight segment.
    SingleSlotSegment,
    /// Compact corner block.
    CornerSegment,
    /// T junction at segment scale.
    TJunctionSegment,
    /// Cross junction at segment scale.
    CrossJunctionSegment,
}

impl Topology {
    pub const ALL: [Topology; 8] = [
        Topology::EndToEnd,
        Topology::Angle,
        Topology::TConn,
        Topology::Cross,
        Topology::SingleSlotSegment,
        Topology::CornerSegment,
        Topology::TJunctionSegment,
        Topology::CrossJunctionSegment,
    ];

    /// Stable snake_case name, also used as the output filename suffix.
    pub fn name(self) -> &'static str {
        match self {
            Topology::EndToEnd => "end_to_end",
            Topology::Angle => "angle",
            Topology::TConn => "t_conn",
            Topology::Cross => "cross",
            Topology::SingleSlotSegment => "single_slot_segment",
            Topology::CornerSegment => "corner_segment",
            Topology::TJunctionSegment => "t_junction_segment",
            Topology::CrossJunctionSegment => "cross_junction_segment",
        }
    }

    /// Whether this is one of the segment variants meant for later assembly.
    pub fn is_segment(self) -> bool {
        matches!(
            self,
            Topology::SingleSlotSegment
                | Topology::CornerSegment
                | Topology::TJunctionSegment
                | Topology::CrossJunctionSegment
        )
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unrecognised topology name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown topology: {0}")]
pub struct UnknownTopology(pub String);

impl FromStr for Topology {
    type Err = UnknownTopology;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(&['-', ' '][..], "_");
        Topology::ALL
            .into_iter()
            .find(|t| t.name() == normalized)
            .ok_or_else(|| UnknownTopology(s.to_string()))
    }
}
