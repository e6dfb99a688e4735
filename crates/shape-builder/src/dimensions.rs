use connector_types::{ConnectorParameters, Topology};
use serde::{Deserialize, Serialize};

/// Every length a topology layout needs, derived from the parameters.
///
/// Cavity sizes always equal the board dimension plus tolerance. Body sizes
/// wrap the board in one wall thickness on each side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedDimensions {
    pub board_width: f64,
    pub board_thickness: f64,
    pub board_depth: f64,
    pub wall: f64,
    pub tolerance: f64,
    pub slot_width: f64,
    pub slot_height: f64,
    pub body_width: f64,
    pub body_height: f64,
    /// Length of the main run: the straight body, the horizontal bar of a T,
    /// one arm of an L, or the side of a square cross or corner block.
    pub run_length: f64,
    /// Length of the T's stem or the L's second arm. Zero when absent.
    pub branch_length: f64,
    /// Size of the solid corner shared by the L's arms. Zero otherwise.
    pub corner_size: f64,
}

impl DerivedDimensions {
    pub fn derive(params: &ConnectorParameters, topology: Topology) -> Self {
        let w = params.wall_thickness;
        let tol = params.tolerance;
        let d = params.board_depth;
        let body_width = params.board_width + 2.0 * w;
        let body_height = params.board_thickness + 2.0 * w;

        let (run_length, branch_length, corner_size) = match topology {
            Topology::EndToEnd => (2.0 * d + 2.0 * w, 0.0, 0.0),
            Topology::Angle => {
                let corner = body_height;
                (d + corner, d + corner, corner)
            }
            Topology::TConn => (2.0 * d + 2.0 * w, d + 2.0 * w, 0.0),
            Topology::Cross => (2.0 * params.board_width.max(d), 0.0, 0.0),
            Topology::SingleSlotSegment => (d + 2.0 * w, 0.0, 0.0),
            Topology::CornerSegment => (params.board_thickness + 2.0 * w, 0.0, 0.0),
            Topology::TJunctionSegment => (d + 2.0 * w, (d + 2.0 * w) / 2.0, 0.0),
            Topology::CrossJunctionSegment => (params.board_width.max(d) + 2.0 * w, 0.0, 0.0),
        };

        Self {
            board_width: params.board_width,
            board_thickness: params.board_thickness,
            board_depth: d,
            wall: w,
            tolerance: tol,
            slot_width: params.board_width + tol,
            slot_height: params.board_thickness + tol,
            body_width,
            body_height,
            run_length,
            branch_length,
            corner_size,
        }
    }

    /// The shorter of the run and branch lengths, ignoring an absent branch.
    pub fn shortest_run(&self) -> f64 {
        if self.branch_length > 0.0 {
            self.run_length.min(self.branch_length)
        } else {
            self.run_length
        }
    }
}
