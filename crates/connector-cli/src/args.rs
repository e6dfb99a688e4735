use std::path::PathBuf;

use clap::Parser;
use connector_types::{DEFAULT_ANGLE, DEFAULT_TOLERANCE, DEFAULT_WALL_THICKNESS};
use file_export::{ExportOptions, DEFAULT_STL_TOLERANCE};

/// Generate slot connectors for joining boards.
#[derive(Parser, Debug, Clone)]
#[command(name = "connector-gen", version, long_about = None)]
pub struct Cli {
    /// Topology to build (end_to_end, angle, t_conn, cross, single_slot_segment,
    /// corner_segment, t_junction_segment, cross_junction_segment)
    #[arg(short, long, conflicts_with = "all")]
    pub topology: Option<String>,

    /// Build all eight topologies in parallel
    #[arg(long)]
    pub all: bool,

    /// Board width in millimetres
    #[arg(long = "width")]
    pub board_width: Option<f64>,

    /// Board thickness in millimetres
    #[arg(long = "thickness")]
    pub board_thickness: Option<f64>,

    /// Board insertion depth in millimetres
    #[arg(long = "depth")]
    pub board_depth: Option<f64>,

    #[arg(long = "wall", default_value_t = DEFAULT_WALL_THICKNESS)]
    pub wall_thickness: f64,

    /// Clearance added to every cavity dimension
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: f64,

    /// Angle between arms (angle topology only)
    #[arg(long, default_value_t = DEFAULT_ANGLE)]
    pub angle: f64,

    #[arg(long)]
    pub taper: bool,

    #[arg(long)]
    pub ribs: bool,

    #[arg(long)]
    pub screw_holes: bool,

    /// JSON file with connector parameters; replaces the dimension flags
    #[arg(long)]
    pub params: Option<PathBuf>,

    /// JSON file overriding build constants (hole diameter, rib spacing, ...)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format: step, stp, stl or dxf
    #[arg(short, long, default_value = "step")]
    pub format: String,

    /// Directory for generated files (created if missing)
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Base file name; the topology is appended
    #[arg(short, long, default_value = "connector")]
    pub name: String,

    /// Mesh tolerance for STL and DXF output
    #[arg(long, default_value_t = DEFAULT_STL_TOLERANCE)]
    pub stl_tolerance: f64,

    /// Write ASCII STL instead of binary
    #[arg(long)]
    pub ascii: bool,

    /// Write a JSON manifest next to each export
    #[arg(long)]
    pub manifest: bool,

    /// Also dump the build plans as JSON to this path
    #[arg(long)]
    pub plan: Option<PathBuf>,

    /// Boolean tolerance for the B-rep kernel
    #[arg(long)]
    pub kernel_tolerance: Option<f64>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            stl_tolerance: self.stl_tolerance,
            ascii: self.ascii,
        }
    }
}
