pub mod dxf;
pub mod errors;
pub mod export;
pub mod format;
pub mod metadata;
pub mod naming;
pub mod stl;

pub use errors::ExportError;
pub use export::{export, export_bytes, ExportOptions, DEFAULT_STL_TOLERANCE};
pub use format::ExportFormat;
pub use metadata::{write_manifest, ExportManifest};
pub use naming::output_file_name;
