use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use connector_types::{ConnectorParameters, Topology};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ExportError;
use crate::format::ExportFormat;

/// Record written next to an exported file describing how it was made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportManifest {
    pub id: Uuid,
    pub created: DateTime<Utc>,
    pub topology: Topology,
    pub format: ExportFormat,
    pub parameters: ConnectorParameters,
    /// File name of the export this manifest describes.
    pub file: String,
}

impl ExportManifest {
    /// New manifest with a fresh id and the current timestamp.
    pub fn new(
        topology: Topology,
        format: ExportFormat,
        parameters: ConnectorParameters,
        file: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created: Utc::now(),
            topology,
            format,
            parameters,
            file: file.into(),
        }
    }

    /// Path of the manifest belonging to `export_path`.
    pub fn path_for(export_path: &Path) -> PathBuf {
        let mut name = export_path.file_name().unwrap_or_default().to_os_string();
        name.push(".json");
        export_path.with_file_name(name)
    }
}

/// Write `manifest` as pretty JSON beside `export_path`, returning its path.
pub fn write_manifest(manifest: &ExportManifest, export_path: &Path) -> Result<PathBuf, ExportError> {
    let json = serde_json::to_string_pretty(manifest)
        .map_err(|e| ExportError::Manifest(e.to_string()))?;
    let path = ExportManifest::path_for(export_path);
    std::fs::write(&path, json).map_err(|e| ExportError::io(&path, e))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_sits_beside_export() {
        let path = ExportManifest::path_for(Path::new("out/part_cross.stl"));
        assert_eq!(path, PathBuf::from("out/part_cross.stl.json"));
    }

    #[test]
    fn test_manifest_round_trips_through_json() {
        let manifest = ExportManifest::new(
            Topology::Cross,
            ExportFormat::Stl,
            ConnectorParameters::new(20.0, 10.0, 30.0),
            "part_cross.stl",
        );
        let json = serde_json::to_string(&manifest).unwrap();
        assert!(json.contains("\"topology\":\"cross\""));
        assert!(json.contains("\"format\":\"stl\""));
        let back: ExportManifest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, manifest);
    }
}
