use connector_types::Topology;

use crate::format::ExportFormat;

/// Base name used when the caller gives none.
pub const DEFAULT_BASE_NAME: &str = "connector";

/// `{base}_{topology}.{ext}`, without repeating a topology suffix the base
/// already carries.
pub fn output_file_name(base: &str, topology: Topology, format: ExportFormat) -> String {
    let base = base.trim();
    let base = if base.is_empty() { DEFAULT_BASE_NAME } else { base };
    let suffix = format!("_{}", topology.name());
    let stem = if base.ends_with(&suffix) || base == topology.name() {
        base.to_string()
    } else {
        format!("{base}{suffix}")
    };
    format!("{stem}.{}", format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_topology_and_extension() {
        assert_eq!(
            output_file_name("shelf", Topology::TConn, ExportFormat::Stl),
            "shelf_t_conn.stl"
        );
    }

    #[test]
    fn test_suffix_not_repeated() {
        assert_eq!(
            output_file_name("shelf_cross", Topology::Cross, ExportFormat::Step),
            "shelf_cross.step"
        );
    }

    #[test]
    fn test_empty_base_uses_default() {
        assert_eq!(
            output_file_name("  ", Topology::Angle, ExportFormat::Dxf),
            "connector_angle.dxf"
        );
    }
}
