//! Batch front end: build one or all connector topologies and write them out.

pub mod args;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use connector_types::{ConnectorParameters, Topology};
use file_export::{export, output_file_name, write_manifest, ExportFormat, ExportManifest};
use geom_kernel::Kernel;
use shape_builder::{build_batch, BuildConfig, ShapeBuilder};
use tracing::{error, info};

pub use args::Cli;

/// Read a JSON file into `T`.
fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Parameters from `--params` if given, otherwise from the individual flags.
pub fn resolve_parameters(cli: &Cli) -> Result<ConnectorParameters> {
    if let Some(path) = &cli.params {
        return read_json(path);
    }
    let (Some(width), Some(thickness), Some(depth)) =
        (cli.board_width, cli.board_thickness, cli.board_depth)
    else {
        bail!("--width, --thickness and --depth are required unless --params is given");
    };
    Ok(ConnectorParameters::new(width, thickness, depth)
        .with_wall_thickness(cli.wall_thickness)
        .with_tolerance(cli.tolerance)
        .with_angle(cli.angle)
        .with_taper(cli.taper)
        .with_ribs(cli.ribs)
        .with_screw_holes(cli.screw_holes))
}

pub fn resolve_config(cli: &Cli) -> Result<BuildConfig> {
    let config: BuildConfig = cli
        .config
        .as_deref()
        .map_or_else(|| Ok(BuildConfig::default()), read_json)?;
    config.validate().context("invalid build config")?;
    Ok(config)
}

/// Topologies selected by `--all` or `--topology`.
pub fn resolve_topologies(cli: &Cli) -> Result<Vec<Topology>> {
    if cli.all {
        return Ok(Topology::ALL.to_vec());
    }
    match &cli.topology {
        Some(name) => Ok(vec![name.parse()?]),
        None => bail!("pass --topology <name> or --all"),
    }
}

/// Build and export every selected topology, each on a kernel from
/// `make_kernel`. Returns the written paths in topology order.
pub fn generate<K, M>(cli: &Cli, make_kernel: M) -> Result<Vec<PathBuf>>
where
    K: Kernel,
    M: Fn() -> K + Sync,
{
    let params = resolve_parameters(cli)?;
    let config = resolve_config(cli)?;
    let topologies = resolve_topologies(cli)?;
    // Reject the format up front so nothing is built for a bad flag.
    let format: ExportFormat = cli.format.parse()?;
    let builder = ShapeBuilder::new(config);

    if let Some(plan_path) = &cli.plan {
        let plans = topologies
            .iter()
            .map(|&t| builder.plan(&params, t))
            .collect::<Result<Vec<_>, _>>()?;
        std::fs::write(plan_path, serde_json::to_string_pretty(&plans)?)
            .with_context(|| format!("writing {}", plan_path.display()))?;
        info!(path = %plan_path.display(), "build plans written");
    }

    let options = cli.export_options();
    let outcomes = build_batch(
        &builder,
        &params,
        &topologies,
        make_kernel,
        |kernel, topology, solid| -> Result<PathBuf> {
            let file = output_file_name(&cli.name, topology, format);
            let path = cli.output_dir.join(&file);
            export(kernel, &solid, &path, format.extension(), &options)?;
            if cli.manifest {
                let manifest = ExportManifest::new(topology, format, params.clone(), file);
                write_manifest(&manifest, &path)?;
            }
            Ok(path)
        },
    );

    let mut written = Vec::with_capacity(outcomes.len());
    let mut failures = 0;
    for outcome in outcomes {
        match outcome.result {
            Ok(path) => {
                info!(topology = %outcome.topology, path = %path.display(), "written");
                written.push(path);
            }
            Err(e) => {
                error!(topology = %outcome.topology, error = %e, "generation failed");
                failures += 1;
            }
        }
    }
    if failures > 0 {
        bail!("{failures} of {} connectors failed", topologies.len());
    }
    Ok(written)
}
