use anyhow::Result;
use clap::Parser;
use connector_cli::{generate, Cli};
use geom_kernel::TruckKernel;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let kernel_tolerance = cli.kernel_tolerance;
    let paths = generate(&cli, || match kernel_tolerance {
        Some(t) => TruckKernel::with_tolerance(t),
        None => TruckKernel::new(),
    })?;
    for path in paths {
        println!("{}", path.display());
    }
    Ok(())
}
