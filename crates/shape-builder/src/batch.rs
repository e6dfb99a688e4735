//! Parallel generation of several topologies from one parameter set.

use connector_types::{ConnectorParameters, Topology};
use geom_kernel::{Kernel, KernelSolidHandle};
use rayon::prelude::*;
use tracing::info;

use crate::builder::ShapeBuilder;
use crate::types::BuildError;

/// Outcome of one topology in a batch.
#[derive(Debug)]
pub struct BatchOutcome<T, E> {
    pub topology: Topology,
    pub result: Result<T, E>,
}

/// Build every topology in parallel, each on its own kernel.
///
/// Solid handles only mean something to the kernel that made them, so
/// `finish` runs on the same thread and kernel as the build, and whatever it
/// returns is collected. Results come back in the order of `topologies`.
pub fn build_batch<K, T, E, M, F>(
    builder: &ShapeBuilder,
    params: &ConnectorParameters,
    topologies: &[Topology],
    make_kernel: M,
    finish: F,
) -> Vec<BatchOutcome<T, E>>
where
    K: Kernel,
    T: Send,
    E: From<BuildError> + Send,
    M: Fn() -> K + Sync,
    F: Fn(&mut K, Topology, KernelSolidHandle) -> Result<T, E> + Sync,
{
    info!(count = topologies.len(), "building batch");
    topologies
        .par_iter()
        .map(|&topology| {
            let mut kernel = make_kernel();
            let result = builder
                .build(&mut kernel, params, topology)
                .map_err(E::from)
                .and_then(|solid| finish(&mut kernel, topology, solid));
            BatchOutcome { topology, result }
        })
        .collect()
}
