//! `ConnectorBench`: fluent API for building named connectors on one kernel
//! and checking them.

use std::collections::HashMap;

use connector_types::{ConnectorParameters, Topology};
use file_export::{export_bytes, ExportFormat, ExportOptions};
use geom_kernel::{BoundingBox, Kernel, KernelSolidHandle, MockKernel, RenderMesh, TruckKernel};
use shape_builder::{execute_plan, BuildConfig, BuildPlan, ShapeBuilder};

use crate::helpers::HarnessError;
use crate::oracle::{self, OracleVerdict};

/// One connector built on the bench.
#[derive(Debug, Clone)]
pub struct BenchEntry {
    pub name: String,
    pub topology: Topology,
    pub params: ConnectorParameters,
    pub plan: BuildPlan,
    pub solid: KernelSolidHandle,
}

/// Builds named connectors on a single kernel and keeps their plans and
/// solids around for checks.
pub struct ConnectorBench<K: Kernel> {
    kernel: K,
    builder: ShapeBuilder,
    entries: HashMap<String, BenchEntry>,
    order: Vec<String>,
    errors: Vec<(String, String)>,
}

impl ConnectorBench<MockKernel> {
    pub fn mock() -> Self {
        Self::new(MockKernel::new())
    }
}

impl ConnectorBench<TruckKernel> {
    pub fn truck() -> Self {
        Self::new(TruckKernel::new())
    }
}

impl<K: Kernel> ConnectorBench<K> {
    pub fn new(kernel: K) -> Self {
        Self {
            kernel,
            builder: ShapeBuilder::default(),
            entries: HashMap::new(),
            order: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: BuildConfig) -> Self {
        self.builder = ShapeBuilder::new(config);
        self
    }

    pub fn config(&self) -> &BuildConfig {
        self.builder.config()
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    pub fn kernel_mut(&mut self) -> &mut K {
        &mut self.kernel
    }

    /// Plan and build a connector under `name`.
    ///
    /// Failures are also recorded for [`ConnectorBench::errors`].
    pub fn build(
        &mut self,
        name: &str,
        topology: Topology,
        params: &ConnectorParameters,
    ) -> Result<&mut Self, HarnessError> {
        if self.entries.contains_key(name) {
            return Err(HarnessError::DuplicateName {
                name: name.to_string(),
            });
        }
        let result = self
            .builder
            .plan(params, topology)
            .and_then(|plan| Ok((execute_plan(&mut self.kernel, &plan)?, plan)));
        let (solid, plan) = match result {
            Ok(built) => built,
            Err(e) => {
                self.errors.push((name.to_string(), e.to_string()));
                return Err(e.into());
            }
        };
        self.entries.insert(
            name.to_string(),
            BenchEntry {
                name: name.to_string(),
                topology,
                params: params.clone(),
                plan,
                solid,
            },
        );
        self.order.push(name.to_string());
        Ok(self)
    }

    /// Build every topology for `params`, named by topology.
    pub fn build_all(&mut self, params: &ConnectorParameters) -> Result<&mut Self, HarnessError> {
        for topology in Topology::ALL {
            self.build(topology.name(), topology, params)?;
        }
        Ok(self)
    }

    pub fn entry(&self, name: &str) -> Result<&BenchEntry, HarnessError> {
        self.entries
            .get(name)
            .ok_or_else(|| HarnessError::ConnectorNotFound {
                name: name.to_string(),
            })
    }

    /// Entries in build order.
    pub fn entries(&self) -> impl Iterator<Item = &BenchEntry> {
        self.order.iter().filter_map(|n| self.entries.get(n))
    }

    /// Build failures as (name, message).
    pub fn errors(&self) -> &[(String, String)] {
        &self.errors
    }

    pub fn solid(&self, name: &str) -> Result<KernelSolidHandle, HarnessError> {
        Ok(self.entry(name)?.solid.clone())
    }

    pub fn plan(&self, name: &str) -> Result<&BuildPlan, HarnessError> {
        Ok(&self.entry(name)?.plan)
    }

    pub fn bounding_box(&self, name: &str) -> Result<BoundingBox, HarnessError> {
        let solid = self.solid(name)?;
        Ok(self.kernel.bounding_box(&solid)?)
    }

    pub fn tessellate(&mut self, name: &str) -> Result<RenderMesh, HarnessError> {
        let solid = self.solid(name)?;
        Ok(self
            .kernel
            .tessellate(&solid, file_export::DEFAULT_STL_TOLERANCE)?)
    }

    pub fn export(&mut self, name: &str, format: ExportFormat) -> Result<Vec<u8>, HarnessError> {
        let solid = self.solid(name)?;
        Ok(export_bytes(
            &mut self.kernel,
            &solid,
            format,
            name,
            &ExportOptions::default(),
        )?)
    }

    pub fn export_stl(&mut self, name: &str) -> Result<Vec<u8>, HarnessError> {
        self.export(name, ExportFormat::Stl)
    }

    /// Plan oracles plus an envelope check of the realized solid.
    pub fn verify(&self, name: &str, envelope_eps: f64) -> Result<Vec<OracleVerdict>, HarnessError> {
        let entry = self.entry(name)?;
        let mut verdicts =
            oracle::run_plan_checks(&entry.plan, &entry.params, self.config().max_taper_depth);
        let bb = self.kernel.bounding_box(&entry.solid)?;
        verdicts.push(oracle::check_envelope(&entry.plan, &bb, envelope_eps));
        Ok(verdicts)
    }

    /// Fail with every failed verdict of [`ConnectorBench::verify`].
    pub fn assert_verified(&self, name: &str, envelope_eps: f64) -> Result<(), HarnessError> {
        crate::assertions::assert_all_pass(&self.verify(name, envelope_eps)?, name)
    }
}
