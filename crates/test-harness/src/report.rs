//! Structured text report of everything built on a bench.

use std::fmt;

use connector_types::{Stage, Topology};
use geom_kernel::{BoundingBox, Kernel};
use shape_builder::Step;

use crate::oracle::OracleVerdict;
use crate::workflow::ConnectorBench;

const STAGES: [Stage; 5] = [
    Stage::Construction,
    Stage::SlotCut,
    Stage::Taper,
    Stage::Rib,
    Stage::Hole,
];

/// A complete bench report.
pub struct ConnectorReport {
    pub entries: Vec<ConnectorEntry>,
    pub errors: Vec<(String, String)>,
}

/// One connector's section of the report.
pub struct ConnectorEntry {
    pub name: String,
    pub topology: Topology,
    /// (stage, step count) for stages with at least one step.
    pub stage_counts: Vec<(Stage, usize)>,
    pub steps: Vec<String>,
    pub bounding_box: Option<BoundingBox>,
    pub oracle_results: Vec<OracleVerdict>,
}

impl ConnectorReport {
    /// Collect plans, bounding boxes and oracle verdicts from a bench.
    pub fn generate<K: Kernel>(bench: &ConnectorBench<K>, envelope_eps: f64) -> Self {
        let entries = bench
            .entries()
            .map(|entry| {
                let plan = &entry.plan;
                let stage_counts = STAGES
                    .into_iter()
                    .map(|stage| {
                        let seed = usize::from(stage == Stage::Construction);
                        (stage, plan.steps_in(stage).count() + seed)
                    })
                    .filter(|&(_, n)| n > 0)
                    .collect();
                let steps = plan
                    .steps
                    .iter()
                    .map(|s| {
                        let verb = match s.step {
                            Step::Union { .. } => "union",
                            Step::Subtract { .. } => "subtract",
                            Step::Hole { .. } => "hole",
                        };
                        format!("{} {verb} \"{}\"", s.stage, s.label)
                    })
                    .collect();
                ConnectorEntry {
                    name: entry.name.clone(),
                    topology: entry.topology,
                    stage_counts,
                    steps,
                    bounding_box: bench.bounding_box(&entry.name).ok(),
                    oracle_results: bench.verify(&entry.name, envelope_eps).unwrap_or_default(),
                }
            })
            .collect();
        Self {
            entries,
            errors: bench.errors().to_vec(),
        }
    }

    pub fn all_passed(&self) -> bool {
        self.errors.is_empty()
            && self
                .entries
                .iter()
                .all(|e| e.oracle_results.iter().all(|v| v.passed))
    }

    /// Format the report as text.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("=== Connector Report ===\n\n");
        out.push_str(&format!(
            "Connectors ({} built, {} errors):\n",
            self.entries.len(),
            self.errors.len()
        ));

        for entry in &self.entries {
            out.push_str(&format!("\n  \"{}\" [{}]\n", entry.name, entry.topology));
            let counts: Vec<String> = entry
                .stage_counts
                .iter()
                .map(|(stage, n)| format!("{stage}={n}"))
                .collect();
            out.push_str(&format!("      Stages: {}\n", counts.join(", ")));
            for step in &entry.steps {
                out.push_str(&format!("      - {step}\n"));
            }
            if let Some(bb) = &entry.bounding_box {
                let [x, y, z] = bb.size();
                out.push_str(&format!("      Size: {x:.2} x {y:.2} x {z:.2}\n"));
            }
            for v in &entry.oracle_results {
                let status = if v.passed { "PASS" } else { "FAIL" };
                out.push_str(&format!("      [{status}] {}: {}\n", v.oracle_name, v.detail));
            }
        }

        if self.errors.is_empty() {
            out.push_str("\nErrors: none\n");
        } else {
            out.push_str(&format!("\nErrors ({}):\n", self.errors.len()));
            for (name, msg) in &self.errors {
                out.push_str(&format!("  \"{name}\": {msg}\n"));
            }
        }
        out
    }
}

impl fmt::Display for ConnectorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
