//! Test harness for connector generation.
//!
//! Scripts builds against a kernel, checks the results and describes them.
//!
//! # Key Components
//!
//! - [`ConnectorBench`]: build, tessellate and export named connectors
//! - [`oracle`]: verification functions returning pass/fail verdicts
//! - [`report`]: structured text description of a bench
//! - [`stl`]: STL readers for checking exported files
//! - [`helpers`]: error type, parameter fixtures, mesh math
//! - [`assertions`]: assertion helpers with diagnostics

pub mod assertions;
pub mod helpers;
pub mod oracle;
pub mod report;
pub mod stl;
pub mod workflow;

pub use helpers::HarnessError;
pub use oracle::OracleVerdict;
pub use report::ConnectorReport;
pub use workflow::ConnectorBench;
