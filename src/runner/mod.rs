//! Bootstrap orchestration.

pub mod pipeline;
pub mod plan;

pub use pipeline::{BootstrapPipeline, BootstrapSummary};
pub use plan::{plan, BootstrapPlan, PlannedDependency};
