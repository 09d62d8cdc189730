// Interview pipeline operations
//
// Pure functions over in-memory candidate records. The ledger loads records,
// runs them through these operators, and writes back what changed.

pub mod transition;
pub mod sla;
pub mod view;

pub use transition::{apply_transition, transition, Direction};
pub use sla::{breaches, is_sla_breach, SLA_THRESHOLD_DAYS};
pub use view::{filter_by_job, group_by_stage, unique_jobs, PipelineView, StageGroup};
