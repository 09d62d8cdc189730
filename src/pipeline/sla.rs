// SLA breach flagging (display only, never enforced)

use crate::models::CandidateRecord;

/// Days a candidate may spend in one stage before it counts as a breach
pub const SLA_THRESHOLD_DAYS: u32 = 7;

pub fn is_sla_breach(days_in_stage: u32) -> bool {
    days_in_stage > SLA_THRESHOLD_DAYS
}

/// Records currently over the SLA threshold, in input order
pub fn breaches(records: &[CandidateRecord]) -> Vec<&CandidateRecord> {
    records.iter().filter(|r| is_sla_breach(r.days_in_stage)).collect()
}
