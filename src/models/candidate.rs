use serde::{Deserialize, Serialize};
use crate::models::Stage;

/// A candidate's entry on the interview pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub id: i64,
    pub name: String,
    pub job_id: i64,
    pub job_title: String,
    pub stage: Stage,
    pub days_in_stage: u32, // Reset to 0 whenever stage changes
}

impl CandidateRecord {
    pub fn new(id: i64, name: &str, job_id: i64, job_title: &str, stage: Stage, days_in_stage: u32) -> Self {
        Self {
            id,
            name: name.to_string(),
            job_id,
            job_title: job_title.to_string(),
            stage,
            days_in_stage,
        }
    }

    /// Initials for compact board cards (e.g. "SJ" for "Sarah Johnson")
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(|c| c.to_uppercase())
            .collect()
    }
}
