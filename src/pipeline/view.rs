// Board view: job filter plus per-stage grouping
//
// Views are recomputed on every call; nothing here mutates or caches.

use crate::models::{CandidateRecord, Stage};
use serde::Serialize;

/// One board column
#[derive(Debug, Clone, Serialize)]
pub struct StageGroup {
    pub stage: Stage,
    pub records: Vec<CandidateRecord>,
}

/// Records matching the job filter, grouped by stage in pipeline order
#[derive(Debug, Clone, Serialize)]
pub struct PipelineView {
    pub job_filter: Option<i64>,
    pub matched: Vec<CandidateRecord>,
    pub groups: Vec<StageGroup>,
}

impl PipelineView {
    pub fn group(&self, stage: Stage) -> &[CandidateRecord] {
        // groups always holds every stage at its own index
        &self.groups[stage.index()].records
    }

    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }

    /// (stage, count) pairs in pipeline order
    pub fn counts(&self) -> Vec<(Stage, usize)> {
        self.groups.iter().map(|g| (g.stage, g.records.len())).collect()
    }
}

/// Records for `job_id`, or every record when no filter is given
pub fn filter_by_job(records: &[CandidateRecord], job_id: Option<i64>) -> Vec<CandidateRecord> {
    match job_id {
        None => records.to_vec(),
        Some(job) => records.iter().filter(|r| r.job_id == job).cloned().collect(),
    }
}

pub fn group_by_stage(records: &[CandidateRecord], job_id: Option<i64>) -> PipelineView {
    let matched = filter_by_job(records, job_id);
    let groups = Stage::ALL
        .iter()
        .map(|&stage| StageGroup {
            stage,
            records: matched.iter().filter(|r| r.stage == stage).cloned().collect(),
        })
        .collect();

    PipelineView {
        job_filter: job_id,
        matched,
        groups,
    }
}

/// Distinct job ids present in the pipeline, in first-seen order, with their titles
pub fn unique_jobs(records: &[CandidateRecord]) -> Vec<(i64, String)> {
    let mut jobs: Vec<(i64, String)> = Vec::new();
    for r in records {
        if !jobs.iter().any(|(id, _)| *id == r.job_id) {
            jobs.push((r.job_id, r.job_title.clone()));
        }
    }
    jobs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<CandidateRecord> {
        vec![
            CandidateRecord::new(1, "Sarah Johnson", 1, "Frontend Developer", Stage::Screening, 3),
            CandidateRecord::new(4, "Michael Rodriguez", 1, "Frontend Developer", Stage::Screening, 5),
            CandidateRecord::new(3, "Emma Davis", 2, "UI/UX Designer", Stage::Task, 4),
            CandidateRecord::new(7, "David Lee", 3, "Backend Engineer", Stage::Hr, 1),
            CandidateRecord::new(9, "Robert Taylor", 3, "Backend Engineer", Stage::Final, 3),
        ]
    }

    #[test]
    fn test_grouping_partitions_records() {
        let records = sample();
        let view = group_by_stage(&records, None);
        let total: usize = view.groups.iter().map(|g| g.records.len()).sum();
        assert_eq!(total, records.len());
        for group in &view.groups {
            assert!(group.records.iter().all(|r| r.stage == group.stage));
        }
        for r in &records {
            let hits = view.groups.iter().filter(|g| g.records.contains(r)).count();
            assert_eq!(hits, 1);
        }
    }

    #[test]
    fn test_groups_follow_stage_order_and_insertion_order() {
        let view = group_by_stage(&sample(), None);
        let stages: Vec<Stage> = view.groups.iter().map(|g| g.stage).collect();
        assert_eq!(stages, Stage::ALL.to_vec());
        let screening: Vec<i64> = view.group(Stage::Screening).iter().map(|r| r.id).collect();
        assert_eq!(screening, vec![1, 4]);
        assert!(view.group(Stage::Technical).is_empty());
    }

    #[test]
    fn test_job_filter() {
        let view = group_by_stage(&sample(), Some(3));
        assert_eq!(view.matched.len(), 2);
        assert_eq!(view.counts(), vec![
            (Stage::Screening, 0),
            (Stage::Technical, 0),
            (Stage::Task, 0),
            (Stage::Hr, 1),
            (Stage::Final, 1),
        ]);

        let view = group_by_stage(&sample(), Some(99));
        assert!(view.is_empty());
        assert_eq!(view.groups.len(), Stage::ALL.len());
    }

    #[test]
    fn test_two_screening_records_group_together() {
        let records = vec![
            CandidateRecord::new(1, "A", 1, "Frontend Developer", Stage::Screening, 3),
            CandidateRecord::new(2, "B", 1, "Frontend Developer", Stage::Screening, 9),
        ];
        let view = group_by_stage(&records, None);
        assert_eq!(view.group(Stage::Screening).len(), 2);
    }

    #[test]
    fn test_unique_jobs_first_seen_order() {
        let jobs = unique_jobs(&sample());
        assert_eq!(jobs, vec![
            (1, "Frontend Developer".to_string()),
            (2, "UI/UX Designer".to_string()),
            (3, "Backend Engineer".to_string()),
        ]);
    }
}
