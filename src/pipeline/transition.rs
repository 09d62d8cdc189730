// Stage transitions for pipeline records

use crate::models::{CandidateRecord, Stage};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Target stage for a move from `stage`, or None at the terminal end
    pub fn target(&self, stage: Stage) -> Option<Stage> {
        match self {
            Direction::Forward => stage.next(),
            Direction::Backward => stage.previous(),
        }
    }
}

/// Move a single record one stage in `direction`.
///
/// Returns the previous stage when the record moved, or None when it was
/// already at the terminal end for that direction. A move always resets
/// `days_in_stage` to 0.
pub fn apply_transition(record: &mut CandidateRecord, direction: Direction) -> Option<Stage> {
    let target = direction.target(record.stage)?;
    let from = record.stage;
    record.stage = target;
    record.days_in_stage = 0;
    Some(from)
}

/// Produce a new collection with the record `id` moved one stage.
///
/// Unknown ids and moves past either end of the pipeline are no-ops: the
/// returned collection equals the input. All other records are untouched.
pub fn transition(records: &[CandidateRecord], id: i64, direction: Direction) -> Vec<CandidateRecord> {
    records
        .iter()
        .map(|r| {
            let mut r = r.clone();
            if r.id == id {
                apply_transition(&mut r, direction);
            }
            r
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: i64, stage: Stage, days: u32) -> CandidateRecord {
        CandidateRecord::new(id, &format!("Candidate {}", id), 1, "Frontend Developer", stage, days)
    }

    #[test]
    fn test_backward_at_first_stage_is_noop() {
        let records = vec![rec(1, Stage::Screening, 4)];
        let out = transition(&records, 1, Direction::Backward);
        assert_eq!(out, records);
    }

    #[test]
    fn test_forward_at_last_stage_is_noop() {
        let records = vec![rec(1, Stage::Final, 11)];
        let out = transition(&records, 1, Direction::Forward);
        assert_eq!(out, records);
    }

    #[test]
    fn test_forward_then_backward_round_trip() {
        for stage in [Stage::Technical, Stage::Task, Stage::Hr] {
            let records = vec![rec(1, stage, 5)];
            let moved = transition(&records, 1, Direction::Forward);
            assert_eq!(moved[0].stage, stage.next().unwrap());
            assert_eq!(moved[0].days_in_stage, 0);

            let back = transition(&moved, 1, Direction::Backward);
            assert_eq!(back[0].stage, stage);
            // The day counter is not restored
            assert_eq!(back[0].days_in_stage, 0);
        }
    }

    #[test]
    fn test_only_matched_record_changes() {
        let records = vec![
            rec(1, Stage::Screening, 3),
            rec(2, Stage::Screening, 9),
            rec(3, Stage::Hr, 1),
        ];
        let out = transition(&records, 2, Direction::Forward);
        assert_eq!(out[0], records[0]);
        assert_eq!(out[1].stage, Stage::Technical);
        assert_eq!(out[1].days_in_stage, 0);
        assert_eq!(out[2], records[2]);
        // Input is untouched
        assert_eq!(records[1].stage, Stage::Screening);
        assert_eq!(records[1].days_in_stage, 9);
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let records = vec![rec(1, Stage::Task, 2)];
        assert_eq!(transition(&records, 42, Direction::Forward), records);
        assert_eq!(transition(&[], 42, Direction::Backward), Vec::new());
    }

    #[test]
    fn test_apply_transition_reports_origin() {
        let mut r = rec(1, Stage::Hr, 6);
        assert_eq!(apply_transition(&mut r, Direction::Forward), Some(Stage::Hr));
        assert_eq!(r.stage, Stage::Final);
        assert_eq!(apply_transition(&mut r, Direction::Forward), None);
        assert_eq!(r.stage, Stage::Final);
    }
}
