// Pipeline operators exercised through the public library API

use recruit::models::{CandidateRecord, Stage};
use recruit::pipeline::{breaches, group_by_stage, is_sla_breach, transition, Direction};

fn record(id: i64, stage: Stage, days: u32) -> CandidateRecord {
    CandidateRecord::new(id, &format!("Candidate {}", id), 1, "Frontend Developer", stage, days)
}

fn board() -> Vec<CandidateRecord> {
    vec![
        record(1, Stage::Screening, 3),
        record(4, Stage::Screening, 5),
        record(2, Stage::Technical, 7),
        record(3, Stage::Task, 4),
        record(7, Stage::Hr, 1),
        record(8, Stage::Final, 2),
    ]
}

#[test]
fn test_backward_at_first_stage_is_noop() {
    let records = board();
    assert_eq!(transition(&records, 1, Direction::Backward), records);
}

#[test]
fn test_forward_at_last_stage_is_noop() {
    let records = board();
    assert_eq!(transition(&records, 8, Direction::Forward), records);
}

#[test]
fn test_forward_then_backward_returns_to_stage_with_days_reset() {
    let records = board();
    let moved = transition(&records, 3, Direction::Forward);
    let rec = moved.iter().find(|r| r.id == 3).unwrap();
    assert_eq!(rec.stage, Stage::Hr);
    assert_eq!(rec.days_in_stage, 0);

    let back = transition(&moved, 3, Direction::Backward);
    let rec = back.iter().find(|r| r.id == 3).unwrap();
    assert_eq!(rec.stage, Stage::Task);
    assert_eq!(rec.days_in_stage, 0);

    // Nobody else changed and the input was left alone
    for (before, after) in records.iter().zip(back.iter()).filter(|(b, _)| b.id != 3) {
        assert_eq!(before, after);
    }
    assert_eq!(records[3].days_in_stage, 4);
}

#[test]
fn test_unknown_id_is_noop() {
    let records = board();
    assert_eq!(transition(&records, 404, Direction::Forward), records);
    assert_eq!(transition(&[], 1, Direction::Backward), Vec::<CandidateRecord>::new());
}

#[test]
fn test_walk_to_the_end_and_back() {
    let mut records = vec![record(1, Stage::Screening, 9)];
    for expected in &Stage::ALL[1..] {
        records = transition(&records, 1, Direction::Forward);
        assert_eq!(records[0].stage, *expected);
    }
    records = transition(&records, 1, Direction::Forward);
    assert_eq!(records[0].stage, Stage::Final);

    for expected in Stage::ALL[..4].iter().rev() {
        records = transition(&records, 1, Direction::Backward);
        assert_eq!(records[0].stage, *expected);
    }
}

#[test]
fn test_grouping_partitions_records() {
    let records = board();
    let view = group_by_stage(&records, None);

    let total: usize = view.groups.iter().map(|g| g.records.len()).sum();
    assert_eq!(total, records.len());
    for group in &view.groups {
        assert!(group.records.iter().all(|r| r.stage == group.stage));
    }
    let ids: Vec<i64> = view.group(Stage::Screening).iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 4]);
}

#[test]
fn test_sla_threshold_boundary() {
    assert!(!is_sla_breach(7));
    assert!(is_sla_breach(8));
}

#[test]
fn test_only_breaching_record_is_flagged() {
    let records = vec![record(1, Stage::Screening, 3), record(2, Stage::Screening, 9)];
    let view = group_by_stage(&records, None);
    assert_eq!(view.group(Stage::Screening).len(), 2);

    let flagged: Vec<i64> = breaches(&records).iter().map(|r| r.id).collect();
    assert_eq!(flagged, vec![2]);
}
