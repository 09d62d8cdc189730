use rusqlite::{Connection, OptionalExtension, Row};
use crate::models::{CandidateRecord, Stage};
use crate::repo::enum_column;
use crate::utils::days_since;
use anyhow::{Context, Result};

/// Pipeline candidate repository
pub struct CandidateRepo;

const SELECT_RECORD: &str =
    "SELECT c.id, c.name, c.job_id, COALESCE(j.title, 'Unknown Role'), c.stage, c.stage_entered_ts
     FROM pipeline_candidates c LEFT JOIN jobs j ON j.id = c.job_id";

fn record_from_row(row: &Row, now: i64) -> rusqlite::Result<CandidateRecord> {
    let entered_ts: i64 = row.get(5)?;
    Ok(CandidateRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        job_id: row.get(2)?,
        job_title: row.get(3)?,
        stage: enum_column(row, 4, "stage", Stage::from_name)?,
        days_in_stage: days_since(entered_ts, now),
    })
}

impl CandidateRepo {
    /// Load every pipeline record in board order, with days in stage as of `now`
    pub fn list_all(conn: &Connection, now: i64) -> Result<Vec<CandidateRecord>> {
        let mut stmt = conn.prepare(&format!("{} ORDER BY c.position, c.id", SELECT_RECORD))?;
        let rows = stmt.query_map([], |row| record_from_row(row, now))?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.context("Failed to load pipeline candidates")?);
        }
        Ok(records)
    }

    pub fn get_by_id(conn: &Connection, id: i64, now: i64) -> Result<Option<CandidateRecord>> {
        let mut stmt = conn.prepare(&format!("{} WHERE c.id = ?1", SELECT_RECORD))?;
        let record = stmt.query_row([id], |row| record_from_row(row, now)).optional()
            .with_context(|| format!("Failed to load pipeline candidate {}", id))?;
        Ok(record)
    }

    /// Persist a record's stage. Entering a stage restarts its day count at `now`.
    pub fn save_stage(conn: &Connection, record: &CandidateRecord, now: i64) -> Result<()> {
        let entered_ts = now - i64::from(record.days_in_stage) * crate::utils::SECS_PER_DAY;
        let updated = conn.execute(
            "UPDATE pipeline_candidates SET stage = ?1, stage_entered_ts = ?2, modified_ts = ?3 WHERE id = ?4",
            rusqlite::params![record.stage.key(), entered_ts, now, record.id],
        )
        .with_context(|| format!("Failed to update stage for candidate {}", record.id))?;

        if updated == 0 {
            anyhow::bail!("No pipeline candidate found with id={}", record.id);
        }
        log::info!("Candidate {} now in stage '{}'", record.id, record.stage.key());
        Ok(())
    }
}
