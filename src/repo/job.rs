use rusqlite::{Connection, OptionalExtension, Row};
use crate::models::{JobOpening, JobStatus};
use crate::repo::enum_column;
use anyhow::{Context, Result};

/// Title shown for job references that do not resolve
pub const UNKNOWN_ROLE: &str = "Unknown Role";

/// Job openings repository
pub struct JobRepo;

fn job_from_row(row: &Row) -> rusqlite::Result<JobOpening> {
    Ok(JobOpening {
        id: row.get(0)?,
        title: row.get(1)?,
        department: row.get(2)?,
        employment_type: row.get(3)?,
        location: row.get(4)?,
        status: enum_column(row, 5, "job status", JobStatus::from_str)?,
        applicant_count: row.get(6)?,
        posted_ts: row.get(7)?,
    })
}

impl JobRepo {
    /// List all jobs, most recently posted first
    pub fn list_all(conn: &Connection) -> Result<Vec<JobOpening>> {
        let mut stmt = conn.prepare(
            "SELECT id, title, department, employment_type, location, status, applicant_count, posted_ts
             FROM jobs ORDER BY posted_ts DESC, id"
        )?;
        let rows = stmt.query_map([], job_from_row)?;

        let mut jobs = Vec::new();
        for row in rows {
            jobs.push(row.context("Failed to load job openings")?);
        }
        Ok(jobs)
    }

    pub fn get_by_id(conn: &Connection, id: i64) -> Result<Option<JobOpening>> {
        let mut stmt = conn.prepare(
            "SELECT id, title, department, employment_type, location, status, applicant_count, posted_ts
             FROM jobs WHERE id = ?1"
        )?;
        let job = stmt.query_row([id], job_from_row).optional()
            .with_context(|| format!("Failed to load job {}", id))?;
        Ok(job)
    }

    /// Title for a job id, falling back to "Unknown Role"
    pub fn title(conn: &Connection, id: i64) -> Result<String> {
        Ok(Self::get_by_id(conn, id)?
            .map(|j| j.title)
            .unwrap_or_else(|| UNKNOWN_ROLE.to_string()))
    }

    /// Distinct departments in name order
    pub fn departments(conn: &Connection) -> Result<Vec<String>> {
        let mut stmt = conn.prepare("SELECT DISTINCT department FROM jobs ORDER BY department")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut departments = Vec::new();
        for row in rows {
            departments.push(row?);
        }
        Ok(departments)
    }

    pub fn update_status(conn: &Connection, id: i64, status: JobStatus) -> Result<()> {
        let now = chrono::Utc::now().timestamp();
        let updated = conn.execute(
            "UPDATE jobs SET status = ?1, modified_ts = ?2 WHERE id = ?3",
            rusqlite::params![status.as_str(), now, id],
        )
        .with_context(|| format!("Failed to update job {}", id))?;

        if updated == 0 {
            anyhow::bail!("No job found with id={}", id);
        }
        log::info!("Job {} status set to '{}'", id, status.as_str());
        Ok(())
    }
}
