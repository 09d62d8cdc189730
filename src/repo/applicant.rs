use rusqlite::{Connection, OptionalExtension, Row};
use crate::models::{Applicant, ApplicantStatus, ProfileStatus};
use crate::repo::{enum_column, json_column};
use anyhow::{Context, Result};

/// Applicant repository
pub struct ApplicantRepo;

const SELECT_APPLICANT: &str =
    "SELECT id, job_id, name, email, phone, experience_years, applied_ts, status, skills_json, documents_json,
            profile_status, notes
     FROM applicants";

fn applicant_from_row(row: &Row) -> rusqlite::Result<Applicant> {
    Ok(Applicant {
        id: row.get(0)?,
        job_id: row.get(1)?,
        name: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
        experience_years: row.get(5)?,
        applied_ts: row.get(6)?,
        status: enum_column(row, 7, "applicant status", ApplicantStatus::from_str)?,
        skills: json_column(row, 8)?,
        documents: json_column(row, 9)?,
        profile_status: enum_column(row, 10, "profile status", ProfileStatus::from_str)?,
        notes: row.get(11)?,
    })
}

impl ApplicantRepo {
    /// Applicants for a job, most recent application first
    pub fn list_for_job(conn: &Connection, job_id: i64) -> Result<Vec<Applicant>> {
        let mut stmt = conn.prepare(&format!(
            "{} WHERE job_id = ?1 ORDER BY applied_ts DESC, id", SELECT_APPLICANT
        ))?;
        let rows = stmt.query_map([job_id], applicant_from_row)?;

        let mut applicants = Vec::new();
        for row in rows {
            applicants.push(row.with_context(|| format!("Failed to load applicants for job {}", job_id))?);
        }
        Ok(applicants)
    }

    pub fn get_by_id(conn: &Connection, id: i64) -> Result<Option<Applicant>> {
        let mut stmt = conn.prepare(&format!("{} WHERE id = ?1", SELECT_APPLICANT))?;
        let applicant = stmt.query_row([id], applicant_from_row).optional()
            .with_context(|| format!("Failed to load applicant {}", id))?;
        Ok(applicant)
    }

    /// Write back status, documents, profile status and notes
    pub fn save(conn: &Connection, applicant: &Applicant) -> Result<()> {
        let now = chrono::Utc::now().timestamp();
        let documents_json = serde_json::to_string(&applicant.documents)?;
        let updated = conn.execute(
            "UPDATE applicants SET status = ?1, documents_json = ?2, profile_status = ?3, notes = ?4, modified_ts = ?5
             WHERE id = ?6",
            rusqlite::params![
                applicant.status.as_str(),
                documents_json,
                applicant.profile_status.as_str(),
                applicant.notes,
                now,
                applicant.id
            ],
        )
        .with_context(|| format!("Failed to update applicant {}", applicant.id))?;

        if updated == 0 {
            anyhow::bail!("No applicant found with id={}", applicant.id);
        }
        log::info!(
            "Applicant {} saved with status '{}', profile '{}'",
            applicant.id, applicant.status.as_str(), applicant.profile_status.as_str()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentKind;
    use crate::db::DbConnection;

    #[test]
    fn test_list_for_job() {
        let conn = DbConnection::connect_in_memory().unwrap();
        let applicants = ApplicantRepo::list_for_job(&conn, 1).unwrap();
        assert_eq!(applicants.len(), 6);
        assert_eq!(applicants[0].name, "Sarah Johnson");
        assert_eq!(applicants[0].skills.len(), 4);
        assert!(ApplicantRepo::list_for_job(&conn, 2).unwrap().is_empty());
    }

    #[test]
    fn test_save_round_trips_status_and_documents() {
        let conn = DbConnection::connect_in_memory().unwrap();
        let mut a = ApplicantRepo::get_by_id(&conn, 1).unwrap().unwrap();
        let before = a.documents[&DocumentKind::ExperienceLetter];
        assert!(!before.verified);

        a.shortlist();
        a.toggle_verified(DocumentKind::ExperienceLetter);
        ApplicantRepo::save(&conn, &a).unwrap();

        let reloaded = ApplicantRepo::get_by_id(&conn, 1).unwrap().unwrap();
        assert_eq!(reloaded.status, ApplicantStatus::Shortlisted);
        assert!(reloaded.documents[&DocumentKind::ExperienceLetter].verified);
    }

    #[test]
    fn test_save_round_trips_profile_and_notes() {
        let conn = DbConnection::connect_in_memory().unwrap();
        let mut a = ApplicantRepo::get_by_id(&conn, 2).unwrap().unwrap();
        assert_eq!(a.profile_status, ProfileStatus::Screening);

        a.advance(Some(ProfileStatus::Interview)).unwrap();
        a.notes = "Pairing session went well".to_string();
        ApplicantRepo::save(&conn, &a).unwrap();

        let reloaded = ApplicantRepo::get_by_id(&conn, 2).unwrap().unwrap();
        assert_eq!(reloaded.profile_status, ProfileStatus::Interview);
        assert_eq!(reloaded.notes, "Pairing session went well");
    }

    #[test]
    fn test_corrupt_documents_fail_to_load() {
        let conn = DbConnection::connect_in_memory().unwrap();
        conn.execute("UPDATE applicants SET documents_json = 'not json' WHERE id = 3", []).unwrap();

        let err = ApplicantRepo::get_by_id(&conn, 3).unwrap_err();
        assert!(err.to_string().contains("Failed to load applicant 3"));
        assert!(ApplicantRepo::list_for_job(&conn, 1).is_err());
        // Other rows are unaffected
        assert!(ApplicantRepo::get_by_id(&conn, 1).unwrap().is_some());
    }

    #[test]
    fn test_corrupt_skills_fail_to_load() {
        let conn = DbConnection::connect_in_memory().unwrap();
        conn.execute("UPDATE applicants SET skills_json = '{\"React\": 1}' WHERE id = 1", []).unwrap();
        assert!(ApplicantRepo::get_by_id(&conn, 1).is_err());
    }
}
