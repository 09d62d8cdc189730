use rusqlite::{Connection, Transaction};
use anyhow::{Context, Result};
use std::collections::HashMap;
use crate::db::seed;

/// Current database schema version
const CURRENT_VERSION: u32 = 3;

type Migration = fn(&Transaction) -> Result<()>;

/// Migration system for managing database schema versions
pub struct MigrationManager;

impl MigrationManager {
    /// Initialize the database with the current schema
    /// This creates the schema_version table and applies all migrations
    pub fn initialize(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            )",
            [],
        )?;
        conn.execute("PRAGMA foreign_keys=ON", [])?;

        let current_version = Self::get_version(conn)?;

        for version in (current_version + 1)..=CURRENT_VERSION {
            log::debug!("Applying ledger migration v{}", version);
            Self::apply_migration(conn, version)
                .with_context(|| format!("Failed to apply migration v{}", version))?;
        }

        Ok(())
    }

    /// Apply a specific migration by version number
    fn apply_migration(conn: &Connection, version: u32) -> Result<()> {
        let migrations = get_migrations();
        let migration = migrations
            .get(&version)
            .ok_or_else(|| anyhow::anyhow!("No migration found for version {}", version))?;

        // Execute migration in a transaction
        let tx = conn.unchecked_transaction()?;
        migration(&tx)?;
        tx.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [version],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Get the current schema version
    pub fn get_version(conn: &Connection) -> Result<u32> {
        let version = conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )?;
        Ok(version)
    }
}

/// Get all migrations indexed by version
fn get_migrations() -> HashMap<u32, Migration> {
    let mut migrations: HashMap<u32, Migration> = HashMap::new();
    migrations.insert(1, migration_v1);
    migrations.insert(2, migration_v2);
    migrations.insert(3, migration_v3);
    migrations
}

/// Migration v1: Initial schema
fn migration_v1(tx: &Transaction) -> Result<()> {
    tx.execute(
        "CREATE TABLE jobs (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            department TEXT NOT NULL,
            employment_type TEXT NOT NULL,
            location TEXT NOT NULL,
            status TEXT NOT NULL CHECK(status IN ('open','on-hold','closed')),
            applicant_count INTEGER NOT NULL DEFAULT 0,
            posted_ts INTEGER NOT NULL,
            modified_ts INTEGER NOT NULL
        )",
        [],
    )?;

    // Interview pipeline. Days in stage are derived from stage_entered_ts on load.
    tx.execute(
        "CREATE TABLE pipeline_candidates (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            job_id INTEGER NOT NULL REFERENCES jobs(id),
            stage TEXT NOT NULL CHECK(stage IN ('screening','technical','task','hr','final')),
            stage_entered_ts INTEGER NOT NULL,
            position INTEGER NOT NULL,
            modified_ts INTEGER NOT NULL
        )",
        [],
    )?;
    tx.execute(
        "CREATE INDEX idx_pipeline_candidates_job ON pipeline_candidates(job_id)",
        [],
    )?;

    tx.execute(
        "CREATE TABLE applicants (
            id INTEGER PRIMARY KEY,
            job_id INTEGER NOT NULL REFERENCES jobs(id),
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT NOT NULL,
            experience_years INTEGER NOT NULL,
            applied_ts INTEGER NOT NULL,
            status TEXT NOT NULL CHECK(status IN ('new','shortlisted','rejected')),
            skills_json TEXT NOT NULL DEFAULT '[]',
            documents_json TEXT NOT NULL DEFAULT '{}',
            modified_ts INTEGER NOT NULL
        )",
        [],
    )?;
    tx.execute(
        "CREATE INDEX idx_applicants_job ON applicants(job_id)",
        [],
    )?;

    tx.execute(
        "CREATE TABLE offers (
            id INTEGER PRIMARY KEY,
            candidate_name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT NOT NULL,
            job_id INTEGER NOT NULL REFERENCES jobs(id),
            status TEXT NOT NULL CHECK(status IN ('pending','sent','accepted','declined')),
            sent_ts INTEGER NULL,
            joining_ts INTEGER NULL,
            salary TEXT NOT NULL,
            feedback TEXT NOT NULL DEFAULT '',
            onboarded INTEGER NOT NULL DEFAULT 0,
            modified_ts INTEGER NOT NULL
        )",
        [],
    )?;

    Ok(())
}

/// Migration v2: Seed the ledger with the starter fixtures
fn migration_v2(tx: &Transaction) -> Result<()> {
    let now = chrono::Utc::now().timestamp();
    seed::seed_fixtures(tx, now)
}

/// Migration v3: Applicant profile workflow and screening notes
fn migration_v3(tx: &Transaction) -> Result<()> {
    tx.execute(
        "ALTER TABLE applicants ADD COLUMN profile_status TEXT NOT NULL DEFAULT 'new'
            CHECK(profile_status IN ('new','screening','interview','offer','rejected'))",
        [],
    )?;
    tx.execute(
        "ALTER TABLE applicants ADD COLUMN notes TEXT NOT NULL DEFAULT ''",
        [],
    )?;
    // Rejected applicants are out of the profile workflow too
    tx.execute(
        "UPDATE applicants SET profile_status = 'rejected' WHERE status = 'rejected'",
        [],
    )?;
    seed::seed_profiles(tx)
}
