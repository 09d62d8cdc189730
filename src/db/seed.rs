// Starter fixtures loaded when a ledger is first created

use rusqlite::{params, Transaction};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use crate::models::{DocumentKind, DocumentStatus, Stage};
use crate::utils::{days_ago, parse_date};

struct JobFixture {
    id: i64,
    title: &'static str,
    department: &'static str,
    employment_type: &'static str,
    location: &'static str,
    status: &'static str,
    applicants: u32,
    posted: &'static str,
}

const JOBS: &[JobFixture] = &[
    JobFixture { id: 1, title: "Frontend Developer", department: "Engineering", employment_type: "Full-time", location: "San Francisco, CA", status: "open", applicants: 12, posted: "2025-12-15" },
    JobFixture { id: 2, title: "UI/UX Designer", department: "Design", employment_type: "Full-time", location: "New York, NY", status: "open", applicants: 8, posted: "2025-12-10" },
    JobFixture { id: 3, title: "Backend Engineer", department: "Engineering", employment_type: "Full-time", location: "Remote", status: "open", applicants: 15, posted: "2025-12-20" },
    JobFixture { id: 4, title: "Content Writer", department: "Marketing", employment_type: "Contract", location: "Austin, TX", status: "on-hold", applicants: 5, posted: "2025-12-01" },
    JobFixture { id: 5, title: "HR Specialist", department: "Human Resources", employment_type: "Full-time", location: "Los Angeles, CA", status: "closed", applicants: 22, posted: "2025-11-15" },
];

/// (id, name, job_id, stage, days in stage), in board order
const PIPELINE: &[(i64, &str, i64, Stage, u32)] = &[
    (1, "Sarah Johnson", 1, Stage::Screening, 3),
    (4, "Michael Rodriguez", 1, Stage::Screening, 5),
    (2, "Alex Chen", 1, Stage::Technical, 7),
    (6, "James Wilson", 1, Stage::Technical, 2),
    (3, "Emma Davis", 2, Stage::Task, 4),
    (5, "Priya Patel", 1, Stage::Task, 6),
    (7, "David Lee", 3, Stage::Hr, 1),
    (8, "Jessica Brown", 1, Stage::Final, 2),
    (9, "Robert Taylor", 3, Stage::Final, 3),
];

struct ApplicantFixture {
    id: i64,
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    years: u32,
    applied: &'static str,
    status: &'static str,
    skills: &'static [&'static str],
    /// (submitted, verified) for id proof, education certificates, experience letter, photo
    documents: [(bool, bool); 4],
}

const APPLICANTS: &[ApplicantFixture] = &[
    ApplicantFixture { id: 1, name: "Sarah Johnson", email: "sarah.johnson@email.com", phone: "+1 (555) 123-4567", years: 5, applied: "2025-01-20", status: "new",
        skills: &["React", "JavaScript", "CSS", "Tailwind"], documents: [(true, true), (true, true), (false, false), (true, true)] },
    ApplicantFixture { id: 2, name: "Alex Chen", email: "alex.chen@email.com", phone: "+1 (555) 234-5678", years: 3, applied: "2025-01-18", status: "new",
        skills: &["React", "TypeScript", "Node.js"], documents: [(true, true), (true, false), (true, true), (true, true)] },
    ApplicantFixture { id: 3, name: "Emma Davis", email: "emma.davis@email.com", phone: "+1 (555) 345-6789", years: 7, applied: "2025-01-15", status: "shortlisted",
        skills: &["React", "Vue", "Angular", "JavaScript"], documents: [(true, true), (true, true), (true, true), (true, true)] },
    ApplicantFixture { id: 4, name: "Michael Rodriguez", email: "michael.r@email.com", phone: "+1 (555) 456-7890", years: 2, applied: "2025-01-10", status: "new",
        skills: &["React", "CSS-in-JS", "Responsive Design"], documents: [(true, false), (true, false), (false, false), (true, false)] },
    ApplicantFixture { id: 5, name: "Priya Patel", email: "priya.patel@email.com", phone: "+1 (555) 567-8901", years: 6, applied: "2025-01-08", status: "rejected",
        skills: &["React", "Next.js", "Performance Optimization"], documents: [(true, false), (false, false), (false, false), (true, false)] },
    ApplicantFixture { id: 6, name: "James Wilson", email: "james.wilson@email.com", phone: "+1 (555) 678-9012", years: 4, applied: "2025-01-05", status: "new",
        skills: &["React", "GraphQL", "Web Performance"], documents: [(true, false), (true, false), (true, false), (true, false)] },
];

struct OfferFixture {
    id: i64,
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    job_id: i64,
    status: &'static str,
    sent: Option<&'static str>,
    joining: Option<&'static str>,
    salary: &'static str,
    feedback: &'static str,
}

const OFFERS: &[OfferFixture] = &[
    OfferFixture { id: 1, name: "Sarah Johnson", email: "sarah.johnson@email.com", phone: "+1 (555) 123-4567", job_id: 1, status: "accepted",
        sent: Some("2025-01-20"), joining: Some("2025-02-15"), salary: "$120,000", feedback: "Excellent technical skills and communication" },
    OfferFixture { id: 2, name: "Alex Chen", email: "alex.chen@email.com", phone: "+1 (555) 234-5678", job_id: 1, status: "sent",
        sent: Some("2025-01-22"), joining: Some("2025-02-20"), salary: "$110,000", feedback: "Strong junior developer, good learning attitude" },
    OfferFixture { id: 3, name: "Emma Davis", email: "emma.davis@email.com", phone: "+1 (555) 345-6789", job_id: 2, status: "accepted",
        sent: Some("2025-01-18"), joining: Some("2025-02-10"), salary: "$115,000", feedback: "Outstanding portfolio and design thinking" },
    OfferFixture { id: 4, name: "Michael Rodriguez", email: "michael.r@email.com", phone: "+1 (555) 456-7890", job_id: 1, status: "declined",
        sent: Some("2025-01-19"), joining: None, salary: "$105,000", feedback: "Good candidate but declined offer" },
    OfferFixture { id: 5, name: "Priya Patel", email: "priya.patel@email.com", phone: "+1 (555) 567-8901", job_id: 1, status: "pending",
        sent: None, joining: Some("2025-02-25"), salary: "$118,000", feedback: "Awaiting offer approval from management" },
    OfferFixture { id: 6, name: "James Wilson", email: "james.wilson@email.com", phone: "+1 (555) 678-9012", job_id: 3, status: "accepted",
        sent: Some("2025-01-21"), joining: Some("2025-02-18"), salary: "$135,000", feedback: "Senior developer with excellent experience" },
];

fn optional_date(date: Option<&str>) -> Result<Option<i64>> {
    date.map(parse_date).transpose()
}

/// Insert all fixtures. `now` anchors the pipeline's days-in-stage values.
pub fn seed_fixtures(tx: &Transaction, now: i64) -> Result<()> {
    for job in JOBS {
        tx.execute(
            "INSERT INTO jobs (id, title, department, employment_type, location, status, applicant_count, posted_ts, modified_ts)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![job.id, job.title, job.department, job.employment_type, job.location,
                    job.status, job.applicants, parse_date(job.posted)?, now],
        )
        .with_context(|| format!("Failed to seed job {}", job.id))?;
    }

    for (position, (id, name, job_id, stage, days)) in PIPELINE.iter().enumerate() {
        tx.execute(
            "INSERT INTO pipeline_candidates (id, name, job_id, stage, stage_entered_ts, position, modified_ts)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![id, name, job_id, stage.key(), days_ago(*days, now), position as i64, now],
        )
        .with_context(|| format!("Failed to seed pipeline candidate {}", id))?;
    }

    for a in APPLICANTS {
        let documents: BTreeMap<DocumentKind, DocumentStatus> = DocumentKind::ALL
            .iter()
            .zip(a.documents.iter())
            .map(|(kind, (submitted, verified))| (*kind, DocumentStatus { submitted: *submitted, verified: *verified }))
            .collect();
        tx.execute(
            "INSERT INTO applicants (id, job_id, name, email, phone, experience_years, applied_ts, status,
                                     skills_json, documents_json, modified_ts)
             VALUES (?1, 1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![a.id, a.name, a.email, a.phone, a.years, parse_date(a.applied)?, a.status,
                    serde_json::to_string(a.skills)?, serde_json::to_string(&documents)?, now],
        )
        .with_context(|| format!("Failed to seed applicant {}", a.id))?;
    }

    for o in OFFERS {
        tx.execute(
            "INSERT INTO offers (id, candidate_name, email, phone, job_id, status, sent_ts, joining_ts,
                                 salary, feedback, onboarded, modified_ts)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, 0, ?11)",
            params![o.id, o.name, o.email, o.phone, o.job_id, o.status,
                    optional_date(o.sent)?, optional_date(o.joining)?, o.salary, o.feedback, now],
        )
        .with_context(|| format!("Failed to seed offer {}", o.id))?;
    }

    log::debug!(
        "Seeded {} jobs, {} pipeline candidates, {} applicants, {} offers",
        JOBS.len(), PIPELINE.len(), APPLICANTS.len(), OFFERS.len()
    );
    Ok(())
}

/// (applicant id, profile status, screening notes). Applicants not listed keep the column defaults.
const PROFILES: &[(i64, &str, &str)] = &[
    (1, "new", "Strong technical background. Excellent communication skills during initial screening."),
    (2, "screening", "Promising junior developer. Interested in growing with the team."),
    (3, "interview", "Excellent portfolio. Interview scheduled for 2026-01-30. Very interested in the role."),
    (5, "rejected", ""),
];

/// Fill in profile workflow status and notes for the seeded applicants
pub fn seed_profiles(tx: &Transaction) -> Result<()> {
    for (id, status, notes) in PROFILES {
        tx.execute(
            "UPDATE applicants SET profile_status = ?1, notes = ?2 WHERE id = ?3",
            params![status, notes, id],
        )
        .with_context(|| format!("Failed to seed profile for applicant {}", id))?;
    }
    log::debug!("Seeded {} applicant profiles", PROFILES.len());
    Ok(())
}
