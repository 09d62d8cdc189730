use clap::{Parser, Subcommand};
use anyhow::{Context, Result};
use rusqlite::Connection;
use crate::db::DbConnection;
use crate::models::{
    Applicant, ApplicantFilter, ApplicantStatus, DocumentKind, ExperienceBucket, JobFilter,
    JobOpening, JobStatus, OfferFilter, OfferStatus, ProfileStatus, Stage,
};
use crate::pipeline::{self, apply_transition, breaches, group_by_stage, unique_jobs, Direction};
use crate::repo::{ApplicantRepo, CandidateRepo, JobRepo, OfferRepo};
use crate::cli::abbrev;
use crate::cli::error::{search_term, user_error, validate_id, validate_non_empty, ParseValueError};
use crate::cli::output::*;
use crate::cli::status::{compute_dashboard, format_dashboard};
use crate::utils::fuzzy::closest_match;

#[derive(Parser)]
#[command(name = "recruit")]
#[command(about = "Recruitment ledger - job openings, applicants, interview pipeline and offers")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interview pipeline board and stage moves
    Pipeline {
        #[command(subcommand)]
        subcommand: PipelineCommands,
    },
    /// Job openings
    Jobs {
        #[command(subcommand)]
        subcommand: JobCommands,
    },
    /// Applicants for a job opening
    Applicants {
        #[command(subcommand)]
        subcommand: ApplicantCommands,
    },
    /// Offers and onboarding hand-off
    Offers {
        #[command(subcommand)]
        subcommand: OfferCommands,
    },
    /// Show recruiting dashboard
    Status {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum PipelineCommands {
    /// Show the kanban board, one column per stage
    Board {
        /// Only candidates for this job id ("all" for every job)
        #[arg(long)]
        job: Option<String>,
    },
    /// List pipeline candidates
    List {
        /// Only candidates for this job id ("all" for every job)
        #[arg(long)]
        job: Option<String>,
        /// Only candidates in this stage (key or label)
        #[arg(long)]
        stage: Option<String>,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Show one candidate's pipeline record
    Show {
        /// Candidate ID
        id: String,
    },
    /// Move a candidate to the next stage
    Next {
        /// Candidate ID
        id: String,
    },
    /// Move a candidate back to the previous stage
    Prev {
        /// Candidate ID
        id: String,
    },
    /// Candidate counts per stage
    Summary {
        /// Only candidates for this job id ("all" for every job)
        #[arg(long)]
        job: Option<String>,
    },
    /// Candidates over the stage SLA
    Breaches {
        /// Only candidates for this job id ("all" for every job)
        #[arg(long)]
        job: Option<String>,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Jobs that have candidates in the pipeline
    Jobs {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum JobCommands {
    /// List job openings
    List {
        /// Only jobs in this department
        #[arg(long)]
        department: Option<String>,
        /// Only jobs with this status (open, on-hold, closed)
        #[arg(long)]
        status: Option<String>,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
        /// Search term matched against job titles
        #[arg(trailing_var_arg = true)]
        search: Vec<String>,
    },
    /// Put an open job on hold
    Pause {
        /// Job ID
        id: String,
    },
    /// Close a job
    Close {
        /// Job ID
        id: String,
    },
    /// Reopen a job that is on hold
    Reopen {
        /// Job ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ApplicantCommands {
    /// List applicants for a job
    List {
        /// Job ID
        job_id: String,
        /// Only applicants with this status (new, shortlisted, rejected)
        #[arg(long)]
        status: Option<String>,
        /// Years of experience bucket (0-2, 2-5, 5+)
        #[arg(long)]
        experience: Option<String>,
        /// Only applicants with a matching skill
        #[arg(long)]
        skill: Option<String>,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
        /// Search term matched against name and email
        #[arg(trailing_var_arg = true)]
        search: Vec<String>,
    },
    /// Show an applicant's profile and document checklist
    Show {
        /// Applicant ID
        id: String,
    },
    /// Shortlist a new applicant
    Shortlist {
        /// Applicant ID
        id: String,
    },
    /// Reject an applicant
    Reject {
        /// Applicant ID
        id: String,
    },
    /// Toggle verification of a submitted document
    Verify {
        /// Applicant ID
        id: String,
        /// Document (id-proof, education-certificates, experience-letter, photo)
        document: String,
    },
    /// Move the profile to its next step (new, screening, interview, offer)
    Advance {
        /// Applicant ID
        id: String,
        /// Expected next step (screening, interview, offer); refused if it skips ahead
        to: Option<String>,
    },
    /// Replace the applicant's screening notes
    Note {
        /// Applicant ID
        id: String,
        /// Remove the notes instead of replacing them
        #[arg(long)]
        clear: bool,
        /// Note text
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum OfferCommands {
    /// List offers
    List {
        /// Only offers with this status (pending, sent, accepted, declined)
        #[arg(long)]
        status: Option<String>,
        /// Only offers for this job id
        #[arg(long)]
        job: Option<String>,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
        /// Search term matched against candidate name and email
        #[arg(trailing_var_arg = true)]
        search: Vec<String>,
    },
    /// Change an offer's status
    SetStatus {
        /// Offer ID
        id: String,
        /// New status (pending, sent, accepted, declined)
        status: String,
    },
    /// Hand an accepted offer over to onboarding
    Onboard {
        /// Offer ID
        id: String,
    },
}

pub fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    // Expand command abbreviations before processing
    let args = match abbrev::expand_command_abbreviations(args) {
        Ok(expanded) => expanded,
        Err(e) => user_error(&e),
    };

    let clap_args = std::iter::once("recruit".to_string())
        .chain(args)
        .collect::<Vec<_>>();
    let cli = match Cli::try_parse_from(clap_args) {
        Ok(cli) => cli,
        // Prints help/version to stdout, usage errors to stderr
        Err(e) => e.exit(),
    };

    handle_command(cli)
}

fn handle_command(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Pipeline { subcommand } => handle_pipeline(subcommand),
        Commands::Jobs { subcommand } => handle_jobs(subcommand),
        Commands::Applicants { subcommand } => handle_applicants(subcommand),
        Commands::Offers { subcommand } => handle_offers(subcommand),
        Commands::Status { json } => handle_status(json),
    }
}

fn open_ledger() -> Result<Connection> {
    DbConnection::connect().context("Failed to connect to database")
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

fn require_id(id: &str, entity: &str) -> i64 {
    validate_id(id, entity).unwrap_or_else(|e| user_error(&e))
}

/// `None` and "all" both mean every job
fn parse_job_filter(job: Option<&str>) -> Option<i64> {
    match job {
        None => None,
        Some(s) if s.trim().eq_ignore_ascii_case("all") => None,
        Some(s) => Some(require_id(s, "job")),
    }
}

fn parse_value<T>(
    kind: &'static str,
    input: &str,
    valid: &[&'static str],
    parse: impl Fn(&str) -> Option<T>,
) -> T {
    parse(input).unwrap_or_else(|| user_error(&ParseValueError::new(kind, input, valid).to_string()))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// Pipeline

fn handle_pipeline(cmd: PipelineCommands) -> Result<()> {
    match cmd {
        PipelineCommands::Board { job } => handle_pipeline_board(job),
        PipelineCommands::List { job, stage, json } => handle_pipeline_list(job, stage, json),
        PipelineCommands::Show { id } => handle_pipeline_show(id),
        PipelineCommands::Next { id } => handle_pipeline_move(id, Direction::Forward),
        PipelineCommands::Prev { id } => handle_pipeline_move(id, Direction::Backward),
        PipelineCommands::Summary { job } => handle_pipeline_summary(job),
        PipelineCommands::Breaches { job, json } => handle_pipeline_breaches(job, json),
        PipelineCommands::Jobs { json } => handle_pipeline_jobs(json),
    }
}

fn handle_pipeline_board(job: Option<String>) -> Result<()> {
    let job_filter = parse_job_filter(job.as_deref());
    let conn = open_ledger()?;
    let records = CandidateRepo::list_all(&conn, now())?;

    if let Some(job_id) = job_filter {
        println!("Job: {}", JobRepo::title(&conn, job_id)?);
    }
    let view = group_by_stage(&records, job_filter);
    print!("{}", format_pipeline_board(&view, get_terminal_width(), is_tty()));
    Ok(())
}

fn handle_pipeline_list(job: Option<String>, stage: Option<String>, json: bool) -> Result<()> {
    let job_filter = parse_job_filter(job.as_deref());
    let stage_filter: Option<Stage> = stage.map(|s| {
        s.parse::<Stage>().unwrap_or_else(|e| user_error(&e.to_string()))
    });

    let conn = open_ledger()?;
    let records = CandidateRepo::list_all(&conn, now())?;
    let records: Vec<_> = pipeline::filter_by_job(&records, job_filter)
        .into_iter()
        .filter(|r| stage_filter.map(|s| r.stage == s).unwrap_or(true))
        .collect();

    if json {
        return print_json(&records);
    }
    print!("{}", format_pipeline_list(&records));
    Ok(())
}

fn handle_pipeline_show(id: String) -> Result<()> {
    let id = require_id(&id, "candidate");
    let conn = open_ledger()?;
    match CandidateRepo::get_by_id(&conn, id, now())? {
        Some(record) => {
            print!("{}", format_candidate_detail(&record));
            Ok(())
        }
        None => user_error(&format!("Candidate {} not found in the pipeline", id)),
    }
}

fn handle_pipeline_move(id: String, direction: Direction) -> Result<()> {
    let id = require_id(&id, "candidate");
    let conn = open_ledger()?;
    let now = now();

    let mut record = match CandidateRepo::get_by_id(&conn, id, now)? {
        Some(record) => record,
        None => {
            println!("No candidate {} in the pipeline; nothing moved.", id);
            return Ok(());
        }
    };

    let before = record.clone();
    if apply_transition(&mut record, direction).is_none() {
        let edge = match direction {
            Direction::Forward => "final",
            Direction::Backward => "first",
        };
        println!(
            "Candidate {} ({}) is already at the {} stage ({}); nothing moved.",
            before.id, before.name, edge, before.stage.label()
        );
        return Ok(());
    }

    CandidateRepo::save_stage(&conn, &record, now)?;
    println!("{}", format_transition(&before, &record));
    Ok(())
}

fn handle_pipeline_summary(job: Option<String>) -> Result<()> {
    let job_filter = parse_job_filter(job.as_deref());
    let conn = open_ledger()?;
    let records = CandidateRepo::list_all(&conn, now())?;
    print!("{}", format_pipeline_summary(&group_by_stage(&records, job_filter)));
    Ok(())
}

fn handle_pipeline_breaches(job: Option<String>, json: bool) -> Result<()> {
    let job_filter = parse_job_filter(job.as_deref());
    let conn = open_ledger()?;
    let records = CandidateRepo::list_all(&conn, now())?;
    let matched = pipeline::filter_by_job(&records, job_filter);
    let flagged = breaches(&matched);

    if json {
        return print_json(&flagged);
    }
    print!("{}", format_breaches(&flagged));
    Ok(())
}

fn handle_pipeline_jobs(json: bool) -> Result<()> {
    let conn = open_ledger()?;
    let records = CandidateRepo::list_all(&conn, now())?;
    let jobs: Vec<(i64, String, usize)> = unique_jobs(&records)
        .into_iter()
        .map(|(id, title)| {
            let count = records.iter().filter(|r| r.job_id == id).count();
            (id, title, count)
        })
        .collect();

    if json {
        let json_jobs: Vec<serde_json::Value> = jobs
            .iter()
            .map(|(id, title, count)| serde_json::json!({
                "job_id": id,
                "title": title,
                "candidates": count,
            }))
            .collect();
        return print_json(&json_jobs);
    }
    print!("{}", format_pipeline_jobs(&jobs));
    Ok(())
}

// Jobs

fn handle_jobs(cmd: JobCommands) -> Result<()> {
    match cmd {
        JobCommands::List { department, status, json, search } => {
            handle_job_list(department, status, json, search)
        }
        JobCommands::Pause { id } => handle_job_change(id, "pause", "Paused", JobOpening::pause),
        JobCommands::Close { id } => handle_job_change(id, "close", "Closed", JobOpening::close),
        JobCommands::Reopen { id } => handle_job_change(id, "reopen", "Reopened", JobOpening::reopen),
    }
}

fn handle_job_list(
    department: Option<String>,
    status: Option<String>,
    json: bool,
    search: Vec<String>,
) -> Result<()> {
    let status = status.map(|s| {
        let valid: Vec<&'static str> = JobStatus::ALL.iter().map(|s| s.as_str()).collect();
        parse_value("job status", &s, &valid, JobStatus::from_str)
    });

    let conn = open_ledger()?;

    if let Some(dept) = department.as_deref() {
        let departments = JobRepo::departments(&conn)?;
        if !departments.iter().any(|d| d.eq_ignore_ascii_case(dept)) {
            let names: Vec<&str> = departments.iter().map(|d| d.as_str()).collect();
            let message = match closest_match(dept, &names, 3) {
                Some(suggestion) => format!("Unknown department '{}'. Did you mean '{}'?", dept, suggestion),
                None => format!("Unknown department '{}'. Departments: {}", dept, names.join(", ")),
            };
            user_error(&message);
        }
    }

    let filter = JobFilter {
        search: search_term(&search),
        department,
        status,
    };
    let jobs: Vec<JobOpening> = JobRepo::list_all(&conn)?
        .into_iter()
        .filter(|j| filter.matches(j))
        .collect();

    if json {
        return print_json(&jobs);
    }
    print!("{}", format_job_list(&jobs));
    Ok(())
}

fn handle_job_change(
    id: String,
    verb: &str,
    past: &str,
    apply: fn(&mut JobOpening) -> bool,
) -> Result<()> {
    let id = require_id(&id, "job");
    let conn = open_ledger()?;
    let mut job = JobRepo::get_by_id(&conn, id)?
        .unwrap_or_else(|| user_error(&format!("Job {} not found", id)));

    let before = job.status;
    if !apply(&mut job) {
        println!(
            "Job {} ({}) is {}; {} does not apply.",
            job.id, job.title, before.label(), verb
        );
        return Ok(());
    }

    JobRepo::update_status(&conn, job.id, job.status)?;
    println!(
        "{} job {} ({}): {} -> {}",
        past, job.id, job.title, before.label(), job.status.label()
    );
    Ok(())
}

// Applicants

fn handle_applicants(cmd: ApplicantCommands) -> Result<()> {
    match cmd {
        ApplicantCommands::List { job_id, status, experience, skill, json, search } => {
            handle_applicant_list(job_id, status, experience, skill, json, search)
        }
        ApplicantCommands::Show { id } => handle_applicant_show(id),
        ApplicantCommands::Shortlist { id } => {
            handle_applicant_change(id, "shortlisted", Applicant::shortlist)
        }
        ApplicantCommands::Reject { id } => {
            handle_applicant_change(id, "rejected", Applicant::reject)
        }
        ApplicantCommands::Verify { id, document } => handle_applicant_verify(id, document),
        ApplicantCommands::Advance { id, to } => handle_applicant_advance(id, to),
        ApplicantCommands::Note { id, clear, text } => handle_applicant_note(id, clear, text),
    }
}

fn load_applicant(conn: &Connection, id: &str) -> Result<Applicant> {
    let id = require_id(id, "applicant");
    Ok(ApplicantRepo::get_by_id(conn, id)?
        .unwrap_or_else(|| user_error(&format!("Applicant {} not found", id))))
}

fn handle_applicant_list(
    job_id: String,
    status: Option<String>,
    experience: Option<String>,
    skill: Option<String>,
    json: bool,
    search: Vec<String>,
) -> Result<()> {
    let job_id = require_id(&job_id, "job");
    let status = status.map(|s| {
        parse_value("applicant status", &s, &["new", "shortlisted", "rejected"], ApplicantStatus::from_str)
    });
    let experience = experience.map(|e| {
        parse_value("experience bucket", &e, &["0-2", "2-5", "5+"], ExperienceBucket::from_str)
    });

    let conn = open_ledger()?;
    let job = JobRepo::get_by_id(&conn, job_id)?
        .unwrap_or_else(|| user_error(&format!("Job {} not found", job_id)));

    let filter = ApplicantFilter {
        search: search_term(&search),
        status,
        experience,
        skill,
    };
    let all = ApplicantRepo::list_for_job(&conn, job.id)?;
    let total = all.len();
    let applicants: Vec<Applicant> = all.into_iter().filter(|a| filter.matches(a)).collect();

    if json {
        return print_json(&applicants);
    }
    println!(
        "Applicants for {} (job {}): showing {} of {}\n",
        job.title, job.id, applicants.len(), total
    );
    print!("{}", format_applicant_list(&applicants, 40));
    Ok(())
}

fn handle_applicant_show(id: String) -> Result<()> {
    let conn = open_ledger()?;
    let applicant = load_applicant(&conn, &id)?;
    let job_title = JobRepo::title(&conn, applicant.job_id)?;
    print!("{}", format_applicant_detail(&applicant, &job_title));
    Ok(())
}

fn handle_applicant_change(
    id: String,
    past: &str,
    apply: fn(&mut Applicant) -> bool,
) -> Result<()> {
    let conn = open_ledger()?;
    let mut applicant = load_applicant(&conn, &id)?;

    let before = applicant.status;
    if !apply(&mut applicant) {
        println!(
            "Applicant {} ({}) is {}; nothing changed.",
            applicant.id, applicant.name, before.as_str()
        );
        return Ok(());
    }

    ApplicantRepo::save(&conn, &applicant)?;
    println!("Applicant {} ({}) {}", applicant.id, applicant.name, past);
    Ok(())
}

fn handle_applicant_verify(id: String, document: String) -> Result<()> {
    let valid: Vec<&'static str> = DocumentKind::ALL.iter().map(|k| k.as_str()).collect();
    let kind = parse_value("document", &document, &valid, DocumentKind::from_str);

    let conn = open_ledger()?;
    let mut applicant = load_applicant(&conn, &id)?;
    let verified = applicant.toggle_verified(kind);
    ApplicantRepo::save(&conn, &applicant)?;

    if verified {
        println!("Verified {} for applicant {} ({})", kind.label(), applicant.id, applicant.name);
    } else {
        println!("Cleared verification of {} for applicant {} ({})", kind.label(), applicant.id, applicant.name);
    }
    Ok(())
}

fn handle_applicant_advance(id: String, to: Option<String>) -> Result<()> {
    let to = to.map(|t| {
        parse_value("profile step", &t, &["screening", "interview", "offer"], ProfileStatus::from_str)
    });

    let conn = open_ledger()?;
    let mut applicant = load_applicant(&conn, &id)?;
    match applicant.advance(to) {
        Ok(from) => {
            ApplicantRepo::save(&conn, &applicant)?;
            println!(
                "Applicant {} ({}): {} -> {}",
                applicant.id, applicant.name, from.label(), applicant.profile_status.label()
            );
        }
        Err(blocked) => {
            println!("Applicant {} ({}) not advanced: {}", applicant.id, applicant.name, blocked);
        }
    }
    Ok(())
}

fn handle_applicant_note(id: String, clear: bool, text: Vec<String>) -> Result<()> {
    let notes = text.join(" ").trim().to_string();
    if clear && !notes.is_empty() {
        user_error("Give either --clear or note text, not both");
    }
    if !clear {
        validate_non_empty(&notes, "Note").unwrap_or_else(|e| user_error(&e));
    }

    let conn = open_ledger()?;
    let mut applicant = load_applicant(&conn, &id)?;
    applicant.notes = notes;
    ApplicantRepo::save(&conn, &applicant)?;

    if clear {
        println!("Cleared notes for applicant {} ({})", applicant.id, applicant.name);
    } else {
        println!("Updated notes for applicant {} ({})", applicant.id, applicant.name);
    }
    Ok(())
}

// Offers

fn handle_offers(cmd: OfferCommands) -> Result<()> {
    match cmd {
        OfferCommands::List { status, job, json, search } => handle_offer_list(status, job, json, search),
        OfferCommands::SetStatus { id, status } => handle_offer_set_status(id, status),
        OfferCommands::Onboard { id } => handle_offer_onboard(id),
    }
}

fn parse_offer_status(input: &str) -> OfferStatus {
    let valid: Vec<&'static str> = OfferStatus::ALL.iter().map(|s| s.as_str()).collect();
    parse_value("offer status", input, &valid, OfferStatus::from_str)
}

fn handle_offer_list(
    status: Option<String>,
    job: Option<String>,
    json: bool,
    search: Vec<String>,
) -> Result<()> {
    let filter = OfferFilter {
        search: search_term(&search),
        status: status.as_deref().map(parse_offer_status),
        job_id: parse_job_filter(job.as_deref()),
    };

    let conn = open_ledger()?;
    let offers: Vec<_> = OfferRepo::list_all(&conn)?
        .into_iter()
        .filter(|o| filter.matches(o))
        .collect();

    if json {
        return print_json(&offers);
    }
    print!("{}", format_offer_list(&offers, now()));

    let count = |s: OfferStatus| offers.iter().filter(|o| o.status == s).count();
    println!(
        "\n{} accepted, {} sent, {} declined",
        count(OfferStatus::Accepted),
        count(OfferStatus::Sent),
        count(OfferStatus::Declined)
    );
    Ok(())
}

fn load_offer(conn: &Connection, id: &str) -> Result<crate::models::Offer> {
    let id = require_id(id, "offer");
    Ok(OfferRepo::get_by_id(conn, id)?
        .unwrap_or_else(|| user_error(&format!("Offer {} not found", id))))
}

fn handle_offer_set_status(id: String, status: String) -> Result<()> {
    let status = parse_offer_status(&status);
    let conn = open_ledger()?;
    let mut offer = load_offer(&conn, &id)?;

    let before = offer.status;
    if !offer.set_status(status) {
        println!("Offer {} ({}) is already {}; nothing changed.", offer.id, offer.candidate_name, before.label());
        return Ok(());
    }

    OfferRepo::save(&conn, &offer)?;
    println!(
        "Offer {} ({}): {} -> {}",
        offer.id, offer.candidate_name, before.label(), offer.status.label()
    );
    Ok(())
}

fn handle_offer_onboard(id: String) -> Result<()> {
    let conn = open_ledger()?;
    let mut offer = load_offer(&conn, &id)?;

    match offer.move_to_onboarding() {
        Ok(()) => {
            OfferRepo::save(&conn, &offer)?;
            println!("Moved offer {} ({}) to onboarding", offer.id, offer.candidate_name);
        }
        Err(reason) => {
            println!("Offer {} ({}) not moved to onboarding: {}", offer.id, offer.candidate_name, reason);
        }
    }
    Ok(())
}

// Status

fn handle_status(json: bool) -> Result<()> {
    let conn = open_ledger()?;
    let dashboard = compute_dashboard(&conn, now())?;
    if json {
        return print_json(&dashboard);
    }
    print!("{}", format_dashboard(&dashboard));
    Ok(())
}
