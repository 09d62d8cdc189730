// Output formatting utilities

use crate::models::{days_until_joining, Applicant, ApplicantStatus, CandidateRecord, JobOpening, Offer, Stage};
use crate::pipeline::{is_sla_breach, PipelineView, SLA_THRESHOLD_DAYS};
use crate::utils::format_date;
use std::io::IsTerminal;

// ANSI escape codes for terminal formatting
const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_RESET: &str = "\x1b[0m";
const ANSI_FG_RED: &str = "\x1b[31m";
const ANSI_FG_BRIGHT_BLACK: &str = "\x1b[90m";

const BOARD_COLUMN_GAP: &str = "  ";
/// Marker for a record over the SLA threshold, shared by every pipeline view
const SLA_BREACH_LABEL: &str = "SLA BREACH";
const BOARD_MIN_COLUMN_WIDTH: usize = 18;
const BOARD_MAX_COLUMN_WIDTH: usize = 30;

/// Check if stdout is a terminal (TTY)
pub fn is_tty() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width dynamically
///
/// Uses the `terminal_size` crate for reliable detection, with fallback to
/// COLUMNS environment variable and a sensible default.
pub fn get_terminal_width() -> usize {
    if let Some((terminal_size::Width(w), _)) = terminal_size::terminal_size() {
        if w > 0 {
            return w as usize;
        }
    }

    if let Ok(cols) = std::env::var("COLUMNS") {
        if let Ok(width) = cols.parse::<usize>() {
            if width > 0 && width < 10000 {
                return width;
            }
        }
    }

    120
}

fn bold_if_tty(text: &str, is_tty: bool) -> String {
    if is_tty {
        format!("{}{}{}", ANSI_BOLD, text, ANSI_RESET)
    } else {
        text.to_string()
    }
}

fn colorize(text: &str, color: &str, enabled: bool) -> String {
    if enabled {
        format!("{}{}{}", color, text, ANSI_RESET)
    } else {
        text.to_string()
    }
}

/// Truncate to `width` characters, marking the cut with ".."
fn truncate(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return text.to_string();
    }
    if width <= 2 {
        return text.chars().take(width).collect();
    }
    let mut out: String = text.chars().take(width - 2).collect();
    out.push_str("..");
    out
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - len))
    }
}

fn plural(count: usize, word: &str) -> String {
    format!("{} {}{}", count, word, if count == 1 { "" } else { "s" })
}

/// Render a plain table with a header rule. Column widths fit the content.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let render_row = |cells: Vec<String>| -> String {
        let line = cells
            .iter()
            .zip(widths.iter())
            .map(|(c, w)| pad(c, *w))
            .collect::<Vec<_>>()
            .join(" ");
        format!("{}\n", line.trim_end())
    };

    let mut output = String::new();
    output.push_str(&render_row(headers.iter().map(|h| h.to_string()).collect()));
    output.push_str(&render_row(widths.iter().map(|w| "-".repeat(*w)).collect()));
    for row in rows {
        output.push_str(&render_row(row.clone()));
    }
    output
}

fn days_label(days: u32) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", days)
    }
}

fn sla_label(days: u32) -> &'static str {
    if is_sla_breach(days) {
        SLA_BREACH_LABEL
    } else {
        ""
    }
}

/// One-line confirmation after a stage move
pub fn format_transition(before: &CandidateRecord, after: &CandidateRecord) -> String {
    format!(
        "Moved candidate {} ({}): {} -> {}",
        after.id, after.name, before.stage.label(), after.stage.label()
    )
}

/// Kanban board: one column per stage, side by side when the terminal is
/// wide enough, stacked sections otherwise.
pub fn format_pipeline_board(view: &PipelineView, width: usize, use_color: bool) -> String {
    let mut output = String::new();
    output.push_str(&bold_if_tty("Interview Pipeline", use_color));
    output.push_str(&format!(": {} active\n\n", plural(view.matched.len(), "candidate")));

    if view.is_empty() {
        output.push_str("No candidates in pipeline matching this filter.\n");
        output.push_str("Use `recruit pipeline jobs` to see which jobs have candidates.\n");
        return output;
    }

    let stage_count = Stage::ALL.len();
    let gap = BOARD_COLUMN_GAP.len() * (stage_count - 1);
    let column_width = (width.saturating_sub(gap) / stage_count).min(BOARD_MAX_COLUMN_WIDTH);

    if column_width >= BOARD_MIN_COLUMN_WIDTH {
        output.push_str(&format_board_columns(view, column_width, use_color));
    } else {
        output.push_str(&format_board_stacked(view, use_color));
    }

    output.push_str(&format!(
        "\nSLA breach: more than {} days in stage\n",
        SLA_THRESHOLD_DAYS
    ));
    output
}

fn format_board_columns(view: &PipelineView, column_width: usize, use_color: bool) -> String {
    // Each column is a list of (visible text, color) cells
    let columns: Vec<Vec<(String, Option<&str>)>> = view
        .groups
        .iter()
        .map(|group| {
            let mut cells = vec![
                (truncate(&format!("{} ({})", group.stage.label(), group.records.len()), column_width), None),
                (truncate(group.stage.description(), column_width), Some(ANSI_FG_BRIGHT_BLACK)),
                ("-".repeat(column_width), None),
            ];
            if group.records.is_empty() {
                cells.push(("No candidates".to_string(), Some(ANSI_FG_BRIGHT_BLACK)));
            }
            for record in &group.records {
                cells.push((truncate(&format!("#{} {}", record.id, record.name), column_width), None));
                if is_sla_breach(record.days_in_stage) {
                    let text = format!("  {} {}", days_label(record.days_in_stage), SLA_BREACH_LABEL);
                    cells.push((truncate(&text, column_width), Some(ANSI_FG_RED)));
                } else {
                    cells.push((format!("  {}", days_label(record.days_in_stage)), None));
                }
            }
            cells
        })
        .collect();

    let height = columns.iter().map(|c| c.len()).max().unwrap_or(0);
    let mut output = String::new();
    for row in 0..height {
        let line = columns
            .iter()
            .map(|column| match column.get(row) {
                Some((text, color)) => {
                    let padded = pad(text, column_width);
                    match color {
                        Some(c) => colorize(&padded, c, use_color),
                        None => padded,
                    }
                }
                None => " ".repeat(column_width),
            })
            .collect::<Vec<_>>()
            .join(BOARD_COLUMN_GAP);
        output.push_str(line.trim_end());
        output.push('\n');
    }
    output
}

fn format_board_stacked(view: &PipelineView, use_color: bool) -> String {
    let mut output = String::new();
    for group in &view.groups {
        output.push_str(&bold_if_tty(
            &format!("=== {} ({}) ===", group.stage.label(), group.records.len()),
            use_color,
        ));
        output.push('\n');
        if group.records.is_empty() {
            output.push_str("  No candidates\n");
        }
        for record in &group.records {
            let days = days_label(record.days_in_stage);
            let days = if is_sla_breach(record.days_in_stage) {
                colorize(&format!("{} {}", days, SLA_BREACH_LABEL), ANSI_FG_RED, use_color)
            } else {
                days
            };
            output.push_str(&format!("  [{}] #{} {} ({})\n", record.initials(), record.id, record.name, days));
        }
        output.push('\n');
    }
    output
}

pub fn format_pipeline_list(records: &[CandidateRecord]) -> String {
    if records.is_empty() {
        return "No pipeline candidates found.\n".to_string();
    }
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| vec![
            r.id.to_string(),
            r.name.clone(),
            r.job_title.clone(),
            r.stage.label().to_string(),
            r.days_in_stage.to_string(),
            sla_label(r.days_in_stage).to_string(),
        ])
        .collect();
    render_table(&["ID", "Name", "Job", "Stage", "Days", "SLA"], &rows)
}

pub fn format_candidate_detail(record: &CandidateRecord) -> String {
    let position = format!("{}/{}", record.stage.index() + 1, Stage::ALL.len());
    let sla = if is_sla_breach(record.days_in_stage) {
        format!("{} (over {} days)", SLA_BREACH_LABEL, SLA_THRESHOLD_DAYS)
    } else {
        "ok".to_string()
    };
    let next = record.stage.next().map(|s| s.label()).unwrap_or("(final stage)");
    let previous = record.stage.previous().map(|s| s.label()).unwrap_or("(first stage)");

    let mut output = String::new();
    output.push_str(&format!("Candidate {}: {}\n", record.id, record.name));
    output.push_str(&format!("Job:       {} (job {})\n", record.job_title, record.job_id));
    output.push_str(&format!("Stage:     {} ({})\n", record.stage.label(), position));
    output.push_str(&format!("In stage:  {}\n", days_label(record.days_in_stage)));
    output.push_str(&format!("SLA:       {}\n", sla));
    output.push_str(&format!("Next:      {}\n", next));
    output.push_str(&format!("Previous:  {}\n", previous));
    output
}

/// Per-stage counts in pipeline order
pub fn format_pipeline_summary(view: &PipelineView) -> String {
    let mut rows: Vec<Vec<String>> = view
        .counts()
        .into_iter()
        .map(|(stage, count)| vec![stage.label().to_string(), count.to_string()])
        .collect();
    rows.push(vec!["Total".to_string(), view.matched.len().to_string()]);
    render_table(&["Stage", "Candidates"], &rows)
}

pub fn format_breaches(records: &[&CandidateRecord]) -> String {
    if records.is_empty() {
        return format!("No SLA breaches (no candidate over {} days in stage).\n", SLA_THRESHOLD_DAYS);
    }
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| vec![
            r.id.to_string(),
            r.name.clone(),
            r.stage.label().to_string(),
            r.days_in_stage.to_string(),
        ])
        .collect();
    let mut output = render_table(&["ID", "Name", "Stage", "Days"], &rows);
    output.push_str(&format!("\n{} over {} days in stage\n", plural(records.len(), "candidate"), SLA_THRESHOLD_DAYS));
    output
}

/// Jobs with candidates in the pipeline: (id, title, candidate count)
pub fn format_pipeline_jobs(jobs: &[(i64, String, usize)]) -> String {
    if jobs.is_empty() {
        return "No jobs have candidates in the pipeline.\n".to_string();
    }
    let rows: Vec<Vec<String>> = jobs
        .iter()
        .map(|(id, title, count)| vec![id.to_string(), title.clone(), count.to_string()])
        .collect();
    render_table(&["Job", "Title", "Candidates"], &rows)
}

pub fn format_job_list(jobs: &[JobOpening]) -> String {
    if jobs.is_empty() {
        return "No job openings match your filters.\n".to_string();
    }
    let rows: Vec<Vec<String>> = jobs
        .iter()
        .map(|j| vec![
            j.id.to_string(),
            j.title.clone(),
            j.department.clone(),
            j.employment_type.clone(),
            j.location.clone(),
            j.status.label().to_string(),
            j.applicant_count.to_string(),
            format_date(j.posted_ts),
        ])
        .collect();
    render_table(
        &["ID", "Title", "Department", "Type", "Location", "Status", "Applicants", "Posted"],
        &rows,
    )
}

pub fn format_applicant_list(applicants: &[Applicant], skills_width: usize) -> String {
    if applicants.is_empty() {
        return "No applicants match your filters.\n".to_string();
    }
    let rows: Vec<Vec<String>> = applicants
        .iter()
        .map(|a| vec![
            a.id.to_string(),
            a.name.clone(),
            a.email.clone(),
            format!("{}y", a.experience_years),
            format_date(a.applied_ts),
            a.status.as_str().to_string(),
            truncate(&a.skills.join(", "), skills_width),
        ])
        .collect();
    render_table(&["ID", "Name", "Email", "Exp", "Applied", "Status", "Skills"], &rows)
}

pub fn format_applicant_detail(applicant: &Applicant, job_title: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Applicant {}: {}\n", applicant.id, applicant.name));
    output.push_str(&format!("Job:         {} (job {})\n", job_title, applicant.job_id));
    output.push_str(&format!("Status:      {}\n", applicant.status.as_str()));
    output.push_str(&format!("Email:       {}\n", applicant.email));
    output.push_str(&format!("Phone:       {}\n", applicant.phone));
    output.push_str(&format!("Experience:  {} years\n", applicant.experience_years));
    output.push_str(&format!("Applied:     {}\n", format_date(applicant.applied_ts)));
    output.push_str(&format!("Skills:      {}\n", applicant.skills.join(", ")));
    output.push_str(&format!("Profile:     {}\n", applicant.profile_status.label()));
    match applicant.profile_status.next() {
        Some(next) if applicant.status != ApplicantStatus::Rejected => {
            output.push_str(&format!("Next step:   {}\n", next.label()));
        }
        _ => {}
    }
    output.push_str(&format!(
        "\nDocuments ({} of {} verified):\n",
        applicant.verified_count(),
        applicant.documents.len()
    ));
    for (kind, doc) in &applicant.documents {
        let mark = if doc.verified { "x" } else { " " };
        let state = match (doc.submitted, doc.verified) {
            (_, true) => "verified",
            (true, false) => "pending verification",
            (false, false) => "not submitted",
        };
        output.push_str(&format!("  [{}] {:<24} {}\n", mark, kind.label(), state));
    }
    output.push_str("\nNotes:\n");
    if applicant.notes.trim().is_empty() {
        output.push_str("  (none)\n");
    } else {
        for line in applicant.notes.lines() {
            output.push_str(&format!("  {}\n", line));
        }
    }
    output
}

pub fn format_offer_list(offers: &[Offer], now: i64) -> String {
    if offers.is_empty() {
        return "No offers match your filters.\n".to_string();
    }
    let rows: Vec<Vec<String>> = offers
        .iter()
        .map(|o| {
            let joining = match (o.joining_ts, days_until_joining(o.joining_ts, now)) {
                (Some(ts), Some(days)) if days >= 0 => format!("{} (in {}d)", format_date(ts), days),
                (Some(ts), _) => format_date(ts),
                (None, _) => "-".to_string(),
            };
            vec![
                o.id.to_string(),
                o.candidate_name.clone(),
                o.job_title.clone(),
                o.status.label().to_string(),
                o.sent_ts.map(format_date).unwrap_or_else(|| "-".to_string()),
                joining,
                o.salary.clone(),
                if o.onboarded { "yes".to_string() } else { String::new() },
            ]
        })
        .collect();
    render_table(
        &["ID", "Candidate", "Job", "Status", "Sent", "Joining", "Salary", "Onboarded"],
        &rows,
    )
}
