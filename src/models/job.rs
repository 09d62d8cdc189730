use serde::{Deserialize, Serialize};

/// Job opening status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobStatus {
    Open,
    OnHold,
    Closed,
}

impl JobStatus {
    pub const ALL: [JobStatus; 3] = [JobStatus::Open, JobStatus::OnHold, JobStatus::Closed];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Open => "open",
            JobStatus::OnHold => "on-hold",
            JobStatus::Closed => "closed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::Open => "Open",
            JobStatus::OnHold => "On Hold",
            JobStatus::Closed => "Closed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "open" => Some(JobStatus::Open),
            "on-hold" | "on hold" | "onhold" | "hold" => Some(JobStatus::OnHold),
            "closed" => Some(JobStatus::Closed),
            _ => None,
        }
    }
}

/// A job opening
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobOpening {
    pub id: i64,
    pub title: String,
    pub department: String,
    pub employment_type: String,
    pub location: String,
    pub status: JobStatus,
    pub applicant_count: u32,
    pub posted_ts: i64,
}

impl JobOpening {
    /// Pause hiring. Only open jobs can be paused.
    pub fn pause(&mut self) -> bool {
        if self.status == JobStatus::Open {
            self.status = JobStatus::OnHold;
            true
        } else {
            false
        }
    }

    /// Resume hiring on a paused job
    pub fn reopen(&mut self) -> bool {
        if self.status == JobStatus::OnHold {
            self.status = JobStatus::Open;
            true
        } else {
            false
        }
    }

    pub fn close(&mut self) -> bool {
        if self.status == JobStatus::Closed {
            false
        } else {
            self.status = JobStatus::Closed;
            true
        }
    }
}

/// Criteria for the job openings list. Unset criteria match everything.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub search: Option<String>,
    pub department: Option<String>,
    pub status: Option<JobStatus>,
}

impl JobFilter {
    pub fn matches(&self, job: &JobOpening) -> bool {
        let matches_search = self.search.as_deref()
            .map(|term| job.title.to_lowercase().contains(&term.to_lowercase()))
            .unwrap_or(true);
        let matches_department = self.department.as_deref()
            .map(|d| job.department.eq_ignore_ascii_case(d))
            .unwrap_or(true);
        let matches_status = self.status.map(|s| job.status == s).unwrap_or(true);
        matches_search && matches_department && matches_status
    }
}
