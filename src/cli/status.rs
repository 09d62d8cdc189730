// Status dashboard computation

use crate::models::{JobStatus, OfferStatus, Stage};
use crate::pipeline::{breaches, group_by_stage};
use crate::repo::{CandidateRepo, JobRepo, OfferRepo};
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageCount {
    pub stage: Stage,
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfferCount {
    pub status: OfferStatus,
    pub count: usize,
}

/// Recruiting snapshot shown by `recruit status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub open_jobs: usize,
    pub jobs_on_hold: usize,
    pub active_candidates: usize,
    pub sla_breaches: usize,
    pub stages: Vec<StageCount>,
    pub offers: Vec<OfferCount>,
    pub awaiting_onboarding: Vec<String>,
}

pub fn compute_dashboard(conn: &rusqlite::Connection, now: i64) -> Result<Dashboard> {
    let jobs = JobRepo::list_all(conn)?;
    let records = CandidateRepo::list_all(conn, now)?;
    let offers = OfferRepo::list_all(conn)?;

    let view = group_by_stage(&records, None);
    let stages = view
        .counts()
        .into_iter()
        .map(|(stage, count)| StageCount { stage, label: stage.label(), count })
        .collect();

    let offer_counts = OfferStatus::ALL
        .iter()
        .map(|status| OfferCount {
            status: *status,
            count: offers.iter().filter(|o| o.status == *status).count(),
        })
        .collect();

    Ok(Dashboard {
        open_jobs: jobs.iter().filter(|j| j.status == JobStatus::Open).count(),
        jobs_on_hold: jobs.iter().filter(|j| j.status == JobStatus::OnHold).count(),
        active_candidates: records.len(),
        sla_breaches: breaches(&records).len(),
        stages,
        offers: offer_counts,
        awaiting_onboarding: offers
            .iter()
            .filter(|o| o.awaiting_onboarding())
            .map(|o| o.candidate_name.clone())
            .collect(),
    })
}

pub fn format_dashboard(dashboard: &Dashboard) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Jobs: {} open, {} on hold\n",
        dashboard.open_jobs, dashboard.jobs_on_hold
    ));
    output.push_str(&format!(
        "Pipeline: {} active candidates, {} SLA breaches\n",
        dashboard.active_candidates, dashboard.sla_breaches
    ));
    for stage in &dashboard.stages {
        output.push_str(&format!("  {:<22}{}\n", stage.label, stage.count));
    }

    let offers = dashboard
        .offers
        .iter()
        .map(|o| format!("{} {}", o.count, o.status.as_str()))
        .collect::<Vec<_>>()
        .join(", ");
    output.push_str(&format!("Offers: {}\n", offers));

    if dashboard.awaiting_onboarding.is_empty() {
        output.push_str("Onboarding: nobody waiting\n");
    } else {
        output.push_str(&format!(
            "Onboarding: {} waiting ({})\n",
            dashboard.awaiting_onboarding.len(),
            dashboard.awaiting_onboarding.join(", ")
        ));
    }
    output
}
