use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use std::fs;

fn setup_test_env() -> (TempDir, std::sync::MutexGuard<'static, ()>) {
    let guard = test_env::lock_test_env();
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let config_dir = temp_dir.path().join(".recruit");
    fs::create_dir_all(&config_dir).unwrap();
    let config_file = config_dir.join("rc");
    fs::write(&config_file, format!("data.location={}\n", db_path.display())).unwrap();
    std::env::set_var("HOME", temp_dir.path().to_str().unwrap());
    (temp_dir, guard)
}

fn get_recruit_cmd(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("recruit").unwrap();
    cmd.env("HOME", temp_dir.path());
    cmd
}

fn json_output(temp_dir: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = get_recruit_cmd(temp_dir).args(args).output().unwrap();
    assert!(output.status.success(), "command failed: {:?}", args);
    serde_json::from_slice(&output.stdout).unwrap()
}

// Jobs

#[test]
fn test_jobs_list_filters() {
    let (temp_dir, _guard) = setup_test_env();

    get_recruit_cmd(&temp_dir).args(["jobs", "list"]).assert().success()
        .stdout(predicate::str::contains("Frontend Developer"))
        .stdout(predicate::str::contains("HR Specialist"))
        .stdout(predicate::str::contains("On Hold"));

    get_recruit_cmd(&temp_dir).args(["jobs", "list", "--status", "on-hold"]).assert().success()
        .stdout(predicate::str::contains("Content Writer"))
        .stdout(predicate::str::contains("Frontend Developer").not());

    get_recruit_cmd(&temp_dir).args(["jobs", "list", "--department", "engineering", "back"]).assert().success()
        .stdout(predicate::str::contains("Backend Engineer"))
        .stdout(predicate::str::contains("Frontend Developer").not());

    get_recruit_cmd(&temp_dir).args(["jobs", "list", "nothing-matches-this"]).assert().success()
        .stdout(predicate::str::contains("No job openings match your filters"));
}

#[test]
fn test_jobs_list_rejects_bad_values() {
    let (temp_dir, _guard) = setup_test_env();

    get_recruit_cmd(&temp_dir).args(["jobs", "list", "--status", "opne"]).assert().failure().code(1)
        .stderr(predicate::str::contains("Invalid job status 'opne'. Did you mean 'open'?"));

    get_recruit_cmd(&temp_dir).args(["jobs", "list", "--department", "Enginering"]).assert().failure().code(1)
        .stderr(predicate::str::contains("Did you mean 'Engineering'?"));
}

#[test]
fn test_job_pause_reopen_close() {
    let (temp_dir, _guard) = setup_test_env();

    get_recruit_cmd(&temp_dir).args(["jobs", "pause", "1"]).assert().success()
        .stdout(predicate::str::contains("Paused job 1 (Frontend Developer): Open -> On Hold"));
    get_recruit_cmd(&temp_dir).args(["jobs", "pause", "1"]).assert().success()
        .stdout(predicate::str::contains("is On Hold; pause does not apply"));
    get_recruit_cmd(&temp_dir).args(["jobs", "reopen", "1"]).assert().success()
        .stdout(predicate::str::contains("On Hold -> Open"));
    get_recruit_cmd(&temp_dir).args(["jobs", "close", "5"]).assert().success()
        .stdout(predicate::str::contains("is Closed; close does not apply"));
    get_recruit_cmd(&temp_dir).args(["jobs", "close", "4"]).assert().success()
        .stdout(predicate::str::contains("Closed job 4 (Content Writer): On Hold -> Closed"));

    let jobs = json_output(&temp_dir, &["jobs", "list", "--status", "closed", "--json"]);
    let titles: Vec<&str> = jobs.as_array().unwrap().iter()
        .map(|j| j["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Content Writer", "HR Specialist"]);
}

#[test]
fn test_job_not_found() {
    let (temp_dir, _guard) = setup_test_env();

    get_recruit_cmd(&temp_dir).args(["jobs", "pause", "42"]).assert().failure().code(1)
        .stderr(predicate::str::contains("Job 42 not found"));
    get_recruit_cmd(&temp_dir).args(["jobs", "pause", "abc"]).assert().failure().code(1)
        .stderr(predicate::str::contains("ID must be a number"));
}

// Applicants

#[test]
fn test_applicants_list_and_filters() {
    let (temp_dir, _guard) = setup_test_env();

    get_recruit_cmd(&temp_dir).args(["applicants", "list", "1"]).assert().success()
        .stdout(predicate::str::contains("Applicants for Frontend Developer (job 1): showing 6 of 6"));

    get_recruit_cmd(&temp_dir).args(["applicants", "list", "1", "--experience", "5+"]).assert().success()
        .stdout(predicate::str::contains("Emma Davis"))
        .stdout(predicate::str::contains("Priya Patel"))
        .stdout(predicate::str::contains("Sarah Johnson").not());

    get_recruit_cmd(&temp_dir).args(["applicants", "list", "1", "--skill", "graphql"]).assert().success()
        .stdout(predicate::str::contains("showing 1 of 6"))
        .stdout(predicate::str::contains("James Wilson"));

    get_recruit_cmd(&temp_dir).args(["applicants", "list", "1", "--status", "rejected"]).assert().success()
        .stdout(predicate::str::contains("Priya Patel"))
        .stdout(predicate::str::contains("showing 1 of 6"));

    get_recruit_cmd(&temp_dir).args(["applicants", "list", "1", "alex"]).assert().success()
        .stdout(predicate::str::contains("alex.chen@email.com"));

    get_recruit_cmd(&temp_dir).args(["applicants", "list", "2"]).assert().success()
        .stdout(predicate::str::contains("No applicants match your filters"));
}

#[test]
fn test_applicant_shortlist_and_reject() {
    let (temp_dir, _guard) = setup_test_env();

    get_recruit_cmd(&temp_dir).args(["applicants", "shortlist", "1"]).assert().success()
        .stdout(predicate::str::contains("Applicant 1 (Sarah Johnson) shortlisted"));
    get_recruit_cmd(&temp_dir).args(["applicants", "shortlist", "1"]).assert().success()
        .stdout(predicate::str::contains("is shortlisted; nothing changed"));

    // Rejected applicants have no further actions
    get_recruit_cmd(&temp_dir).args(["applicants", "shortlist", "5"]).assert().success()
        .stdout(predicate::str::contains("is rejected; nothing changed"));
    get_recruit_cmd(&temp_dir).args(["applicants", "reject", "1"]).assert().success()
        .stdout(predicate::str::contains("Applicant 1 (Sarah Johnson) rejected"));

    get_recruit_cmd(&temp_dir).args(["applicants", "show", "1"]).assert().success()
        .stdout(predicate::str::contains("Status:      rejected"));
}

#[test]
fn test_applicant_document_verification_toggles() {
    let (temp_dir, _guard) = setup_test_env();

    get_recruit_cmd(&temp_dir).args(["applicants", "show", "2"]).assert().success()
        .stdout(predicate::str::contains("Documents (3 of 4 verified)"))
        .stdout(predicate::str::contains("pending verification"));

    get_recruit_cmd(&temp_dir).args(["applicants", "verify", "2", "education-certificates"]).assert().success()
        .stdout(predicate::str::contains("Verified Education Certificates for applicant 2 (Alex Chen)"));
    get_recruit_cmd(&temp_dir).args(["applicants", "show", "2"]).assert().success()
        .stdout(predicate::str::contains("Documents (4 of 4 verified)"));

    get_recruit_cmd(&temp_dir).args(["applicants", "verify", "2", "photo"]).assert().success()
        .stdout(predicate::str::contains("Cleared verification of Photo"));
    get_recruit_cmd(&temp_dir).args(["applicants", "show", "2"]).assert().success()
        .stdout(predicate::str::contains("Documents (3 of 4 verified)"));
}

#[test]
fn test_applicant_verify_unknown_document() {
    let (temp_dir, _guard) = setup_test_env();

    get_recruit_cmd(&temp_dir).args(["applicants", "verify", "2", "phot"]).assert().failure().code(1)
        .stderr(predicate::str::contains("Invalid document 'phot'. Did you mean 'photo'?"));
}

#[test]
fn test_applicant_advance_walks_profile_workflow() {
    let (temp_dir, _guard) = setup_test_env();

    get_recruit_cmd(&temp_dir).args(["applicants", "show", "2"]).assert().success()
        .stdout(predicate::str::contains("Profile:     In Screening"))
        .stdout(predicate::str::contains("Next step:   Interview Scheduled"));

    get_recruit_cmd(&temp_dir).args(["applicants", "advance", "2", "interview"]).assert().success()
        .stdout(predicate::str::contains("Applicant 2 (Alex Chen): In Screening -> Interview Scheduled"));
    get_recruit_cmd(&temp_dir).args(["applicants", "advance", "2"]).assert().success()
        .stdout(predicate::str::contains("Interview Scheduled -> Offer Extended"));
    get_recruit_cmd(&temp_dir).args(["applicants", "advance", "2"]).assert().success()
        .stdout(predicate::str::contains("not advanced: the offer has already been extended"));

    let applicant = json_output(&temp_dir, &["applicants", "list", "1", "--json", "Alex"]);
    assert_eq!(applicant[0]["profile_status"], "offer");
}

#[test]
fn test_applicant_advance_refuses_skips_and_rejected() {
    let (temp_dir, _guard) = setup_test_env();

    get_recruit_cmd(&temp_dir).args(["applicants", "advance", "1", "offer"]).assert().success()
        .stdout(predicate::str::contains(
            "not advanced: cannot go from 'New Application' to 'Offer Extended', the next step is 'In Screening'",
        ));
    get_recruit_cmd(&temp_dir).args(["applicants", "show", "1"]).assert().success()
        .stdout(predicate::str::contains("Profile:     New Application"));

    get_recruit_cmd(&temp_dir).args(["applicants", "advance", "5"]).assert().success()
        .stdout(predicate::str::contains("Applicant 5 (Priya Patel) not advanced: rejected applicants cannot be progressed further"));

    get_recruit_cmd(&temp_dir).args(["applicants", "advance", "1", "hired"]).assert().failure().code(1)
        .stderr(predicate::str::contains("Invalid profile step 'hired'"));
}

#[test]
fn test_applicant_reject_ends_profile_workflow() {
    let (temp_dir, _guard) = setup_test_env();

    get_recruit_cmd(&temp_dir).args(["applicants", "reject", "3"]).assert().success();
    get_recruit_cmd(&temp_dir).args(["applicants", "show", "3"]).assert().success()
        .stdout(predicate::str::contains("Profile:     Rejected"));
    get_recruit_cmd(&temp_dir).args(["applicants", "advance", "3"]).assert().success()
        .stdout(predicate::str::contains("not advanced"));
}

#[test]
fn test_applicant_notes_replace_and_clear() {
    let (temp_dir, _guard) = setup_test_env();

    get_recruit_cmd(&temp_dir).args(["applicants", "show", "3"]).assert().success()
        .stdout(predicate::str::contains("Excellent portfolio. Interview scheduled for 2026-01-30."));
    get_recruit_cmd(&temp_dir).args(["applicants", "show", "4"]).assert().success()
        .stdout(predicate::str::contains("Notes:\n  (none)"));

    get_recruit_cmd(&temp_dir).args(["applicants", "note", "4", "Strong", "CSS", "portfolio"]).assert().success()
        .stdout(predicate::str::contains("Updated notes for applicant 4 (Michael Rodriguez)"));
    get_recruit_cmd(&temp_dir).args(["applicants", "show", "4"]).assert().success()
        .stdout(predicate::str::contains("Notes:\n  Strong CSS portfolio"));

    get_recruit_cmd(&temp_dir).args(["applicants", "note", "4", "--clear"]).assert().success()
        .stdout(predicate::str::contains("Cleared notes for applicant 4"));
    get_recruit_cmd(&temp_dir).args(["applicants", "show", "4"]).assert().success()
        .stdout(predicate::str::contains("Notes:\n  (none)"));

    get_recruit_cmd(&temp_dir).args(["applicants", "note", "4"]).assert().failure().code(1)
        .stderr(predicate::str::contains("Note cannot be empty"));
}

#[test]
fn test_corrupt_applicant_row_is_internal_error() {
    let (temp_dir, _guard) = setup_test_env();
    get_recruit_cmd(&temp_dir).args(["applicants", "show", "3"]).assert().success();

    let conn = rusqlite::Connection::open(temp_dir.path().join("test.db")).unwrap();
    conn.execute("UPDATE applicants SET documents_json = 'not json' WHERE id = 3", []).unwrap();
    drop(conn);

    get_recruit_cmd(&temp_dir).args(["applicants", "verify", "3", "photo"]).assert().failure().code(2)
        .stderr(predicate::str::contains("Failed to load applicant 3"));
    get_recruit_cmd(&temp_dir).args(["applicants", "list", "1"]).assert().failure().code(2);

    // Nothing was written back over the bad row
    let conn = rusqlite::Connection::open(temp_dir.path().join("test.db")).unwrap();
    let stored: String = conn
        .query_row("SELECT documents_json FROM applicants WHERE id = 3", [], |row| row.get(0))
        .unwrap();
    assert_eq!(stored, "not json");
}

// Offers

#[test]
fn test_offers_list_and_summary() {
    let (temp_dir, _guard) = setup_test_env();

    get_recruit_cmd(&temp_dir).args(["offers", "list"]).assert().success()
        .stdout(predicate::str::contains("Offer Sent"))
        .stdout(predicate::str::contains("$135,000"))
        .stdout(predicate::str::contains("3 accepted, 1 sent, 1 declined"));

    get_recruit_cmd(&temp_dir).args(["offers", "list", "--status", "accepted", "--job", "1"]).assert().success()
        .stdout(predicate::str::contains("Sarah Johnson"))
        .stdout(predicate::str::contains("Emma Davis").not())
        .stdout(predicate::str::contains("1 accepted, 0 sent, 0 declined"));

    let offers = json_output(&temp_dir, &["offers", "list", "--json", "priya"]);
    let offers = offers.as_array().unwrap();
    assert_eq!(offers.len(), 1);
    assert_eq!(offers[0]["status"], "pending");
    assert!(offers[0]["sent_ts"].is_null());
}

#[test]
fn test_offer_set_status() {
    let (temp_dir, _guard) = setup_test_env();

    get_recruit_cmd(&temp_dir).args(["offers", "set-status", "2", "accepted"]).assert().success()
        .stdout(predicate::str::contains("Offer 2 (Alex Chen): Offer Sent -> Accepted"));
    get_recruit_cmd(&temp_dir).args(["offers", "set-status", "2", "accepted"]).assert().success()
        .stdout(predicate::str::contains("already Accepted; nothing changed"));
    get_recruit_cmd(&temp_dir).args(["offers", "set-status", "2", "acepted"]).assert().failure().code(1)
        .stderr(predicate::str::contains("Did you mean 'accepted'?"));
}

#[test]
fn test_offer_onboarding_only_from_accepted() {
    let (temp_dir, _guard) = setup_test_env();

    get_recruit_cmd(&temp_dir).args(["offers", "onboard", "2"]).assert().success()
        .stdout(predicate::str::contains("not moved to onboarding"))
        .stdout(predicate::str::contains("only accepted offers move to onboarding"));

    get_recruit_cmd(&temp_dir).args(["offers", "onboard", "1"]).assert().success()
        .stdout(predicate::str::contains("Moved offer 1 (Sarah Johnson) to onboarding"));
    get_recruit_cmd(&temp_dir).args(["offers", "onboard", "1"]).assert().success()
        .stdout(predicate::str::contains("already moved to onboarding"));
}

// Status

#[test]
fn test_status_dashboard() {
    let (temp_dir, _guard) = setup_test_env();

    get_recruit_cmd(&temp_dir).args(["status"]).assert().success()
        .stdout(predicate::str::contains("Jobs: 3 open, 1 on hold"))
        .stdout(predicate::str::contains("Pipeline: 9 active candidates, 0 SLA breaches"))
        .stdout(predicate::str::contains("Onboarding: 3 waiting"));

    get_recruit_cmd(&temp_dir).args(["offers", "onboard", "6"]).assert().success();

    let dashboard = json_output(&temp_dir, &["status", "--json"]);
    assert_eq!(dashboard["open_jobs"], 3);
    assert_eq!(dashboard["active_candidates"], 9);
    assert_eq!(dashboard["stages"][0]["stage"], "screening");
    assert_eq!(dashboard["stages"][0]["count"], 2);
    assert_eq!(dashboard["awaiting_onboarding"].as_array().unwrap().len(), 2);
}

#[test]
fn test_changes_persist_in_ledger_file() {
    let (temp_dir, _guard) = setup_test_env();

    get_recruit_cmd(&temp_dir).args(["jobs", "pause", "2"]).assert().success();
    assert!(temp_dir.path().join("test.db").exists());

    get_recruit_cmd(&temp_dir).args(["status"]).assert().success()
        .stdout(predicate::str::contains("Jobs: 2 open, 2 on hold"));
}
