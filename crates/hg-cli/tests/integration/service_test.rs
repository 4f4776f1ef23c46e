use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

use crate::support::{hardgates, CannedService};

#[test]
fn status_of_running_job() {
    let home = TempDir::new().unwrap();
    let service = CannedService::start(vec![(
        200,
        json!({ "assessment_id": "a-1", "status": "running" }).to_string(),
    )]);

    hardgates(&home)
        .args(["status", "a-1", "--api-url", &service.url])
        .assert()
        .success()
        .stdout(predicate::str::contains("Assessment a-1 is still running"));
    assert_eq!(service.request_lines(), vec!["GET /analyze/a-1 HTTP/1.1".to_string()]);
}

#[test]
fn status_of_completed_job_renders_report() {
    let home = TempDir::new().unwrap();
    let service = CannedService::start(vec![(
        200,
        json!({
            "assessment_id": "a-1",
            "project_name": "ledger",
            "results": {
                "security_quality_analysis": {
                    "availability": { "retry_logic": { "implemented": "yes" } }
                }
            }
        })
        .to_string(),
    )]);

    hardgates(&home)
        .args(["status", "a-1", "--api-url", &service.url])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hard Gate Assessment - ledger"))
        .stdout(predicate::str::contains("Compliance:      6.7%"));
}

#[test]
fn api_url_from_environment() {
    let home = TempDir::new().unwrap();
    let service = CannedService::start(vec![(
        200,
        json!({ "status": "healthy", "llm_configured": true, "active_assessments": 2 }).to_string(),
    )]);

    hardgates(&home)
        .arg("health")
        .env("HARDGATES_API_URL", &service.url)
        .assert()
        .success()
        .stdout(predicate::str::contains("healthy"))
        .stdout(predicate::str::contains("Active assessments: 2"));
    assert_eq!(service.request_lines(), vec!["GET /health HTTP/1.1".to_string()]);
}

#[test]
fn list_prints_table() {
    let home = TempDir::new().unwrap();
    let service = CannedService::start(vec![(
        200,
        json!({
            "assessments": [
                { "assessment_id": "a-1", "status": "completed", "started_at": "2026-01-12T10:00:00.5", "completed_at": "2026-01-12T10:03:10" },
                { "assessment_id": "a-2", "status": "running", "started_at": "2026-01-12T10:05:00" }
            ],
            "total": 2
        })
        .to_string(),
    )]);

    hardgates(&home)
        .args(["list", "--api-url", &service.url])
        .assert()
        .success()
        .stdout(predicate::str::contains("a-1"))
        .stdout(predicate::str::contains("2026-01-12 10:03"))
        .stdout(predicate::str::contains("2 assessment(s)"));
}

#[test]
fn delete_missing_assessment_fails() {
    let home = TempDir::new().unwrap();
    let service = CannedService::start(vec![(
        404,
        json!({ "detail": "Assessment not found" }).to_string(),
    )]);

    hardgates(&home)
        .args(["delete", "nope", "--api-url", &service.url])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Assessment not found"));
    assert_eq!(service.request_lines(), vec!["DELETE /analyze/nope HTTP/1.1".to_string()]);
}
