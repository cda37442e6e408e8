//! Requests rejected by the gateway before reaching the backend.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use rstest::rstest;
use serde_json::{json, Value};

use common::{backend_calls, setup, with_cookie};

fn referral(last_apply_date: Value) -> Value {
    json!({
        "jobDetails": {
            "title": "SDE Intern",
            "description": "Summer internship",
            "company": "Acme",
            "role": "Intern",
            "link": "https://acme.example/jobs/42"
        },
        "lastApplyDate": last_apply_date,
        "numberOfReferrals": 2
    })
}

fn assert_rejected(response: axum_test::TestResponse, message: &str) {
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], message);
}

#[tokio::test]
async fn test_create_job_missing_fields() {
    let (server, backend) = setup().await;

    let response = with_cookie(server.post("/api/jobs"))
        .json(&json!({ "jobName": "Backend Engineer", "company": "Acme" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("Missing required fields: "));
    assert!(message.contains("role"));
    assert!(message.contains("eligibility.batch"));
    assert!(!message.contains("jobName"));
    assert_eq!(backend_calls(&backend).await, 0);
}

fn valid_job() -> Value {
    json!({
        "jobName": "Backend Engineer",
        "company": "Acme",
        "role": "SDE-1",
        "description": "Build services",
        "type": "fulltime",
        "stipend": "20 LPA",
        "duration": "Permanent",
        "workType": "hybrid",
        "links": ["https://acme.example/careers/1"],
        "lastApplyDate": "2099-01-01",
        "eligibility": { "requirements": ["Rust"], "batch": ["2024"] }
    })
}

/// Remove a possibly dotted field from `body`.
fn remove_field(body: &mut Value, field: &str) {
    let (parent, key) = match field.rsplit_once('.') {
        Some((parent, key)) => (&mut body[parent], key),
        None => (body, field),
    };
    parent.as_object_mut().unwrap().remove(key);
}

#[rstest]
#[case("jobName")]
#[case("company")]
#[case("role")]
#[case("description")]
#[case("type")]
#[case("stipend")]
#[case("duration")]
#[case("workType")]
#[case("links")]
#[case("lastApplyDate")]
#[case("eligibility.requirements")]
#[case("eligibility.batch")]
#[tokio::test]
async fn test_create_job_missing_single_field(#[case] field: &str) {
    let (server, backend) = setup().await;
    let mut job = valid_job();
    remove_field(&mut job, field);

    let response = with_cookie(server.post("/api/jobs")).json(&job).await;

    assert_rejected(response, &format!("Missing required fields: {}", field));
    assert_eq!(backend_calls(&backend).await, 0);
}

#[rstest]
#[case("stipend", json!(0), "Missing required fields: stipend")]
#[case("links", json!(""), "Missing required fields: links")]
#[case("role", json!(null), "Missing required fields: role")]
#[case("description", json!(false), "Missing required fields: description")]
#[case(
    "eligibility",
    json!("open to all"),
    "Missing required fields: eligibility.requirements, eligibility.batch"
)]
#[tokio::test]
async fn test_create_job_falsy_field_counts_as_missing(
    #[case] field: &str,
    #[case] value: Value,
    #[case] message: &str,
) {
    let (server, backend) = setup().await;
    let mut job = valid_job();
    job[field] = value;

    let response = with_cookie(server.post("/api/jobs")).json(&job).await;

    assert_rejected(response, message);
    assert_eq!(backend_calls(&backend).await, 0);
}

#[tokio::test]
async fn test_create_referral_invalid_link() {
    let (server, backend) = setup().await;
    let tomorrow = (Utc::now() + Duration::days(1)).to_rfc3339();
    let mut body = referral(json!(tomorrow));
    body["jobDetails"]["link"] = json!("acme careers page");

    let response = with_cookie(server.post("/api/referrals")).json(&body).await;

    assert_rejected(response, "Please provide a valid URL for the job link");
    assert_eq!(backend_calls(&backend).await, 0);
}

#[tokio::test]
async fn test_create_referral_past_date() {
    let (server, backend) = setup().await;
    let yesterday = (Utc::now() - Duration::days(1)).to_rfc3339();

    let response = with_cookie(server.post("/api/referrals"))
        .json(&referral(json!(yesterday)))
        .await;

    assert_rejected(response, "Last apply date must be in the future");
    assert_eq!(backend_calls(&backend).await, 0);
}

#[tokio::test]
async fn test_create_referral_negative_count() {
    let (server, _backend) = setup().await;
    let tomorrow = (Utc::now() + Duration::days(1)).to_rfc3339();
    let mut body = referral(json!(tomorrow));
    body["numberOfReferrals"] = json!(-3);

    let response = with_cookie(server.post("/api/referrals")).json(&body).await;

    assert_rejected(response, "Number of referrals must be a non-negative number");
}

#[rstest]
#[case("/api/jobs/filter", "month", "13", "Invalid month value.")]
#[case("/api/jobs/filter", "month", "0", "Invalid month value.")]
#[case("/api/jobs/filter", "year", "1999", "Invalid year value.")]
#[case("/api/referrals/filter", "month", "march", "Invalid month value.")]
#[case("/api/referrals/filter", "year", "20", "Invalid year value.")]
#[case("/api/events", "month", "14", "Invalid month value.")]
#[case("/api/events", "year", "abcd", "Invalid year value.")]
#[tokio::test]
async fn test_filter_rejects_bad_month_or_year(
    #[case] path: &str,
    #[case] param: &str,
    #[case] value: &str,
    #[case] message: &str,
) {
    let (server, backend) = setup().await;

    let response = with_cookie(server.get(path))
        .add_query_param(param, value)
        .await;

    assert_rejected(response, message);
    assert_eq!(backend_calls(&backend).await, 0);
}

#[rstest]
#[case("/api/jobs/filter", "month")]
#[case("/api/referrals/filter", "month")]
#[case("/api/events", "year")]
#[tokio::test]
async fn test_filter_undecodable_query_is_json_400(#[case] path: &str, #[case] param: &str) {
    let (server, backend) = setup().await;

    let response = with_cookie(server.get(path))
        .add_query_param(param, "2024")
        .add_query_param(param, "2025")
        .await;

    assert_rejected(response, "Invalid query parameters");
    assert_eq!(backend_calls(&backend).await, 0);
}

#[tokio::test]
async fn test_create_job_rejects_unknown_type() {
    let (server, _backend) = setup().await;
    let mut job = valid_job();
    job["type"] = json!("gig");

    let response = with_cookie(server.post("/api/jobs")).json(&job).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_submission_requires_all_fields() {
    let (server, _backend) = setup().await;

    let response = with_cookie(server.post("/api/referralsubmissions"))
        .json(&json!({ "referralId": "r-1", "resumeLink": "https://drive.example/cv.pdf" }))
        .await;

    assert_rejected(response, "Missing required fields: coverLetter, whyReferMe");
}

#[tokio::test]
async fn test_submission_status_must_be_known() {
    let (server, backend) = setup().await;

    let response = with_cookie(server.put("/api/referralsubmissions/s-1"))
        .json(&json!({ "status": "maybe" }))
        .await;

    assert_rejected(
        response,
        "Invalid status value. Must be 'accepted' or 'rejected'",
    );
    assert_eq!(backend_calls(&backend).await, 0);
}

#[tokio::test]
async fn test_alumni_details_require_all_fields() {
    let (server, _backend) = setup().await;

    let response = with_cookie(server.post("/api/alumnidetails"))
        .json(&json!({ "jobPosition": "SDE", "education": "B.Tech" }))
        .await;

    assert_rejected(response, "All required fields must be provided.");
}

#[tokio::test]
async fn test_login_requires_credentials() {
    let (server, backend) = setup().await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "identifier": "asha@college.example" }))
        .await;

    assert_rejected(response, "Identifier and password are required.");
    assert_eq!(backend_calls(&backend).await, 0);
}

#[tokio::test]
async fn test_contact_requires_subject_and_message() {
    let (server, _backend) = setup().await;

    let response = server
        .post("/api/contactus")
        .json(&json!({ "subject": "Help" }))
        .await;

    assert_rejected(response, "All fields are required.");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (server, backend) = setup().await;

    let response = with_cookie(server.post("/api/referrals"))
        .text("{not json")
        .await;

    assert_rejected(response, "Invalid JSON body");
    assert_eq!(backend_calls(&backend).await, 0);
}

#[tokio::test]
async fn test_non_object_json_is_bad_request() {
    let (server, backend) = setup().await;

    let response = with_cookie(server.post("/api/jobs"))
        .json(&json!([{ "jobName": "Backend Engineer" }]))
        .await;

    assert_rejected(response, "Invalid JSON body");
    assert_eq!(backend_calls(&backend).await, 0);
}
