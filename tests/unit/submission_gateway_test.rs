//! Unit tests for the submission gateway against a local responder.
//!
//! Covers request shape (method, path, auth header, body), receipt
//! construction, upstream and transport failures, and timestamp paths.

mod support;

use std::sync::atomic::{AtomicU64, Ordering};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use fontsurvey::services::submission_gateway::{
    Clock, Credential, FontSubmitter, SubmissionGateway, REPO_NAME, REPO_OWNER,
};
use fontsurvey::types::errors::{ConfigError, GatewayError};
use fontsurvey::types::font::FontEntry;
use fontsurvey::types::submission::SubmissionPayload;

struct FixedClock(u128);

impl Clock for FixedClock {
    fn now_millis(&self) -> u128 {
        self.0
    }
}

/// Advances by one millisecond per reading.
struct SteppingClock(AtomicU64);

impl Clock for SteppingClock {
    fn now_millis(&self) -> u128 {
        self.0.fetch_add(1, Ordering::SeqCst) as u128
    }
}

fn payload() -> SubmissionPayload {
    let fonts = vec![
        FontEntry::new("Arial", "Arial", "ArialMT"),
        FontEntry::new("Times New Roman", "Times New Roman", "TimesNewRomanPSMT"),
    ];
    SubmissionPayload::from_selection(&fonts, "UA/1.0", Some("macOS".to_string()))
}

fn gateway(base: &str, millis: u128) -> SubmissionGateway<FixedClock> {
    SubmissionGateway::with_clock(base, Credential::new("ghp_test"), FixedClock(millis)).unwrap()
}

#[tokio::test]
async fn test_submit_sends_authenticated_put_with_encoded_document() {
    let (base, server) = support::respond_once(
        201,
        r#"{"content":{"html_url":"https://github.example/blob/main/data/1700000000000.md"}}"#,
    )
    .await;

    let receipt = gateway(&base, 1_700_000_000_000).submit(payload()).await.unwrap();
    let requests = server.await.unwrap();
    let req = &requests[0];

    assert_eq!(req.method, "PUT");
    assert_eq!(
        req.path,
        format!("/repos/{}/{}/contents/data/1700000000000.md", REPO_OWNER, REPO_NAME)
    );
    assert_eq!(req.header("authorization"), Some("token ghp_test"));

    let body = req.json();
    assert!(body["message"].as_str().unwrap().contains("data/1700000000000.md"));
    let content = BASE64.decode(body["content"].as_str().unwrap()).unwrap();
    assert_eq!(
        String::from_utf8(content).unwrap(),
        "# UA/1.0\n## macOS\n\n 1. Arial\n 1. Times New Roman"
    );

    assert_eq!(receipt.path, "data/1700000000000.md");
    assert_eq!(receipt.html_url, "https://github.example/blob/main/data/1700000000000.md");
    assert_eq!(
        receipt.message,
        "Successfully submitted 2 fonts and user-agent information"
    );
}

#[tokio::test]
async fn test_submit_builds_browse_url_when_response_has_none() {
    let (base, server) = support::respond_once(201, "{}").await;
    let gw = gateway(&base, 42);

    let receipt = gw.submit(payload()).await.unwrap();
    server.await.unwrap();

    assert_eq!(receipt.html_url, gw.browse_url("data/42.md"));
    assert!(receipt.html_url.starts_with("https://github.com/"));
}

#[tokio::test]
async fn test_upstream_failure_surfaces_remote_message() {
    let (base, server) = support::respond_once(422, r#"{"message":"already exists"}"#).await;

    let err = gateway(&base, 1).submit(payload()).await.unwrap_err();
    server.await.unwrap();

    assert_eq!(err.to_string(), "already exists");
    assert_eq!(
        err,
        GatewayError::Upstream {
            status: 422,
            message: "already exists".to_string()
        }
    );
}

#[tokio::test]
async fn test_upstream_failure_without_json_reports_status() {
    let (base, server) = support::respond_once(500, "oops").await;

    let err = gateway(&base, 1).submit(payload()).await.unwrap_err();
    server.await.unwrap();

    match err {
        GatewayError::Upstream { status, message } => {
            assert_eq!(status, 500);
            assert!(message.starts_with("HTTP 500"), "got: {}", message);
        }
        other => panic!("expected upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let base = support::closed_base_url().await;

    let err = gateway(&base, 1).submit(payload()).await.unwrap_err();
    assert!(matches!(err, GatewayError::Transport(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_resubmission_targets_a_new_path() {
    let (base, server) = support::respond_sequence(vec![
        (422, r#"{"message":"conflict"}"#.to_string()),
        (201, "{}".to_string()),
    ])
    .await;
    let gw = SubmissionGateway::with_clock(
        &base,
        Credential::new("ghp_test"),
        SteppingClock(AtomicU64::new(1_000)),
    )
    .unwrap();

    assert!(gw.submit(payload()).await.is_err());
    let receipt = gw.submit(payload()).await.unwrap();
    let requests = server.await.unwrap();

    assert_ne!(requests[0].path, requests[1].path);
    assert!(requests[0].path.ends_with("/data/1000.md"));
    assert_eq!(receipt.path, "data/1001.md");
}

#[test]
fn test_credential_from_missing_env_var_is_config_error() {
    let err = Credential::from_env_var("FONTSURVEY_TEST_TOKEN_THAT_IS_NEVER_SET").unwrap_err();
    assert!(err.to_string().contains("FONTSURVEY_TEST_TOKEN_THAT_IS_NEVER_SET"));
}

#[test]
fn test_credential_from_env_var_reads_token() {
    std::env::set_var("FONTSURVEY_TEST_TOKEN_SET", "  ghp_from_env  ");
    let cred = Credential::from_env_var("FONTSURVEY_TEST_TOKEN_SET").unwrap();
    assert_eq!(format!("{:?}", cred), "Credential(<redacted>)");
}

#[test]
fn test_credential_not_usable_as_header_fails_at_load() {
    std::env::set_var("FONTSURVEY_TEST_TOKEN_BAD_HEADER", "ghp_one\r\nX-Injected: 1");
    let err = Credential::from_env_var("FONTSURVEY_TEST_TOKEN_BAD_HEADER").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidCredential(_)), "got {:?}", err);
    assert!(err.to_string().contains("FONTSURVEY_TEST_TOKEN_BAD_HEADER"));
}
