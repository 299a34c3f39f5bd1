use fontsurvey::types::errors::*;

// === CollectError Tests ===

#[test]
fn collect_error_unsupported_display() {
    assert_eq!(
        CollectError::UnsupportedCapability.to_string(),
        "This platform does not support querying local fonts."
    );
}

#[test]
fn collect_error_permission_denied_display() {
    let err = CollectError::PermissionDenied("user dismissed the prompt".to_string());
    assert_eq!(
        err.to_string(),
        "Permission to query local fonts was denied. Make sure you've granted the necessary permissions. (user dismissed the prompt)"
    );
}

#[test]
fn collect_error_query_failed_display() {
    let err = CollectError::QueryFailed("InvalidStateError: detached".to_string());
    assert_eq!(
        err.to_string(),
        "An error occurred while querying local fonts: InvalidStateError: detached"
    );
}

// === GatewayError Tests ===

#[test]
fn gateway_error_upstream_displays_message_verbatim() {
    let err = GatewayError::Upstream {
        status: 422,
        message: "Invalid request.\n\n\"sha\" wasn't supplied.".to_string(),
    };
    assert_eq!(err.to_string(), "Invalid request.\n\n\"sha\" wasn't supplied.");
    assert_eq!(err.message(), "Invalid request.\n\n\"sha\" wasn't supplied.");
}

#[test]
fn gateway_error_transport_display() {
    let err = GatewayError::Transport("connection refused".to_string());
    assert_eq!(err.to_string(), "Submission transport error: connection refused");
    assert_eq!(err.message(), "connection refused");
}

// === ReviewError Tests ===

#[test]
fn review_error_display_variants() {
    assert_eq!(
        ReviewError::InvalidState { operation: "submit", phase: "idle" }.to_string(),
        "Cannot submit while idle"
    );
    assert_eq!(
        ReviewError::IndexOutOfRange { index: 5, len: 2 }.to_string(),
        "Font index 5 out of range (list has 2 entries)"
    );
    assert_eq!(
        ReviewError::SubmissionInFlight.to_string(),
        "A submission is already in progress"
    );
    assert_eq!(
        ReviewError::AlreadySubmitted.to_string(),
        "Fonts have already been submitted"
    );
}

#[test]
fn review_error_wraps_collect_and_gateway_errors() {
    let err: ReviewError = CollectError::UnsupportedCapability.into();
    assert_eq!(err.to_string(), CollectError::UnsupportedCapability.to_string());

    let gw = GatewayError::Upstream { status: 409, message: "conflict".to_string() };
    let err: ReviewError = gw.clone().into();
    assert_eq!(err, ReviewError::Gateway(gw));
    assert_eq!(err.to_string(), "conflict");
}

#[test]
fn review_error_exposes_source() {
    use std::error::Error;

    let err = ReviewError::Collect(CollectError::UnsupportedCapability);
    assert!(err.source().is_some());
    assert!(ReviewError::AlreadySubmitted.source().is_none());
}

// === ConfigError Tests ===

#[test]
fn config_error_display_variants() {
    assert_eq!(
        ConfigError::MissingCredential("FONTSURVEY_GITHUB_TOKEN".to_string()).to_string(),
        "Missing credential: set the FONTSURVEY_GITHUB_TOKEN environment variable"
    );
    assert_eq!(
        ConfigError::InvalidCredential("FONTSURVEY_GITHUB_TOKEN".to_string()).to_string(),
        "Invalid credential: the FONTSURVEY_GITHUB_TOKEN environment variable contains characters not allowed in a header"
    );
    assert_eq!(
        ConfigError::IoError("permission denied".to_string()).to_string(),
        "Settings I/O error: permission denied"
    );
    assert_eq!(
        ConfigError::SerializationError("expected value".to_string()).to_string(),
        "Settings serialization error: expected value"
    );
    assert_eq!(
        ConfigError::HttpClient("no TLS backend".to_string()).to_string(),
        "HTTP client error: no TLS backend"
    );
}

#[test]
fn config_error_implements_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(ConfigError::IoError("x".to_string()));
    assert!(err.source().is_none());
}
