//! Submission gateway for fontsurvey.
//!
//! Renders a submission into a markdown record and creates it in the data
//! repository through the contents API (`PUT /repos/{owner}/{repo}/contents/{path}`).
//! This is the only module that handles the repository credential; the
//! reviewer only sees the [`FontSubmitter`] trait.

use std::fmt;
use std::future::Future;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{info, warn};
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::services::document;
use crate::types::errors::{ConfigError, GatewayError};
use crate::types::submission::{SubmissionPayload, SubmissionReceipt};

/// Environment variable holding the repository token.
pub const CREDENTIAL_ENV_VAR: &str = "FONTSURVEY_GITHUB_TOKEN";
pub const REPO_OWNER: &str = "local-fonts-inspector";
pub const REPO_NAME: &str = "local-fonts-data";
pub const REPO_BRANCH: &str = "main";

const API_ACCEPT: &str = "application/vnd.github+json";
const CLIENT_USER_AGENT: &str = concat!("fontsurvey/", env!("CARGO_PKG_VERSION"));

/// Repository write token. Wiped on drop and never printed.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Credential {
    token: String,
}

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }

    /// Reads the token from [`CREDENTIAL_ENV_VAR`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_var(CREDENTIAL_ENV_VAR)
    }

    /// Reads the token from `var`, rejecting tokens that cannot be sent as
    /// an `Authorization` header so the failure surfaces at startup.
    pub fn from_env_var(var: &str) -> Result<Self, ConfigError> {
        let raw = Zeroizing::new(std::env::var(var).unwrap_or_default());
        let token = raw.trim();
        if token.is_empty() {
            return Err(ConfigError::MissingCredential(var.to_string()));
        }
        let credential = Self::new(token);
        credential
            .authorization_header()
            .map_err(|_| ConfigError::InvalidCredential(var.to_string()))?;
        Ok(credential)
    }

    fn authorization_header(&self) -> Result<HeaderValue, GatewayError> {
        let raw = Zeroizing::new(format!("token {}", self.token));
        let mut value = HeaderValue::from_str(&raw)
            .map_err(|_| GatewayError::Transport("credential is not a valid header value".to_string()))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Millisecond clock used to name records.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> u128;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u128 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis()
    }
}

/// Trait defining the submission capability the reviewer delegates to.
pub trait FontSubmitter {
    fn submit(
        &self,
        payload: SubmissionPayload,
    ) -> impl Future<Output = Result<SubmissionReceipt, GatewayError>> + Send;
}

#[derive(Serialize)]
struct CreateFileRequest {
    message: String,
    content: String,
}

#[derive(Deserialize)]
struct CreateFileResponse {
    content: Option<CreatedContent>,
}

#[derive(Deserialize)]
struct CreatedContent {
    html_url: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Gateway writing records through the repository contents API.
pub struct SubmissionGateway<C = SystemClock> {
    client: reqwest::Client,
    api_base: String,
    credential: Credential,
    clock: C,
}

impl SubmissionGateway<SystemClock> {
    pub fn new(api_base: &str, credential: Credential) -> Result<Self, ConfigError> {
        Self::with_clock(api_base, credential, SystemClock)
    }
}

impl<C: Clock> SubmissionGateway<C> {
    pub fn with_clock(api_base: &str, credential: Credential, clock: C) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .user_agent(CLIENT_USER_AGENT)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            credential,
            clock,
        })
    }

    /// API endpoint that creates `path`.
    pub fn contents_url(&self, path: &str) -> String {
        format!("{}/repos/{}/{}/contents/{}", self.api_base, REPO_OWNER, REPO_NAME, path)
    }

    /// Browsable URL of `path`, used when the API response omits one.
    pub fn browse_url(&self, path: &str) -> String {
        format!("https://github.com/{}/{}/blob/{}/{}", REPO_OWNER, REPO_NAME, REPO_BRANCH, path)
    }

    /// Creates one record for `payload`. Each call takes a fresh timestamp,
    /// so a retry never targets the path of a failed attempt.
    pub async fn create_record(
        &self,
        payload: &SubmissionPayload,
    ) -> Result<SubmissionReceipt, GatewayError> {
        let record = document::build_record(payload, self.clock.now_millis());
        let body = CreateFileRequest {
            message: format!("Add font list {}", record.path),
            content: document::encode_content(&record.content),
        };

        info!(
            "submitting {} fonts to {}/{} at {}",
            payload.fonts().len(),
            REPO_OWNER,
            REPO_NAME,
            record.path
        );

        let response = self
            .client
            .put(self.contents_url(&record.path))
            .header(AUTHORIZATION, self.credential.authorization_header()?)
            .header(ACCEPT, API_ACCEPT)
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .map(|b| b.message)
                .unwrap_or_else(|_| format!("HTTP {}", status));
            warn!("repository rejected {}: {} ({})", record.path, message, status.as_u16());
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let html_url = serde_json::from_str::<CreateFileResponse>(&text)
            .ok()
            .and_then(|r| r.content)
            .and_then(|c| c.html_url)
            .unwrap_or_else(|| self.browse_url(&record.path));

        info!("created {}", html_url);
        Ok(SubmissionReceipt {
            message: format!(
                "Successfully submitted {} fonts and user-agent information",
                payload.fonts().len()
            ),
            html_url,
            path: record.path,
        })
    }
}

impl<C: Clock> FontSubmitter for SubmissionGateway<C> {
    fn submit(
        &self,
        payload: SubmissionPayload,
    ) -> impl Future<Output = Result<SubmissionReceipt, GatewayError>> + Send {
        async move { self.create_record(&payload).await }
    }
}
