//! App Core for fontsurvey.
//!
//! Central struct holding the reviewer, the configured font source, the
//! settings engine and the submission gateway.

use std::path::Path;
use std::sync::Arc;

use log::{info, warn};

use crate::managers::font_reviewer::FontReviewer;
use crate::platform;
use crate::services::font_source::{self, FontSource};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::services::submission_gateway::{Credential, SubmissionGateway};
use crate::types::errors::ConfigError;

/// Central application struct.
///
/// The gateway (and with it the credential) sits beside the reviewer, never
/// inside it; frontends hand the reviewer's payload to the gateway.
pub struct App {
    pub reviewer: FontReviewer,
    pub settings_engine: SettingsEngine,
    font_source: Arc<dyn FontSource + Send + Sync>,
    gateway: Arc<SubmissionGateway>,
}

impl App {
    /// Creates an App from already-loaded settings.
    pub fn new(
        settings_engine: SettingsEngine,
        credential: Credential,
        font_source: Arc<dyn FontSource + Send + Sync>,
        user_agent: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let gateway = SubmissionGateway::new(&settings_engine.get_settings().api_base, credential)?;
        Ok(Self {
            reviewer: FontReviewer::new(user_agent),
            settings_engine,
            font_source,
            gateway: Arc::new(gateway),
        })
    }

    /// Startup sequence: load settings from the platform config dir, read
    /// the credential from the environment, pick the configured font source.
    pub fn from_environment() -> Result<Self, ConfigError> {
        let mut settings_engine = SettingsEngine::new(None);
        let settings = settings_engine.load()?;
        if !Path::new(settings_engine.get_config_path()).exists() {
            if let Err(e) = settings_engine.save() {
                warn!("could not write default settings: {}", e);
            }
        }
        info!(
            "loaded settings from {} (font source: {:?})",
            settings_engine.get_config_path(),
            settings.font_source
        );

        let credential = Credential::from_env()?;
        let source = font_source::source_for(settings.font_source);
        Self::new(settings_engine, credential, source, platform::host_identification())
    }

    pub fn font_source(&self) -> Arc<dyn FontSource + Send + Sync> {
        self.font_source.clone()
    }

    pub fn gateway(&self) -> Arc<SubmissionGateway> {
        self.gateway.clone()
    }
}
