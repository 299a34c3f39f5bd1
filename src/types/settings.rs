use serde::{Deserialize, Serialize};

/// Default base URL of the repository API.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Non-secret survey settings, persisted as JSON in the config directory.
///
/// The credential is not stored here. It comes from the environment and
/// only the gateway reads it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SurveySettings {
    /// Base URL of the repository API (GitHub or a compatible server).
    pub api_base: String,
    /// Where fonts are enumerated from.
    pub font_source: FontSourceKind,
}

impl Default for SurveySettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            font_source: FontSourceKind::default(),
        }
    }
}

/// Which font-enumeration capability the frontend uses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FontSourceKind {
    /// Installed faces found by scanning the system font directories.
    #[default]
    System,
    /// The browser `queryLocalFonts()` API, run by the hosting page.
    Browser,
    /// No capability; collection always reports it as unsupported.
    None,
}
