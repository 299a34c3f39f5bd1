// fontsurvey platform details for macOS
// Config: ~/Library/Application Support/FontSurvey

use std::env;
use std::path::PathBuf;

pub const OS_NAME: &str = "macOS";

/// Returns the configuration directory for fontsurvey on macOS.
pub fn get_config_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
        .join("Library")
        .join("Application Support")
        .join("FontSurvey")
}
