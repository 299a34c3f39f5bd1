// fontsurvey platform details for Windows
// Config: %APPDATA%/FontSurvey

use std::env;
use std::path::PathBuf;

pub const OS_NAME: &str = "Windows";

/// Returns the configuration directory for fontsurvey on Windows.
pub fn get_config_dir() -> PathBuf {
    let appdata =
        env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
    PathBuf::from(appdata).join("FontSurvey")
}
