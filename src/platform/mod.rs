// fontsurvey platform abstraction
// Provides the settings location and host identification for Windows, macOS, and Linux.
//
// Uses `cfg(target_os)` for conditional compilation to select the correct
// platform-specific implementation at compile time.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
use linux as current;

#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "macos")]
use macos as current;

#[cfg(target_os = "windows")]
mod windows;
#[cfg(target_os = "windows")]
use windows as current;

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
mod current {
    use std::path::PathBuf;

    pub const OS_NAME: &str = std::env::consts::OS;

    pub fn get_config_dir() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home).join(".config").join("fontsurvey")
    }
}

/// Returns the platform-specific configuration directory for fontsurvey.
///
/// - **Linux**: `~/.config/fontsurvey` (or `$XDG_CONFIG_HOME/fontsurvey`)
/// - **macOS**: `~/Library/Application Support/FontSurvey`
/// - **Windows**: `%APPDATA%/FontSurvey`
pub fn get_config_dir() -> PathBuf {
    current::get_config_dir()
}

/// Identification string for hosts without a browser user-agent, e.g.
/// `fontsurvey/0.1.0 (Linux; x86_64)`.
pub fn host_identification() -> String {
    format!(
        "fontsurvey/{} ({}; {})",
        env!("CARGO_PKG_VERSION"),
        current::OS_NAME,
        std::env::consts::ARCH
    )
}
