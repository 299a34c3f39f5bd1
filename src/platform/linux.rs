// fontsurvey platform details for Linux
// Config: ~/.config/fontsurvey

use std::env;
use std::path::PathBuf;

pub const OS_NAME: &str = "Linux";

/// Returns the configuration directory for fontsurvey on Linux.
/// Uses `$XDG_CONFIG_HOME/fontsurvey` if set, otherwise `~/.config/fontsurvey`.
pub fn get_config_dir() -> PathBuf {
    match env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("fontsurvey"),
        _ => {
            let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
            PathBuf::from(home).join(".config").join("fontsurvey")
        }
    }
}
