use serde::{Deserialize, Serialize};

use super::font::FontEntry;

/// Everything the gateway needs for one submission.
///
/// Built once from the review list and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionPayload {
    fonts: Vec<FontEntry>,
    user_agent: String,
    declared_os: Option<String>,
}

impl SubmissionPayload {
    /// Keeps only the included entries, in list order. The user-agent and
    /// declared OS are flattened to one line each; a blank declared OS is
    /// treated as absent.
    pub fn from_selection(
        entries: &[FontEntry],
        user_agent: impl Into<String>,
        declared_os: Option<String>,
    ) -> Self {
        let fonts = entries.iter().filter(|f| f.included).cloned().collect();
        let declared_os = declared_os
            .map(|os| single_line(&os))
            .filter(|os| !os.is_empty());
        Self {
            fonts,
            user_agent: single_line(&user_agent.into()),
            declared_os,
        }
    }

    pub fn fonts(&self) -> &[FontEntry] {
        &self.fonts
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn declared_os(&self) -> Option<&str> {
        self.declared_os.as_deref()
    }
}

/// Replaces control characters (line breaks included) with spaces and trims,
/// so a free-text field can only ever occupy its own heading line.
fn single_line(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Confirmation returned by a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub message: String,
    /// Browsable URL of the created file.
    pub html_url: String,
    /// Repository path the file was written to.
    pub path: String,
}

/// The file created in the data repository for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    /// `data/<unix-millis>.md`
    pub path: String,
    /// Rendered markdown document.
    pub content: String,
}
