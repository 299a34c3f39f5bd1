use serde::{Deserialize, Serialize};

use super::font::FontEntry;
use super::submission::SubmissionReceipt;

/// The reviewer's state. Each variant carries exactly the data valid in
/// that phase, so e.g. a receipt without a list or a second in-flight
/// submission cannot be represented.
///
/// A failed submission is `Reviewing` with `error` set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewState {
    Idle {
        error: Option<String>,
    },
    Collecting {
        /// List to restore if this collection fails.
        previous: Option<Vec<FontEntry>>,
    },
    Reviewing {
        fonts: Vec<FontEntry>,
        error: Option<String>,
    },
    Submitting {
        fonts: Vec<FontEntry>,
    },
    Done {
        fonts: Vec<FontEntry>,
        receipt: SubmissionReceipt,
    },
}

impl Default for ReviewState {
    fn default() -> Self {
        ReviewState::Idle { error: None }
    }
}

impl ReviewState {
    pub fn phase(&self) -> ReviewPhase {
        match self {
            ReviewState::Idle { .. } => ReviewPhase::Idle,
            ReviewState::Collecting { .. } => ReviewPhase::Collecting,
            ReviewState::Reviewing { .. } => ReviewPhase::Reviewing,
            ReviewState::Submitting { .. } => ReviewPhase::Submitting,
            ReviewState::Done { .. } => ReviewPhase::Done,
        }
    }

    pub fn fonts(&self) -> &[FontEntry] {
        match self {
            ReviewState::Idle { .. } => &[],
            ReviewState::Collecting { previous } => previous.as_deref().unwrap_or(&[]),
            ReviewState::Reviewing { fonts, .. }
            | ReviewState::Submitting { fonts }
            | ReviewState::Done { fonts, .. } => fonts,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ReviewState::Idle { error } | ReviewState::Reviewing { error, .. } => error.as_deref(),
            _ => None,
        }
    }

    pub fn receipt(&self) -> Option<&SubmissionReceipt> {
        match self {
            ReviewState::Done { receipt, .. } => Some(receipt),
            _ => None,
        }
    }
}

/// Phase tag of a [`ReviewState`], for display and serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewPhase {
    Idle,
    Collecting,
    Reviewing,
    Submitting,
    Done,
}

impl ReviewPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewPhase::Idle => "idle",
            ReviewPhase::Collecting => "collecting",
            ReviewPhase::Reviewing => "reviewing",
            ReviewPhase::Submitting => "submitting",
            ReviewPhase::Done => "done",
        }
    }
}

/// Serializable view of the reviewer, sent to frontends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSnapshot {
    pub phase: ReviewPhase,
    pub user_agent: String,
    pub fonts: Vec<SnapshotFont>,
    pub error: Option<String>,
    pub message: Option<String>,
    pub html_url: Option<String>,
    pub can_collect: bool,
    pub can_submit: bool,
}

/// One row of a [`ReviewSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotFont {
    pub family: String,
    pub full_name: String,
    pub postscript_name: String,
    pub included: bool,
    pub preview_family: String,
}
