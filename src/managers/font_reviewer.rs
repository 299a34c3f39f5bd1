use std::collections::HashSet;
use std::mem;

use log::{debug, info, warn};

use crate::services::font_source::FontSource;
use crate::services::submission_gateway::FontSubmitter;
use crate::types::errors::{CollectError, GatewayError, ReviewError};
use crate::types::font::{FontEntry, RawFontRecord};
use crate::types::review::{ReviewPhase, ReviewSnapshot, ReviewState, SnapshotFont};
use crate::types::submission::{SubmissionPayload, SubmissionReceipt};

/// Trait defining the collect/review/submit flow.
///
/// Suspending steps are split into `begin_*`/`finish_*` so a frontend that
/// keeps the reviewer behind a lock never holds it across the await.
pub trait FontReviewerTrait {
    fn begin_collect(&mut self) -> Result<(), ReviewError>;
    fn finish_collect(
        &mut self,
        result: Result<Vec<RawFontRecord>, CollectError>,
    ) -> Result<usize, ReviewError>;
    fn collect_fonts(&mut self, source: &dyn FontSource) -> Result<usize, ReviewError>;
    fn toggle_inclusion(&mut self, index: usize) -> Result<bool, ReviewError>;
    fn begin_submit(&mut self, declared_os: Option<String>) -> Result<SubmissionPayload, ReviewError>;
    fn finish_submit(
        &mut self,
        result: Result<SubmissionReceipt, GatewayError>,
    ) -> Result<&SubmissionReceipt, ReviewError>;
    fn reset(&mut self) -> Result<(), ReviewError>;
    fn state(&self) -> &ReviewState;
    fn phase(&self) -> ReviewPhase;
    fn fonts(&self) -> &[FontEntry];
    fn user_agent(&self) -> &str;
    fn set_user_agent(&mut self, user_agent: &str) -> Result<(), ReviewError>;
    fn can_collect(&self) -> bool;
    fn can_submit(&self) -> bool;
    fn snapshot(&self) -> ReviewSnapshot;
}

/// Collapses raw records to one entry per full name. The first occurrence
/// wins and every entry starts included.
pub fn dedupe_fonts(raw: Vec<RawFontRecord>) -> Vec<FontEntry> {
    let mut seen = HashSet::new();
    raw.into_iter()
        .filter(|record| seen.insert(record.full_name.clone()))
        .map(FontEntry::from)
        .collect()
}

/// In-memory reviewer for one session's font list.
pub struct FontReviewer {
    user_agent: String,
    state: ReviewState,
}

impl FontReviewer {
    /// `user_agent` is the host identification captured at mount time.
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            state: ReviewState::default(),
        }
    }

    /// Runs a whole submission through `submitter`. On failure the error is
    /// recorded and the list stays reviewable.
    pub async fn submit<S: FontSubmitter>(
        &mut self,
        submitter: &S,
        declared_os: Option<String>,
    ) -> Result<&SubmissionReceipt, ReviewError> {
        let payload = self.begin_submit(declared_os)?;
        let result = submitter.submit(payload).await;
        self.finish_submit(result)
    }

    fn invalid(&self, operation: &'static str) -> ReviewError {
        ReviewError::InvalidState {
            operation,
            phase: self.state.phase().as_str(),
        }
    }
}

impl FontReviewerTrait for FontReviewer {
    fn begin_collect(&mut self) -> Result<(), ReviewError> {
        let previous = match mem::take(&mut self.state) {
            ReviewState::Idle { .. } => None,
            ReviewState::Reviewing { fonts, .. } => Some(fonts),
            other => {
                let err = match &other {
                    ReviewState::Done { .. } => ReviewError::AlreadySubmitted,
                    ReviewState::Submitting { .. } => ReviewError::SubmissionInFlight,
                    _ => ReviewError::InvalidState {
                        operation: "collect fonts",
                        phase: other.phase().as_str(),
                    },
                };
                self.state = other;
                return Err(err);
            }
        };
        self.state = ReviewState::Collecting { previous };
        debug!("collecting local fonts");
        Ok(())
    }

    fn finish_collect(
        &mut self,
        result: Result<Vec<RawFontRecord>, CollectError>,
    ) -> Result<usize, ReviewError> {
        let previous = match mem::take(&mut self.state) {
            ReviewState::Collecting { previous } => previous,
            other => {
                self.state = other;
                return Err(self.invalid("finish collecting"));
            }
        };

        match result {
            Ok(raw) => {
                let total = raw.len();
                let fonts = dedupe_fonts(raw);
                let count = fonts.len();
                info!("collected {} fonts ({} raw faces)", count, total);
                self.state = ReviewState::Reviewing { fonts, error: None };
                Ok(count)
            }
            Err(e) => {
                warn!("font collection failed: {}", e);
                let error = Some(e.to_string());
                self.state = match previous {
                    Some(fonts) => ReviewState::Reviewing { fonts, error },
                    None => ReviewState::Idle { error },
                };
                Err(ReviewError::Collect(e))
            }
        }
    }

    fn collect_fonts(&mut self, source: &dyn FontSource) -> Result<usize, ReviewError> {
        self.begin_collect()?;
        let result = source.query_local_fonts();
        self.finish_collect(result)
    }

    fn toggle_inclusion(&mut self, index: usize) -> Result<bool, ReviewError> {
        let invalid = self.invalid("toggle a font");
        match &mut self.state {
            ReviewState::Reviewing { fonts, .. } => {
                let len = fonts.len();
                let entry = fonts
                    .get_mut(index)
                    .ok_or(ReviewError::IndexOutOfRange { index, len })?;
                entry.included = !entry.included;
                Ok(entry.included)
            }
            _ => Err(invalid),
        }
    }

    fn begin_submit(&mut self, declared_os: Option<String>) -> Result<SubmissionPayload, ReviewError> {
        match mem::take(&mut self.state) {
            ReviewState::Reviewing { fonts, .. } => {
                let payload = SubmissionPayload::from_selection(&fonts, &self.user_agent, declared_os);
                self.state = ReviewState::Submitting { fonts };
                Ok(payload)
            }
            other => {
                let err = match &other {
                    ReviewState::Submitting { .. } => ReviewError::SubmissionInFlight,
                    ReviewState::Done { .. } => ReviewError::AlreadySubmitted,
                    _ => ReviewError::InvalidState {
                        operation: "submit",
                        phase: other.phase().as_str(),
                    },
                };
                self.state = other;
                Err(err)
            }
        }
    }

    fn finish_submit(
        &mut self,
        result: Result<SubmissionReceipt, GatewayError>,
    ) -> Result<&SubmissionReceipt, ReviewError> {
        let fonts = match mem::take(&mut self.state) {
            ReviewState::Submitting { fonts } => fonts,
            other => {
                self.state = other;
                return Err(self.invalid("finish submitting"));
            }
        };

        match result {
            Ok(receipt) => {
                info!("submission stored at {}", receipt.html_url);
                self.state = ReviewState::Done { fonts, receipt };
                self.state
                    .receipt()
                    .ok_or(ReviewError::InvalidState { operation: "finish submitting", phase: "done" })
            }
            Err(e) => {
                warn!("submission failed: {}", e);
                self.state = ReviewState::Reviewing {
                    fonts,
                    error: Some(e.to_string()),
                };
                Err(ReviewError::Gateway(e))
            }
        }
    }

    fn reset(&mut self) -> Result<(), ReviewError> {
        if matches!(self.state, ReviewState::Submitting { .. } | ReviewState::Collecting { .. }) {
            return Err(self.invalid("reset"));
        }
        self.state = ReviewState::default();
        Ok(())
    }

    fn state(&self) -> &ReviewState {
        &self.state
    }

    fn phase(&self) -> ReviewPhase {
        self.state.phase()
    }

    fn fonts(&self) -> &[FontEntry] {
        self.state.fonts()
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Only while `Idle`, so the identification shown always matches the
    /// one a collected list is submitted with.
    fn set_user_agent(&mut self, user_agent: &str) -> Result<(), ReviewError> {
        if !matches!(self.state, ReviewState::Idle { .. }) {
            return Err(self.invalid("change the user-agent"));
        }
        self.user_agent = user_agent.to_string();
        Ok(())
    }

    fn can_collect(&self) -> bool {
        matches!(self.state, ReviewState::Idle { .. } | ReviewState::Reviewing { .. })
    }

    fn can_submit(&self) -> bool {
        matches!(self.state, ReviewState::Reviewing { .. })
    }

    fn snapshot(&self) -> ReviewSnapshot {
        let receipt = self.state.receipt();
        ReviewSnapshot {
            phase: self.phase(),
            user_agent: self.user_agent.clone(),
            fonts: self
                .fonts()
                .iter()
                .enumerate()
                .map(|(i, f)| SnapshotFont {
                    family: f.family.clone(),
                    full_name: f.full_name.clone(),
                    postscript_name: f.postscript_name.clone(),
                    included: f.included,
                    preview_family: f.preview_family(i),
                })
                .collect(),
            error: self.state.error().map(str::to_string),
            message: receipt.map(|r| r.message.clone()),
            html_url: receipt.map(|r| r.html_url.clone()),
            can_collect: self.can_collect(),
            can_submit: self.can_submit(),
        }
    }
}
