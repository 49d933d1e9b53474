use serde::Serialize;

use crate::display::DisplayRegion;
use crate::draft::DraftFormState;
use crate::questions::{QuestionId, QuestionList, QuestionListError};
use crate::render::{ResultCard, build_result_cards};
use crate::submission::{PreparedSubmission, RequestError, SubmissionResponse};
use crate::validation::{ValidationError, validate_submission};

pub const SUBMIT_LABEL_IDLE: &str = "Analyze Document";
pub const SUBMIT_LABEL_LOADING: &str = "Processing...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Validating,
    Loading,
    Success,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStart {
    /// Validation passed; the caller sends the request and reports back
    /// through [`FormController::finish_submit`].
    Started(PreparedSubmission),
    Rejected(ValidationError),
    /// A request is already in flight and the submit control is disabled.
    AlreadyLoading,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Succeeded { cards: usize },
    Failed { message: String, sequence: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorNotice {
    pub message: String,
    /// Increases with every shown error so a stale auto-dismiss timer can
    /// tell it no longer owns the region.
    pub sequence: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SubmissionStats {
    pub started: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub rejected: u64,
}

/// Owns every piece of form state. The browser shell forwards DOM events
/// into it and re-renders from its accessors.
#[derive(Default)]
pub struct FormController {
    document_url: String,
    auth_token: String,
    questions: QuestionList,
    phase: SubmissionPhase,
    display: DisplayRegion,
    elapsed_secs: Option<u64>,
    results: Vec<ResultCard>,
    results_revision: u64,
    error: Option<ErrorNotice>,
    error_sequence: u64,
    stats: SubmissionStats,
}

/// Serializable view of the controller for diagnostics. The token is left
/// out.
#[derive(Debug, Clone, Serialize)]
pub struct FormSnapshot<'a> {
    pub document_url: &'a str,
    pub has_auth_token: bool,
    pub questions: Vec<String>,
    pub phase: SubmissionPhase,
    pub display: DisplayRegion,
    pub submit_enabled: bool,
    pub elapsed_secs: Option<u64>,
    pub results: &'a [ResultCard],
    pub error: Option<&'a ErrorNotice>,
    pub stats: SubmissionStats,
}

impl std::fmt::Debug for FormController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormController")
            .field("document_url", &self.document_url)
            .field("auth_token", &"<redacted>")
            .field("questions", &self.questions)
            .field("phase", &self.phase)
            .field("display", &self.display)
            .field("elapsed_secs", &self.elapsed_secs)
            .field("results", &self.results.len())
            .field("error", &self.error)
            .field("stats", &self.stats)
            .finish()
    }
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document_url(&self) -> &str {
        &self.document_url
    }

    pub fn set_document_url(&mut self, value: &str) {
        self.document_url = value.to_string();
    }

    pub fn has_auth_token(&self) -> bool {
        !self.auth_token.trim().is_empty()
    }

    pub fn set_auth_token(&mut self, value: &str) {
        self.auth_token = value.to_string();
    }

    pub fn questions(&self) -> &QuestionList {
        &self.questions
    }

    pub fn add_question(&mut self) -> QuestionId {
        self.questions.add()
    }

    /// Removing the only input is refused and surfaced as an error notice.
    pub fn remove_question(&mut self, id: QuestionId) -> Result<(), QuestionListError> {
        match self.questions.remove(id) {
            Ok(()) => Ok(()),
            Err(error @ QuestionListError::LastQuestion) => {
                self.show_error(error.to_string());
                Err(error)
            }
            Err(error) => Err(error),
        }
    }

    pub fn set_question_text(&mut self, id: QuestionId, text: &str) -> Result<(), QuestionListError> {
        self.questions.set_text(id, text)
    }

    /// Overwrites the field copies with what the page currently shows.
    /// Browser form restore and autofill do not fire `input`, so the shell
    /// calls this before validating.
    pub fn sync_from_inputs<'a>(
        &mut self,
        document_url: &str,
        auth_token: &str,
        questions: impl IntoIterator<Item = (QuestionId, &'a str)>,
    ) {
        self.document_url = document_url.to_string();
        self.auth_token = auth_token.to_string();
        for (id, text) in questions {
            if let Err(error) = self.questions.set_text(id, text) {
                tracing::debug!(%error, "skipping input without a matching question");
            }
        }
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn display(&self) -> DisplayRegion {
        self.display
    }

    pub fn submit_enabled(&self) -> bool {
        self.phase != SubmissionPhase::Loading
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submit_enabled() {
            SUBMIT_LABEL_IDLE
        } else {
            SUBMIT_LABEL_LOADING
        }
    }

    pub fn elapsed_secs(&self) -> Option<u64> {
        self.elapsed_secs
    }

    pub fn results(&self) -> &[ResultCard] {
        &self.results
    }

    pub fn results_revision(&self) -> u64 {
        self.results_revision
    }

    pub fn error(&self) -> Option<&ErrorNotice> {
        self.error.as_ref()
    }

    pub fn stats(&self) -> SubmissionStats {
        self.stats
    }

    /// Clears the regions, validates, and on success enters `Loading`.
    /// Validation always finishes before anything is sent.
    pub fn begin_submit(&mut self) -> SubmitStart {
        if self.phase == SubmissionPhase::Loading {
            return SubmitStart::AlreadyLoading;
        }

        self.error = None;
        self.set_display(DisplayRegion::Hidden);
        self.phase = SubmissionPhase::Validating;

        let validated = validate_submission(
            &self.document_url,
            &self.auth_token,
            self.questions.entries().iter().map(|entry| entry.text.as_str()),
        );
        match validated {
            Ok(validated) => {
                self.phase = SubmissionPhase::Loading;
                self.elapsed_secs = Some(0);
                self.set_display(DisplayRegion::Loading);
                self.stats.started = self.stats.started.saturating_add(1);
                SubmitStart::Started(validated.into_prepared())
            }
            Err(error) => {
                self.phase = SubmissionPhase::Failed;
                self.stats.rejected = self.stats.rejected.saturating_add(1);
                self.show_error(error.to_string());
                SubmitStart::Rejected(error)
            }
        }
    }

    /// Updates the elapsed display; ignored outside `Loading`.
    pub fn record_elapsed(&mut self, seconds: u64) -> bool {
        if self.phase != SubmissionPhase::Loading {
            return false;
        }
        self.elapsed_secs = Some(seconds);
        true
    }

    /// Leaves `Loading` by either path. Responses that land after an Escape
    /// are still rendered; there is no cancellation.
    pub fn finish_submit(
        &mut self,
        submission: &PreparedSubmission,
        result: Result<SubmissionResponse, RequestError>,
    ) -> SubmitOutcome {
        self.elapsed_secs = None;
        match result {
            Ok(response) => {
                self.results = build_result_cards(submission.questions(), &response);
                self.results_revision = self.results_revision.saturating_add(1);
                self.error = None;
                self.set_display(DisplayRegion::Results);
                self.phase = SubmissionPhase::Success;
                self.stats.succeeded = self.stats.succeeded.saturating_add(1);
                SubmitOutcome::Succeeded {
                    cards: self.results.len(),
                }
            }
            Err(error) => {
                self.phase = SubmissionPhase::Failed;
                self.stats.failed = self.stats.failed.saturating_add(1);
                let message = error.to_string();
                let sequence = self.show_error(message.clone());
                SubmitOutcome::Failed { message, sequence }
            }
        }
    }

    /// Shows `message` in the error region, hiding loading and results.
    pub fn show_error(&mut self, message: impl Into<String>) -> u64 {
        self.error_sequence = self.error_sequence.saturating_add(1);
        self.error = Some(ErrorNotice {
            message: message.into(),
            sequence: self.error_sequence,
        });
        self.set_display(DisplayRegion::Error);
        self.error_sequence
    }

    /// Auto-dismiss hook. Only hides the notice identified by `sequence`.
    pub fn dismiss_error(&mut self, sequence: u64) -> bool {
        let owns_region = self
            .error
            .as_ref()
            .is_some_and(|notice| notice.sequence == sequence);
        if !owns_region {
            return false;
        }
        self.error = None;
        if self.display == DisplayRegion::Error {
            self.set_display(DisplayRegion::Hidden);
        }
        if self.phase == SubmissionPhase::Failed {
            self.phase = SubmissionPhase::Idle;
        }
        true
    }

    /// Escape: hides every region. An in-flight request keeps running and
    /// the submit control stays disabled until it resolves.
    pub fn cancel(&mut self) {
        self.error = None;
        self.set_display(DisplayRegion::Hidden);
        if self.phase != SubmissionPhase::Loading {
            self.phase = SubmissionPhase::Idle;
        }
    }

    pub fn draft(&self) -> DraftFormState {
        DraftFormState {
            document_url: self.document_url.clone(),
            questions: self.questions.texts(),
        }
    }

    /// Page-load restore: a non-empty URL fills the URL field and a
    /// non-empty question list replaces the inputs. Returns whether anything
    /// changed.
    pub fn apply_draft(&mut self, draft: &DraftFormState) -> bool {
        let mut changed = false;
        if !draft.document_url.is_empty() {
            self.document_url = draft.document_url.clone();
            changed = true;
        }
        if self.questions.replace_all(&draft.questions) {
            changed = true;
        }
        changed
    }

    pub fn snapshot(&self) -> FormSnapshot<'_> {
        FormSnapshot {
            document_url: &self.document_url,
            has_auth_token: self.has_auth_token(),
            questions: self.questions.texts(),
            phase: self.phase,
            display: self.display,
            submit_enabled: self.submit_enabled(),
            elapsed_secs: self.elapsed_secs,
            results: &self.results,
            error: self.error.as_ref(),
            stats: self.stats,
        }
    }

    fn set_display(&mut self, region: DisplayRegion) {
        self.display = region;
    }
}
