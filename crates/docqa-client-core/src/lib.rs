//! Platform-independent core of the document Q&A form.
//!
//! Everything the browser shell shows is derived from [`FormController`];
//! the shell only moves values between the DOM and the controller, sends the
//! prepared request and drives timers.

pub mod config;
pub mod controller;
pub mod display;
pub mod draft;
pub mod questions;
pub mod render;
pub mod shortcuts;
pub mod submission;
pub mod timers;
pub mod validation;

pub use config::{ConfigError, FormConfig};
pub use controller::{
    ErrorNotice, FormController, FormSnapshot, SubmissionPhase, SubmissionStats, SubmitOutcome,
    SubmitStart,
};
pub use display::DisplayRegion;
pub use draft::{DraftError, DraftFormState, DraftStore};
pub use questions::{QuestionId, QuestionList, QuestionListError};
pub use render::{
    ResultCard, answer_markup, format_answer_html, result_card_html, result_card_markup,
    submit_button_html,
};
pub use shortcuts::{KeyPress, ShortcutAction, shortcut_for};
pub use submission::{
    PreparedSubmission, RequestError, SubmissionRequest, SubmissionResponse, SubmissionTransport,
};
pub use timers::TimerSlot;
pub use validation::{ValidationError, validate_submission};
