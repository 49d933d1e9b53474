use docqa_client_core::questions::QuestionEntry;
use docqa_client_core::timers::elapsed_label;
use docqa_client_core::{DisplayRegion, FormConfig, FormController, QuestionId, TimerSlot};
use gloo_timers::callback::{Interval, Timeout};
use web_time::Instant;

/// Everything the page needs between events: the controller plus the
/// timers driving it. At most one timer of each kind is live.
pub(crate) struct FormShell {
    pub(crate) config: FormConfig,
    pub(crate) controller: FormController,
    pub(crate) elapsed_timer: TimerSlot<Interval>,
    pub(crate) draft_debounce: TimerSlot<Timeout>,
    pub(crate) error_dismiss: TimerSlot<Timeout>,
    pub(crate) loading_started_at: Option<Instant>,
    pub(crate) pending_focus: Option<QuestionId>,
    rendered_questions_revision: Option<u64>,
    rendered_results_revision: Option<u64>,
}

/// DOM updates computed under the shell borrow and applied after it is
/// released.
#[derive(Debug, Clone)]
pub(crate) struct RenderPlan {
    pub(crate) display: DisplayRegion,
    pub(crate) submit_enabled: bool,
    pub(crate) submit_label: &'static str,
    pub(crate) elapsed_text: String,
    pub(crate) error_message: Option<String>,
    pub(crate) questions: Option<Vec<QuestionEntry>>,
    pub(crate) result_cards: Option<Vec<String>>,
    pub(crate) focus_question: Option<QuestionId>,
}

impl FormShell {
    pub(crate) fn new(config: FormConfig) -> Self {
        Self {
            config,
            controller: FormController::new(),
            elapsed_timer: TimerSlot::default(),
            draft_debounce: TimerSlot::default(),
            error_dismiss: TimerSlot::default(),
            loading_started_at: None,
            pending_focus: None,
            rendered_questions_revision: None,
            rendered_results_revision: None,
        }
    }

    pub(crate) fn elapsed_now(&self) -> u64 {
        self.loading_started_at
            .map(|started| started.elapsed().as_secs())
            .unwrap_or(0)
    }

    pub(crate) fn stop_elapsed(&mut self) {
        self.elapsed_timer.stop();
        self.loading_started_at = None;
    }

    pub(crate) fn take_render_plan(&mut self) -> RenderPlan {
        let questions_revision = self.controller.questions().revision();
        let questions = (self.rendered_questions_revision != Some(questions_revision)).then(|| {
            self.rendered_questions_revision = Some(questions_revision);
            self.controller.questions().entries().to_vec()
        });

        let results_revision = self.controller.results_revision();
        let result_cards = (self.rendered_results_revision != Some(results_revision)).then(|| {
            self.rendered_results_revision = Some(results_revision);
            self.controller
                .results()
                .iter()
                .map(docqa_client_core::result_card_html)
                .collect()
        });

        RenderPlan {
            display: self.controller.display(),
            submit_enabled: self.controller.submit_enabled(),
            submit_label: self.controller.submit_label(),
            elapsed_text: self
                .controller
                .elapsed_secs()
                .map(elapsed_label)
                .unwrap_or_default(),
            error_message: self
                .controller
                .error()
                .map(|notice| notice.message.clone()),
            questions,
            result_cards,
            focus_question: self.pending_focus.take(),
        }
    }
}
