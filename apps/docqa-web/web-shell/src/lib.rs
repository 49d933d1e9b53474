#[cfg(target_arch = "wasm32")]
mod wasm_constants;
#[cfg(target_arch = "wasm32")]
mod wasm_state;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;

    use docqa_client_core::draft::{load_draft_nonfatal, save_draft_nonfatal};
    use docqa_client_core::{
        FormConfig, QuestionId, QuestionListError, SubmissionStats, SubmissionTransport, SubmitOutcome,
        SubmitStart,
    };
    use gloo_timers::callback::{Interval, Timeout};
    use serde::Serialize;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::spawn_local;
    use web_sys::{Element, HtmlElement, HtmlInputElement};
    use web_time::Instant;

    use crate::wasm_constants::*;
    use crate::wasm_state::{FormShell, RenderPlan};

    mod dom;
    mod lifecycle;
    mod network;
    mod storage;

    use dom::*;
    use lifecycle::*;
    use network::FetchTransport;
    use storage::LocalStorageDraftStore;

    thread_local! {
        static SHELL: RefCell<Option<FormShell>> = const { RefCell::new(None) };
        static DIAGNOSTICS: RefCell<ShellDiagnostics> = RefCell::new(ShellDiagnostics::default());
        static EVENT_HANDLERS: RefCell<Vec<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(Vec::new()) };
        static KEYBOARD_HANDLERS: RefCell<Vec<Closure<dyn FnMut(web_sys::KeyboardEvent)>>> = const { RefCell::new(Vec::new()) };
    }

    #[derive(Debug, Clone, Serialize)]
    struct ShellDiagnostics {
        phase: String,
        detail: String,
        boot_started_at_unix_ms: Option<u64>,
        boot_latency_ms: Option<u64>,
        draft_restored: bool,
        config_source: String,
        last_error: Option<String>,
    }

    #[derive(Serialize)]
    struct DiagnosticsReport<'a> {
        shell: &'a ShellDiagnostics,
        submissions: Option<SubmissionStats>,
    }

    impl Default for ShellDiagnostics {
        fn default() -> Self {
            Self {
                phase: "idle".to_string(),
                detail: "form shell not started".to_string(),
                boot_started_at_unix_ms: None,
                boot_latency_ms: None,
                draft_restored: false,
                config_source: "default".to_string(),
                last_error: None,
            }
        }
    }

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        let (config, config_source, config_warning) = read_config();
        init_logging(&config.log_filter);
        if let Some(warning) = config_warning {
            tracing::warn!(%warning, "ignoring invalid form config overrides");
        }
        DIAGNOSTICS.with(|state| state.borrow_mut().config_source = config_source);
        set_boot_phase("booting", "wiring form controller");
        if let Err(error) = boot(config) {
            set_boot_error(&error);
        }
    }

    #[wasm_bindgen]
    pub fn form_diagnostics_json() -> String {
        let submissions = with_shell(|shell| shell.controller.stats());
        DIAGNOSTICS.with(|state| {
            let state = state.borrow();
            serde_json::to_string(&DiagnosticsReport {
                shell: &state,
                submissions,
            })
            .unwrap_or_else(|_| {
                "{\"phase\":\"error\",\"detail\":\"diagnostics serialization failed\"}".to_string()
            })
        })
    }

    #[wasm_bindgen]
    pub fn form_state_json() -> String {
        with_shell(|shell| serde_json::to_string(&shell.controller.snapshot()).ok())
            .flatten()
            .unwrap_or_else(|| "{}".to_string())
    }

    #[wasm_bindgen]
    pub fn submit_form() {
        sync_inputs_from_page();
        let start = with_shell(|shell| shell.controller.begin_submit());
        match start {
            None => {}
            Some(SubmitStart::AlreadyLoading) => {
                tracing::debug!("submit ignored while a request is in flight");
            }
            Some(SubmitStart::Rejected(error)) => {
                tracing::info!(%error, "submission rejected by validation");
                schedule_error_dismiss();
                render_form();
                scroll_into_view(ERROR_SECTION_ID);
            }
            Some(SubmitStart::Started(prepared)) => {
                let endpoint = with_shell(|shell| {
                    shell.error_dismiss.stop();
                    shell.config.endpoint_path.clone()
                })
                .unwrap_or_default();
                start_elapsed_timer();
                render_form();
                tracing::info!(
                    questions = prepared.questions().len(),
                    "submitting document questions"
                );

                spawn_local(async move {
                    let transport = FetchTransport::new(endpoint);
                    let result = transport.submit(&prepared).await;
                    let outcome = with_shell(|shell| {
                        shell.stop_elapsed();
                        shell.controller.finish_submit(&prepared, result)
                    });
                    match outcome {
                        Some(SubmitOutcome::Succeeded { cards }) => {
                            tracing::info!(cards, "rendered answers");
                            render_form();
                            scroll_into_view(RESULTS_SECTION_ID);
                        }
                        Some(SubmitOutcome::Failed { message, .. }) => {
                            tracing::error!(error = %message, "submission failed");
                            schedule_error_dismiss();
                            render_form();
                            scroll_into_view(ERROR_SECTION_ID);
                        }
                        None => {}
                    }
                });
            }
        }
    }

    #[wasm_bindgen]
    pub fn add_question() {
        with_shell(|shell| {
            let id = shell.controller.add_question();
            shell.pending_focus = Some(id);
        });
        render_form();
        schedule_draft_save();
    }

    #[wasm_bindgen]
    pub fn clear_sections() {
        with_shell(|shell| {
            shell.error_dismiss.stop();
            shell.controller.cancel();
        });
        render_form();
    }

    fn boot(config: FormConfig) -> Result<(), String> {
        let boot_started_at = Instant::now();
        DIAGNOSTICS.with(|state| {
            state.borrow_mut().boot_started_at_unix_ms = Some(epoch_millis_now());
        });

        let document = current_document()?;
        ensure_form_dom(&document)?;

        let page_url = input_value(&document, DOCUMENT_URL_INPUT_ID);
        let mut shell = FormShell::new(config);
        shell.controller.set_document_url(&page_url);
        shell
            .controller
            .set_auth_token(&input_value(&document, AUTH_TOKEN_INPUT_ID));
        let draft_restored = match LocalStorageDraftStore::from_window() {
            Ok(store) => load_draft_nonfatal(&store, &shell.config.draft_storage_key)
                .is_some_and(|draft| shell.controller.apply_draft(&draft)),
            Err(error) => {
                tracing::warn!(%error, "draft storage unavailable; drafts will not persist");
                false
            }
        };
        let document_url = shell.controller.document_url().to_string();
        SHELL.with(|cell| {
            *cell.borrow_mut() = Some(shell);
        });

        if document_url != page_url {
            set_input_value(&document, DOCUMENT_URL_INPUT_ID, &document_url);
        }
        install_form_handlers(&document)?;
        render_form();

        let boot_latency_ms =
            u64::try_from(boot_started_at.elapsed().as_millis()).unwrap_or(u64::MAX);
        DIAGNOSTICS.with(|state| {
            let mut state = state.borrow_mut();
            state.draft_restored = draft_restored;
            state.boot_latency_ms = Some(boot_latency_ms);
        });
        set_boot_phase("ready", "form controller active");
        Ok(())
    }

    fn with_shell<R>(f: impl FnOnce(&mut FormShell) -> R) -> Option<R> {
        SHELL.with(|cell| cell.borrow_mut().as_mut().map(f))
    }

    fn render_form() {
        let Some(plan) = with_shell(FormShell::take_render_plan) else {
            return;
        };
        if let Err(error) = apply_render_plan(&plan) {
            tracing::error!(%error, "failed to render form");
        }
    }

    fn sync_inputs_from_page() {
        let Ok(document) = current_document() else {
            return;
        };
        let document_url = input_value(&document, DOCUMENT_URL_INPUT_ID);
        let auth_token = input_value(&document, AUTH_TOKEN_INPUT_ID);
        let questions = question_input_values(&document);
        with_shell(|shell| {
            shell.controller.sync_from_inputs(
                &document_url,
                &auth_token,
                questions.iter().map(|(id, text)| (*id, text.as_str())),
            );
        });
    }

    fn remove_question(id: QuestionId) {
        let result = with_shell(|shell| shell.controller.remove_question(id));
        match result {
            Some(Ok(())) => {
                render_form();
                schedule_draft_save();
            }
            Some(Err(QuestionListError::LastQuestion)) => {
                schedule_error_dismiss();
                render_form();
                scroll_into_view(ERROR_SECTION_ID);
            }
            Some(Err(error)) => tracing::warn!(%error, "remove requested for unknown question"),
            None => {}
        }
    }

    fn update_document_url(value: &str) {
        with_shell(|shell| shell.controller.set_document_url(value));
        schedule_draft_save();
    }

    fn update_auth_token(value: &str) {
        with_shell(|shell| shell.controller.set_auth_token(value));
    }

    fn update_question_text(id: QuestionId, value: &str) {
        let result = with_shell(|shell| shell.controller.set_question_text(id, value));
        if let Some(Err(error)) = result {
            tracing::warn!(%error, "input event for unknown question");
            return;
        }
        schedule_draft_save();
    }

    fn start_elapsed_timer() {
        with_shell(|shell| {
            shell.loading_started_at = Some(Instant::now());
            let interval = Interval::new(shell.config.elapsed_tick_ms, || {
                let changed = with_shell(|shell| {
                    let seconds = shell.elapsed_now();
                    shell.controller.record_elapsed(seconds)
                });
                if changed == Some(true) {
                    render_form();
                }
            });
            shell.elapsed_timer.start(interval);
        });
    }

    /// Restarts the debounce window; the draft is written once edits pause.
    fn schedule_draft_save() {
        with_shell(|shell| {
            let timeout = Timeout::new(shell.config.draft_debounce_ms, save_draft_now);
            shell.draft_debounce.start(timeout);
        });
    }

    fn save_draft_now() {
        let Some((key, draft)) = with_shell(|shell| {
            (
                shell.config.draft_storage_key.clone(),
                shell.controller.draft(),
            )
        }) else {
            return;
        };
        match LocalStorageDraftStore::from_window() {
            Ok(store) => save_draft_nonfatal(&store, &key, &draft),
            Err(error) => tracing::warn!(%error, "failed to save form data"),
        }
    }

    fn schedule_error_dismiss() {
        with_shell(|shell| {
            let Some(sequence) = shell.controller.error().map(|notice| notice.sequence) else {
                return;
            };
            let timeout = Timeout::new(shell.config.error_dismiss_ms, move || {
                if with_shell(|shell| shell.controller.dismiss_error(sequence)) == Some(true) {
                    render_form();
                }
            });
            shell.error_dismiss.start(timeout);
        });
    }

    fn copy_answer(index: usize) {
        let Some(text) = with_shell(|shell| {
            shell
                .controller
                .results()
                .get(index)
                .map(|card| card.answer_text().to_string())
        })
        .flatten() else {
            return;
        };
        spawn_local(async move {
            match write_clipboard_text(&text).await {
                Ok(()) => tracing::info!(card = index + 1, "copied answer to clipboard"),
                Err(error) => tracing::warn!(%error, "failed to copy answer"),
            }
        });
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::{form_diagnostics_json, form_state_json};

#[cfg(not(target_arch = "wasm32"))]
pub fn form_diagnostics_json() -> String {
    "{\"phase\":\"native\",\"detail\":\"form shell diagnostics only available on wasm\"}".to_string()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn form_state_json() -> String {
    "{}".to_string()
}

#[cfg(test)]
mod tests {
    #[test]
    fn native_build_exposes_diagnostics_stub() {
        let value: serde_json::Value =
            serde_json::from_str(&super::form_diagnostics_json()).expect("valid json");
        assert_eq!(value["phase"], "native");
        assert_eq!(super::form_state_json(), "{}");
    }
}
