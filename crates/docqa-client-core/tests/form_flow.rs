use std::cell::RefCell;
use std::collections::HashMap;

use async_trait::async_trait;
use docqa_client_core::draft::{load_draft_nonfatal, save_draft_nonfatal};
use docqa_client_core::render::NO_ANSWER_TEXT;
use docqa_client_core::submission::decode_response;
use docqa_client_core::{
    DisplayRegion, DraftStore, FormConfig, FormController, PreparedSubmission, RequestError,
    SubmissionRequest, SubmissionResponse, SubmissionTransport, SubmitOutcome, SubmitStart,
    result_card_html,
};

#[derive(Default)]
struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl DraftStore for MemoryStore {
    type Error = String;

    fn read_item(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn write_item(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Replays a canned HTTP exchange and records what was sent.
struct CannedTransport {
    status: u16,
    status_text: &'static str,
    body: &'static str,
    sent: RefCell<Vec<(SubmissionRequest, String)>>,
}

impl CannedTransport {
    fn new(status: u16, status_text: &'static str, body: &'static str) -> Self {
        Self {
            status,
            status_text,
            body,
            sent: RefCell::new(Vec::new()),
        }
    }
}

#[async_trait(?Send)]
impl SubmissionTransport for CannedTransport {
    async fn submit(
        &self,
        submission: &PreparedSubmission,
    ) -> Result<SubmissionResponse, RequestError> {
        self.sent.borrow_mut().push((
            submission.request().clone(),
            submission.authorization_header(),
        ));
        decode_response(self.status, self.status_text, self.body)
    }
}

struct OfflineTransport;

#[async_trait(?Send)]
impl SubmissionTransport for OfflineTransport {
    async fn submit(
        &self,
        _submission: &PreparedSubmission,
    ) -> Result<SubmissionResponse, RequestError> {
        Err(RequestError::Network("Failed to fetch".to_string()))
    }
}

fn controller_with(questions: &[&str]) -> FormController {
    let mut controller = FormController::new();
    controller.set_document_url("https://x/doc.pdf");
    controller.set_auth_token("secret");
    let first = controller.questions().entries()[0].id;
    controller
        .set_question_text(first, questions[0])
        .expect("first input");
    for text in &questions[1..] {
        let id = controller.add_question();
        controller.set_question_text(id, text).expect("added input");
    }
    controller
}

async fn run<T: SubmissionTransport>(
    controller: &mut FormController,
    transport: &T,
) -> Option<SubmitOutcome> {
    let SubmitStart::Started(prepared) = controller.begin_submit() else {
        return None;
    };
    assert!(!controller.submit_enabled());
    let result = transport.submit(&prepared).await;
    Some(controller.finish_submit(&prepared, result))
}

#[tokio::test]
async fn full_submission_sends_filtered_questions_and_renders_cards() {
    let mut controller = controller_with(&["Q1", "  ", "Q2", "Q3"]);
    let transport = CannedTransport::new(200, "OK", r#"{"answers":["A1","line1\nline2"]}"#);

    let outcome = run(&mut controller, &transport).await;
    assert_eq!(outcome, Some(SubmitOutcome::Succeeded { cards: 3 }));

    let sent = transport.sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0.questions, vec!["Q1", "Q2", "Q3"]);
    assert_eq!(sent[0].0.documents, "https://x/doc.pdf");
    assert_eq!(sent[0].1, "Bearer secret");

    assert_eq!(controller.display(), DisplayRegion::Results);
    let rendered: Vec<_> = controller.results().iter().map(result_card_html).collect();
    assert!(rendered[1].contains("line1<br>line2"));
    assert!(rendered[2].contains(NO_ANSWER_TEXT));
}

#[tokio::test]
async fn error_detail_and_status_line_are_surfaced() {
    let mut controller = controller_with(&["Q1"]);
    let transport = CannedTransport::new(401, "Unauthorized", r#"{"detail":"bad token"}"#);
    let outcome = run(&mut controller, &transport).await;
    assert!(matches!(outcome, Some(SubmitOutcome::Failed { ref message, .. }) if message == "bad token"));
    assert!(controller.submit_enabled());

    let transport = CannedTransport::new(401, "Unauthorized", "not json");
    let outcome = run(&mut controller, &transport).await;
    assert!(matches!(
        outcome,
        Some(SubmitOutcome::Failed { ref message, .. }) if message == "HTTP 401: Unauthorized"
    ));
    assert_eq!(controller.display(), DisplayRegion::Error);
}

#[tokio::test]
async fn network_failure_is_recoverable() {
    let mut controller = controller_with(&["Q1"]);
    let outcome = run(&mut controller, &OfflineTransport).await;
    assert!(matches!(outcome, Some(SubmitOutcome::Failed { .. })));

    let transport = CannedTransport::new(200, "OK", r#"{"answers":["A1"]}"#);
    let outcome = run(&mut controller, &transport).await;
    assert_eq!(outcome, Some(SubmitOutcome::Succeeded { cards: 1 }));
}

#[tokio::test]
async fn invalid_form_never_reaches_the_transport() {
    let mut controller = controller_with(&["Q1"]);
    controller.set_auth_token("   ");
    let transport = CannedTransport::new(200, "OK", r#"{"answers":[]}"#);

    assert!(run(&mut controller, &transport).await.is_none());
    assert!(transport.sent.borrow().is_empty());
    assert_eq!(
        controller.error().map(|notice| notice.message.as_str()),
        Some("Authentication token is required")
    );
}

#[test]
fn draft_survives_a_reload_without_the_token() {
    let config = FormConfig::default();
    let store = MemoryStore::default();
    let mut before = FormController::new();
    before.set_document_url("https://x/doc.pdf");
    before.set_auth_token("secret");
    let first = before.questions().entries()[0].id;
    before.set_question_text(first, "Q1").expect("first input");
    let second = before.add_question();
    before.set_question_text(second, "Q2").expect("second input");
    save_draft_nonfatal(&store, &config.draft_storage_key, &before.draft());

    let stored = store
        .items
        .borrow()
        .get(&config.draft_storage_key)
        .cloned()
        .expect("draft written");
    assert!(!stored.contains("secret"));

    let mut after = FormController::new();
    let draft = load_draft_nonfatal(&store, &config.draft_storage_key).expect("draft restored");
    assert!(after.apply_draft(&draft));
    assert_eq!(after.document_url(), "https://x/doc.pdf");
    assert_eq!(after.questions().texts(), vec!["Q1", "Q2"]);
    assert!(!after.has_auth_token());
}

#[test]
fn corrupt_draft_leaves_page_in_default_state() {
    let config = FormConfig::default();
    let store = MemoryStore::default();
    store
        .items
        .borrow_mut()
        .insert(config.draft_storage_key.clone(), "{\"questions\":".to_string());

    let mut controller = FormController::new();
    if let Some(draft) = load_draft_nonfatal(&store, &config.draft_storage_key) {
        controller.apply_draft(&draft);
    }
    assert_eq!(controller.questions().len(), 1);
    assert_eq!(controller.document_url(), "");
}
