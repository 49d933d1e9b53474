use super::*;

use docqa_client_core::questions::QuestionEntry;
use docqa_client_core::{DisplayRegion, KeyPress, ShortcutAction, shortcut_for, submit_button_html};

pub(super) fn current_document() -> Result<web_sys::Document, String> {
    let window = web_sys::window().ok_or_else(|| "window is unavailable".to_string())?;
    window
        .document()
        .ok_or_else(|| "document is unavailable".to_string())
}

/// The page ships its own markup; the shell only binds to it.
pub(super) fn ensure_form_dom(document: &web_sys::Document) -> Result<(), String> {
    let missing: Vec<&str> = REQUIRED_ELEMENT_IDS
        .iter()
        .copied()
        .filter(|id| document.get_element_by_id(id).is_none())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(format!("form markup is missing #{}", missing.join(", #")))
    }
}

pub(super) fn set_input_value(document: &web_sys::Document, id: &str, value: &str) {
    if let Some(input) = document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
    {
        input.set_value(value);
    }
}

/// Current value of an input, or `""` when it is missing.
pub(super) fn input_value(document: &web_sys::Document, id: &str) -> String {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default()
}

/// Question input values as shown, keyed by the question they belong to.
pub(super) fn question_input_values(document: &web_sys::Document) -> Vec<(QuestionId, String)> {
    let Ok(groups) = document.query_selector_all(QUESTION_GROUP_SELECTOR) else {
        return Vec::new();
    };
    (0..groups.length())
        .filter_map(|index| groups.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .filter_map(|group| {
            let id = group
                .get_attribute(QUESTION_ID_ATTRIBUTE)?
                .parse::<u64>()
                .ok()
                .map(QuestionId)?;
            let input = group
                .query_selector(&format!(".{QUESTION_INPUT_CLASS}"))
                .ok()
                .flatten()?
                .dyn_into::<HtmlInputElement>()
                .ok()?;
            Some((id, input.value()))
        })
        .collect()
}

pub(super) fn install_form_handlers(document: &web_sys::Document) -> Result<(), String> {
    let submit_button = document
        .get_element_by_id(SUBMIT_BUTTON_ID)
        .ok_or_else(|| "missing submit button".to_string())?;
    let add_button = document
        .get_element_by_id(ADD_QUESTION_BUTTON_ID)
        .ok_or_else(|| "missing add question button".to_string())?;

    EVENT_HANDLERS.with(|slot| {
        let mut handlers = slot.borrow_mut();
        if !handlers.is_empty() {
            return;
        }

        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(
            move |event: web_sys::Event| {
                event.prevent_default();
                submit_form();
            },
        ));
        let _ = submit_button
            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
        handlers.push(callback);

        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
            add_question();
        }));
        let _ =
            add_button.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
        handlers.push(callback);

        // Question rows and result cards are rebuilt on render, so their
        // buttons and inputs are handled from the document.
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(
            move |event: web_sys::Event| {
                handle_document_click(&event);
            },
        ));
        let _ =
            document.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
        handlers.push(callback);

        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(
            move |event: web_sys::Event| {
                handle_document_input(&event);
            },
        ));
        let _ =
            document.add_event_listener_with_callback("input", callback.as_ref().unchecked_ref());
        handlers.push(callback);
    });

    KEYBOARD_HANDLERS.with(|slot| {
        let mut handlers = slot.borrow_mut();
        if !handlers.is_empty() {
            return;
        }
        let callback = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::wrap(Box::new(
            move |event: web_sys::KeyboardEvent| {
                handle_shortcut(&event);
            },
        ));
        let _ =
            document.add_event_listener_with_callback("keydown", callback.as_ref().unchecked_ref());
        handlers.push(callback);
    });

    Ok(())
}

fn event_element(event: &web_sys::Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn question_id_of(element: &Element) -> Option<QuestionId> {
    element
        .closest(QUESTION_GROUP_SELECTOR)
        .ok()
        .flatten()?
        .get_attribute(QUESTION_ID_ATTRIBUTE)?
        .parse::<u64>()
        .ok()
        .map(QuestionId)
}

fn handle_document_click(event: &web_sys::Event) {
    let Some(target) = event_element(event) else {
        return;
    };

    if let Ok(Some(button)) = target.closest(REMOVE_QUESTION_SELECTOR) {
        if let Some(id) = question_id_of(&button) {
            remove_question(id);
        }
        return;
    }

    if let Ok(Some(button)) = target.closest(COPY_ANSWER_SELECTOR) {
        let index = button
            .get_attribute(CARD_INDEX_ATTRIBUTE)
            .and_then(|raw| raw.parse::<usize>().ok());
        if let Some(index) = index {
            copy_answer(index);
        }
    }
}

fn handle_document_input(event: &web_sys::Event) {
    let Some(input) = event
        .target()
        .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
    else {
        return;
    };

    match input.id().as_str() {
        DOCUMENT_URL_INPUT_ID => update_document_url(&input.value()),
        AUTH_TOKEN_INPUT_ID => update_auth_token(&input.value()),
        _ if input.class_list().contains(QUESTION_INPUT_CLASS) => {
            if let Some(id) = question_id_of(&input) {
                update_question_text(id, &input.value());
            }
        }
        _ => {}
    }
}

fn handle_shortcut(event: &web_sys::KeyboardEvent) {
    let key = event.key();
    let press = KeyPress {
        key: &key,
        ctrl: event.ctrl_key(),
        meta: event.meta_key(),
        composing: event.is_composing(),
        in_question_input: event_element(event)
            .is_some_and(|element| element.class_list().contains(QUESTION_INPUT_CLASS)),
    };
    match shortcut_for(&press) {
        Some(ShortcutAction::Submit) => {
            event.prevent_default();
            submit_form();
        }
        Some(ShortcutAction::ClearSections) => clear_sections(),
        None => {}
    }
}

pub(super) fn apply_render_plan(plan: &RenderPlan) -> Result<(), String> {
    let document = current_document()?;

    for (region, section_id) in [
        (DisplayRegion::Loading, LOADING_SECTION_ID),
        (DisplayRegion::Results, RESULTS_SECTION_ID),
        (DisplayRegion::Error, ERROR_SECTION_ID),
    ] {
        let section = required_element(&document, section_id)?;
        section
            .class_list()
            .toggle_with_force(HIDDEN_CLASS, !plan.display.shows(region))
            .map_err(|_| format!("failed to toggle #{section_id}"))?;
    }

    let submit_button = required_element(&document, SUBMIT_BUTTON_ID)?
        .dyn_into::<web_sys::HtmlButtonElement>()
        .map_err(|_| "submit button is not a button".to_string())?;
    submit_button.set_disabled(!plan.submit_enabled);
    let icon = if plan.submit_enabled {
        SUBMIT_ICON_IDLE
    } else {
        SUBMIT_ICON_LOADING
    };
    submit_button.set_inner_html(&submit_button_html(icon, plan.submit_label));

    required_element(&document, PROCESSING_TIME_ID)?.set_text_content(Some(&plan.elapsed_text));
    required_element(&document, ERROR_MESSAGE_ID)?
        .set_text_content(Some(plan.error_message.as_deref().unwrap_or_default()));

    if let Some(questions) = plan.questions.as_deref() {
        render_questions(&document, questions, plan.focus_question)?;
    } else if let Some(id) = plan.focus_question {
        focus_question(&document, id);
    }

    if let Some(cards) = plan.result_cards.as_deref() {
        render_result_cards(&document, cards)?;
    }
    Ok(())
}

fn required_element(document: &web_sys::Document, id: &str) -> Result<Element, String> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| format!("missing #{id}"))
}

fn render_questions(
    document: &web_sys::Document,
    questions: &[QuestionEntry],
    focus: Option<QuestionId>,
) -> Result<(), String> {
    let container = required_element(document, QUESTIONS_CONTAINER_ID)?;
    container.set_inner_html("");

    for entry in questions {
        let group = document
            .create_element("div")
            .map_err(|_| "failed to create question group".to_string())?;
        group.set_class_name(QUESTION_GROUP_CLASS_NAME);
        group
            .set_attribute(QUESTION_ID_ATTRIBUTE, &entry.id.to_string())
            .map_err(|_| "failed to tag question group".to_string())?;

        let row = document
            .create_element("div")
            .map_err(|_| "failed to create question row".to_string())?;
        row.set_class_name(QUESTION_ROW_CLASS_NAME);

        let input = document
            .create_element("input")
            .map_err(|_| "failed to create question input".to_string())?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| "question input is not HtmlInputElement".to_string())?;
        input.set_type("text");
        input.set_class_name(QUESTION_INPUT_CLASS_NAME);
        input.set_placeholder(QUESTION_PLACEHOLDER);
        input.set_value(&entry.text);

        let remove = document
            .create_element("button")
            .map_err(|_| "failed to create remove button".to_string())?;
        let _ = remove.set_attribute("type", "button");
        remove.set_class_name(QUESTION_REMOVE_CLASS_NAME);
        remove.set_inner_html(REMOVE_ICON_HTML);

        row.append_child(&input)
            .map_err(|_| "failed to append question input".to_string())?;
        row.append_child(&remove)
            .map_err(|_| "failed to append remove button".to_string())?;
        group
            .append_child(&row)
            .map_err(|_| "failed to append question row".to_string())?;
        container
            .append_child(&group)
            .map_err(|_| "failed to append question group".to_string())?;

        if focus == Some(entry.id) {
            let _ = input.focus();
        }
    }
    Ok(())
}

fn focus_question(document: &web_sys::Document, id: QuestionId) {
    let selector = format!(
        "{QUESTION_GROUP_SELECTOR}[{QUESTION_ID_ATTRIBUTE}=\"{id}\"] .{QUESTION_INPUT_CLASS}"
    );
    if let Ok(Some(input)) = document.query_selector(&selector)
        && let Ok(input) = input.dyn_into::<HtmlElement>()
    {
        let _ = input.focus();
    }
}

fn render_result_cards(document: &web_sys::Document, cards: &[String]) -> Result<(), String> {
    let container = required_element(document, RESULTS_CONTAINER_ID)?;
    container.set_inner_html("");
    for html in cards {
        let card = document
            .create_element("div")
            .map_err(|_| "failed to create result card".to_string())?;
        card.set_class_name(RESULT_CARD_CLASS_NAME);
        card.set_inner_html(html);
        container
            .append_child(&card)
            .map_err(|_| "failed to append result card".to_string())?;
    }
    Ok(())
}

pub(super) fn scroll_into_view(id: &str) {
    let Ok(document) = current_document() else {
        return;
    };
    if let Some(element) = document.get_element_by_id(id) {
        let options = web_sys::ScrollIntoViewOptions::new();
        options.set_behavior(web_sys::ScrollBehavior::Smooth);
        element.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

pub(super) async fn write_clipboard_text(text: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or_else(|| "window is unavailable".to_string())?;
    let clipboard = js_sys::Reflect::get(&window.navigator(), &JsValue::from_str("clipboard"))
        .map_err(|_| "clipboard lookup failed".to_string())?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return Err("clipboard is unavailable".to_string());
    }
    let write_text = js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))
        .map_err(|_| "clipboard.writeText lookup failed".to_string())?
        .dyn_into::<js_sys::Function>()
        .map_err(|_| "clipboard.writeText is not a function".to_string())?;
    let promise = write_text
        .call1(&clipboard, &JsValue::from_str(text))
        .map_err(|_| "clipboard.writeText threw".to_string())?
        .dyn_into::<js_sys::Promise>()
        .map_err(|_| "clipboard.writeText did not return a promise".to_string())?;
    wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|_| "clipboard write was rejected".to_string())
}
