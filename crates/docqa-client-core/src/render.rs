use maud::{Markup, html};
use serde::Serialize;

use crate::submission::SubmissionResponse;

pub const NO_ANSWER_TEXT: &str = "No answer provided";

/// One question paired with its answer, in submission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultCard {
    /// 1-based position shown in the card heading.
    pub number: usize,
    pub question: String,
    pub answer: Option<String>,
}

impl ResultCard {
    pub fn answer_text(&self) -> &str {
        self.answer.as_deref().unwrap_or(NO_ANSWER_TEXT)
    }
}

pub fn build_result_cards(questions: &[String], response: &SubmissionResponse) -> Vec<ResultCard> {
    questions
        .iter()
        .enumerate()
        .map(|(index, question)| ResultCard {
            number: index + 1,
            question: question.clone(),
            answer: response.answer(index).map(ToString::to_string),
        })
        .collect()
}

/// Answer text with each line break rendered as `<br>`. Every segment is
/// escaped by `maud`.
pub fn answer_markup(answer: &str) -> Markup {
    html! {
        @for (index, line) in answer.split('\n').enumerate() {
            @if index > 0 {
                br;
            }
            (line.strip_suffix('\r').unwrap_or(line))
        }
    }
}

pub fn format_answer_html(answer: &str) -> String {
    answer_markup(answer).into_string()
}

pub fn result_card_markup(card: &ResultCard) -> Markup {
    html! {
        div class="mb-4" {
            h3 class="text-lg font-semibold text-gray-800 mb-2" {
                i class="fas fa-question-circle mr-2 text-blue-500" {}
                "Question " (card.number)
            }
            p class="text-gray-700 bg-blue-50 p-3 rounded-lg border-l-4 border-blue-400" {
                (card.question)
            }
        }
        div {
            div class="flex items-center justify-between mb-2" {
                h4 class="text-md font-semibold text-gray-800" {
                    i class="fas fa-lightbulb mr-2 text-yellow-500" {}
                    "Answer"
                }
                button type="button"
                    class="copy-answer-btn text-sm text-blue-600 hover:text-blue-800"
                    data-card-index=(card.number.saturating_sub(1)) {
                    i class="fas fa-copy mr-1" {}
                    "Copy"
                }
            }
            div class="text-gray-700 p-4 bg-white rounded-lg border border-gray-200" {
                (answer_markup(card.answer_text()))
            }
        }
    }
}

pub fn result_card_html(card: &ResultCard) -> String {
    result_card_markup(card).into_string()
}

/// Contents of the submit control: an icon followed by the label.
pub fn submit_button_html(icon_class: &str, label: &str) -> String {
    html! {
        i class={ "fas " (icon_class) " mr-2" } {}
        (label)
    }
    .into_string()
}
