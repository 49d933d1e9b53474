pub(crate) const DOCUMENT_URL_INPUT_ID: &str = "documentUrl";
pub(crate) const AUTH_TOKEN_INPUT_ID: &str = "authToken";
pub(crate) const QUESTIONS_CONTAINER_ID: &str = "questionsContainer";
pub(crate) const ADD_QUESTION_BUTTON_ID: &str = "addQuestionBtn";
pub(crate) const SUBMIT_BUTTON_ID: &str = "submitBtn";
pub(crate) const LOADING_SECTION_ID: &str = "loadingSection";
pub(crate) const RESULTS_SECTION_ID: &str = "resultsSection";
pub(crate) const RESULTS_CONTAINER_ID: &str = "resultsContainer";
pub(crate) const ERROR_SECTION_ID: &str = "errorSection";
pub(crate) const ERROR_MESSAGE_ID: &str = "errorMessage";
pub(crate) const PROCESSING_TIME_ID: &str = "processingTime";
pub(crate) const REQUIRED_ELEMENT_IDS: [&str; 11] = [
    DOCUMENT_URL_INPUT_ID,
    AUTH_TOKEN_INPUT_ID,
    QUESTIONS_CONTAINER_ID,
    ADD_QUESTION_BUTTON_ID,
    SUBMIT_BUTTON_ID,
    LOADING_SECTION_ID,
    RESULTS_SECTION_ID,
    RESULTS_CONTAINER_ID,
    ERROR_SECTION_ID,
    ERROR_MESSAGE_ID,
    PROCESSING_TIME_ID,
];

pub(crate) const HIDDEN_CLASS: &str = "hidden";
pub(crate) const QUESTION_GROUP_CLASS: &str = "question-input-group";
pub(crate) const QUESTION_INPUT_CLASS: &str = "question-input";
pub(crate) const REMOVE_QUESTION_SELECTOR: &str = ".remove-question-btn";
pub(crate) const QUESTION_GROUP_SELECTOR: &str = ".question-input-group";
pub(crate) const COPY_ANSWER_SELECTOR: &str = ".copy-answer-btn";
pub(crate) const QUESTION_ID_ATTRIBUTE: &str = "data-question-id";
pub(crate) const CARD_INDEX_ATTRIBUTE: &str = "data-card-index";

pub(crate) const QUESTION_GROUP_CLASS_NAME: &str = "question-input-group mb-3";
pub(crate) const QUESTION_ROW_CLASS_NAME: &str = "flex items-center space-x-2";
pub(crate) const QUESTION_INPUT_CLASS_NAME: &str = "question-input flex-1 p-3 border border-gray-300 rounded-lg focus:ring-2 focus:ring-blue-500 focus:border-transparent";
pub(crate) const QUESTION_REMOVE_CLASS_NAME: &str = "remove-question-btn bg-red-500 text-white p-3 rounded-lg hover:bg-red-600 transition-colors";
pub(crate) const QUESTION_PLACEHOLDER: &str = "Enter your question...";
pub(crate) const REMOVE_ICON_HTML: &str = r#"<i class="fas fa-trash"></i>"#;
pub(crate) const RESULT_CARD_CLASS_NAME: &str = "answer-card p-6 rounded-lg mb-6 question-item";
pub(crate) const SUBMIT_ICON_IDLE: &str = "fa-search";
pub(crate) const SUBMIT_ICON_LOADING: &str = "fa-spinner fa-spin";

pub(crate) const CONFIG_OVERRIDES_GLOBAL: &str = "__DOCQA_CONFIG__";
