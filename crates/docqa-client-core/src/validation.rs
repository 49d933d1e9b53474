use crate::submission::{PreparedSubmission, SubmissionRequest};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Document URL is required")]
    MissingDocumentUrl,
    #[error("Authentication token is required")]
    MissingAuthToken,
    #[error("At least one question is required")]
    NoQuestions,
    #[error("Please enter a valid URL")]
    InvalidDocumentUrl,
}

/// Trimmed, filtered form fields ready to be sent.
#[derive(Clone, PartialEq, Eq)]
pub struct ValidatedSubmission {
    pub document_url: String,
    pub auth_token: String,
    pub questions: Vec<String>,
}

impl std::fmt::Debug for ValidatedSubmission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatedSubmission")
            .field("document_url", &self.document_url)
            .field("auth_token", &"<redacted>")
            .field("questions", &self.questions)
            .finish()
    }
}

impl ValidatedSubmission {
    pub fn into_prepared(self) -> PreparedSubmission {
        PreparedSubmission::new(
            SubmissionRequest {
                documents: self.document_url,
                questions: self.questions,
            },
            self.auth_token,
        )
    }
}

/// Checks run in a fixed order: URL presence, token presence, at least one
/// non-blank question, then URL syntax.
pub fn validate_submission<'a, I>(
    document_url: &str,
    auth_token: &str,
    questions: I,
) -> Result<ValidatedSubmission, ValidationError>
where
    I: IntoIterator<Item = &'a str>,
{
    let document_url = document_url.trim();
    if document_url.is_empty() {
        return Err(ValidationError::MissingDocumentUrl);
    }

    let auth_token = auth_token.trim();
    if auth_token.is_empty() {
        return Err(ValidationError::MissingAuthToken);
    }

    let questions = normalize_questions(questions);
    if questions.is_empty() {
        return Err(ValidationError::NoQuestions);
    }

    if !is_absolute_url(document_url) {
        return Err(ValidationError::InvalidDocumentUrl);
    }

    Ok(ValidatedSubmission {
        document_url: document_url.to_string(),
        auth_token: auth_token.to_string(),
        questions,
    })
}

pub fn normalize_questions<'a, I>(questions: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    questions
        .into_iter()
        .map(str::trim)
        .filter(|question| !question.is_empty())
        .map(ToString::to_string)
        .collect()
}

pub fn is_absolute_url(raw: &str) -> bool {
    url::Url::parse(raw).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_filters_questions_in_order() {
        let validated = validate_submission(
            "  https://example.com/policy.pdf ",
            " token-1 ",
            ["  Q1 ", "", "   ", "Q2", "Q3  "],
        )
        .expect("valid submission");

        assert_eq!(validated.document_url, "https://example.com/policy.pdf");
        assert_eq!(validated.auth_token, "token-1");
        assert_eq!(validated.questions, vec!["Q1", "Q2", "Q3"]);
    }

    #[test]
    fn empty_url_is_reported_first() {
        let error = validate_submission("   ", "", []).expect_err("missing url");
        assert_eq!(error, ValidationError::MissingDocumentUrl);
        assert_eq!(error.to_string(), "Document URL is required");
    }

    #[test]
    fn empty_token_is_reported_before_questions() {
        let error =
            validate_submission("https://x/doc.pdf", "  ", [""]).expect_err("missing token");
        assert_eq!(error, ValidationError::MissingAuthToken);
        assert_eq!(error.to_string(), "Authentication token is required");
    }

    #[test]
    fn blank_questions_only_is_rejected() {
        let error =
            validate_submission("https://x/doc.pdf", "t", ["", "  "]).expect_err("no questions");
        assert_eq!(error, ValidationError::NoQuestions);
        assert_eq!(error.to_string(), "At least one question is required");
    }

    #[test]
    fn malformed_url_is_checked_after_presence_rules() {
        let error = validate_submission("not a url", "t", ["Q1"]).expect_err("invalid url");
        assert_eq!(error, ValidationError::InvalidDocumentUrl);
        assert_eq!(error.to_string(), "Please enter a valid URL");

        let error = validate_submission("not a url", "t", [""]).expect_err("no questions");
        assert_eq!(error, ValidationError::NoQuestions);
    }

    #[test]
    fn relative_paths_are_not_absolute_urls() {
        assert!(!is_absolute_url("/docs/policy.pdf"));
        assert!(!is_absolute_url("example.com/policy.pdf"));
        assert!(is_absolute_url("https://example.com/policy.pdf?sv=1&sig=abc"));
    }

    #[test]
    fn debug_output_redacts_token() {
        let validated =
            validate_submission("https://x/doc.pdf", "secret-token", ["Q1"]).expect("valid");
        let rendered = format!("{validated:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("<redacted>"));
    }
}
