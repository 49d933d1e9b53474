use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of the outbound POST.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub documents: String,
    pub questions: Vec<String>,
}

/// A request plus the bearer token it is sent with.
#[derive(Clone, PartialEq, Eq)]
pub struct PreparedSubmission {
    request: SubmissionRequest,
    auth_token: String,
}

impl std::fmt::Debug for PreparedSubmission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparedSubmission")
            .field("request", &self.request)
            .field("auth_token", &"<redacted>")
            .finish()
    }
}

impl PreparedSubmission {
    pub fn new(request: SubmissionRequest, auth_token: String) -> Self {
        Self {
            request,
            auth_token,
        }
    }

    pub fn request(&self) -> &SubmissionRequest {
        &self.request
    }

    pub fn questions(&self) -> &[String] {
        &self.request.questions
    }

    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.auth_token)
    }

    pub fn body_json(&self) -> Result<String, RequestError> {
        serde_json::to_string(&self.request)
            .map_err(|error| RequestError::Decode(format!("failed to serialize request: {error}")))
    }
}

/// Decoded success body. Answers stay positional: index `i` answers
/// question `i`, and a hole is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionResponse {
    pub answers: Vec<Option<String>>,
}

impl SubmissionResponse {
    pub fn answer(&self, index: usize) -> Option<&str> {
        self.answers.get(index).and_then(|answer| answer.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct RawSubmissionResponse {
    answers: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct RawErrorBody {
    #[serde(default)]
    detail: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("{message}")]
    Http {
        status: u16,
        status_text: String,
        message: String,
    },
    #[error("{0}")]
    Network(String),
    #[error("{0}")]
    Decode(String),
}

impl RequestError {
    /// Maps a non-success response. A string `detail` wins, any other
    /// non-null `detail` is shown as JSON text, and an absent or unparsable
    /// body falls back to the status line.
    pub fn from_error_response(status: u16, status_text: &str, body: &str) -> Self {
        let parsed: RawErrorBody = serde_json::from_str(body).unwrap_or_default();
        let message = parsed
            .detail
            .and_then(value_text)
            .unwrap_or_else(|| format!("HTTP {status}: {status_text}"));
        Self::Http {
            status,
            status_text: status_text.to_string(),
            message,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Http { .. } => "http",
            Self::Network(_) => "network",
            Self::Decode(_) => "decode",
        }
    }
}

/// `null`, `""`, `0` and `false` count as absent; other non-strings become
/// their JSON text.
fn value_text(value: Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::Number(number) if number.as_f64().is_some_and(|n| n.abs() < f64::MIN_POSITIVE) => {
            None
        }
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

pub fn decode_success_body(body: &str) -> Result<SubmissionResponse, RequestError> {
    let raw: RawSubmissionResponse = serde_json::from_str(body)
        .map_err(|error| RequestError::Decode(format!("Invalid response from server: {error}")))?;
    Ok(SubmissionResponse {
        answers: raw.answers.into_iter().map(value_text).collect(),
    })
}

/// Turns a completed HTTP exchange into the submission outcome.
pub fn decode_response(
    status: u16,
    status_text: &str,
    body: &str,
) -> Result<SubmissionResponse, RequestError> {
    if (200..=299).contains(&status) {
        decode_success_body(body)
    } else {
        Err(RequestError::from_error_response(status, status_text, body))
    }
}

#[async_trait(?Send)]
pub trait SubmissionTransport {
    async fn submit(
        &self,
        submission: &PreparedSubmission,
    ) -> Result<SubmissionResponse, RequestError>;
}
