use super::*;

use async_trait::async_trait;
use docqa_client_core::submission::decode_response;
use docqa_client_core::{PreparedSubmission, RequestError, SubmissionResponse};
use gloo_net::http::Request;

/// Sends the prepared submission with `fetch`, relative to the page origin
/// unless the endpoint is absolute.
pub(super) struct FetchTransport {
    endpoint: String,
}

impl FetchTransport {
    pub(super) fn new(endpoint: String) -> Self {
        Self { endpoint }
    }
}

#[async_trait(?Send)]
impl SubmissionTransport for FetchTransport {
    async fn submit(
        &self,
        submission: &PreparedSubmission,
    ) -> Result<SubmissionResponse, RequestError> {
        let body = submission.body_json()?;
        let request = Request::post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("Authorization", &submission.authorization_header())
            .body(body)
            .map_err(map_network_error)?;
        let response = request.send().await.map_err(map_network_error)?;

        let status = response.status();
        let status_text = response.status_text();
        let raw = response.text().await.map_err(map_network_error)?;
        tracing::debug!(status, bytes = raw.len(), "received submission response");
        decode_response(status, &status_text, &raw)
    }
}

fn map_network_error(error: gloo_net::Error) -> RequestError {
    RequestError::Network(error.to_string())
}
