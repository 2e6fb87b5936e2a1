//! HTTP submission of tasks to the MCP service.

use reqwest::Client as HttpClient;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use tokio_util::sync::CancellationToken;
use url::Url;

use super::decode::encode_task;
use crate::core::models::McpTask;
use crate::errors::RelayError;

pub const TASKS_PATH: &str = "/tasks";

/// Posts tasks to `<base>/tasks`, reusing one HTTP client for a whole batch.
#[derive(Debug, Clone)]
pub struct TaskForwarder {
    http_client: HttpClient,
    base_url: String,
}

impl TaskForwarder {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(HttpClient::new(), base_url)
    }

    #[must_use]
    pub fn with_client(http_client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    /// # Errors
    ///
    /// Returns [`RelayError::RequestConstruction`] if `<base>/tasks` is not a valid URL.
    pub fn tasks_url(&self) -> Result<Url, RelayError> {
        Ok(Url::parse(&format!("{}{}", self.base_url, TASKS_PATH))?)
    }

    /// Submits one task and returns the response status without inspecting it.
    ///
    /// The response body is dropped unread. No timeout is applied here; the
    /// submission is bounded only by `cancel`.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::RequestConstruction`] if the request cannot be built and
    /// [`RelayError::Transport`] if the exchange fails or `cancel` fires first.
    pub async fn submit(
        &self,
        task: &McpTask,
        cancel: &CancellationToken,
    ) -> Result<StatusCode, RelayError> {
        if cancel.is_cancelled() {
            return Err(RelayError::Transport(
                "invocation cancelled before submission".to_string(),
            ));
        }

        let url = self.tasks_url()?;
        let body = encode_task(task)?;
        let request = self
            .http_client
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body)
            .build()?;

        let response = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                return Err(RelayError::Transport(
                    "invocation cancelled during submission".to_string(),
                ));
            }
            result = self.http_client.execute(request) => result?,
        };

        Ok(response.status())
    }
}
