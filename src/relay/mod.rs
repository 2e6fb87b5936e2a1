//! SQS to MCP service relay.
//!
//! Each record of a batch is decoded into an [`McpTask`] and posted to the MCP
//! service. Failures are isolated per message: they are logged, recorded in the
//! [`BatchReport`], and never retried or escalated. Redelivery is left to the queue.

pub mod decode;
pub mod forward;
pub mod handler;
pub mod outcome;

use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, error, info, info_span};

use crate::core::config::RelayConfig;
use crate::core::models::{McpTask, RawMessage};

pub use decode::{decode_message, decode_task, encode_task, read_batch};
pub use forward::TaskForwarder;
pub use handler::handler;
pub use outcome::{BatchReport, MessageOutcome};

/// Relays message batches to a single MCP service.
#[derive(Debug, Clone)]
pub struct TaskRelay {
    forwarder: TaskForwarder,
}

impl TaskRelay {
    #[must_use]
    pub fn new(config: &RelayConfig) -> Self {
        Self::with_forwarder(TaskForwarder::new(config.mcp_service_url.clone()))
    }

    #[must_use]
    pub fn with_forwarder(forwarder: TaskForwarder) -> Self {
        Self { forwarder }
    }

    /// Attempts every message exactly once, in delivery order.
    pub async fn process_batch<I>(&self, messages: I, cancel: &CancellationToken) -> BatchReport
    where
        I: IntoIterator<Item = RawMessage>,
    {
        let mut report = BatchReport::default();
        for message in messages {
            let span = info_span!(
                "relay_message",
                message_id = message.message_id.as_deref().unwrap_or("-")
            );
            let outcome = self.process_message(&message, cancel).instrument(span).await;
            report.push(outcome);
        }
        report
    }

    async fn process_message(
        &self,
        message: &RawMessage,
        cancel: &CancellationToken,
    ) -> MessageOutcome {
        let task = match decode_message(message) {
            Ok(task) => task,
            Err(e) => {
                error!("Error decoding message: {}", e);
                return MessageOutcome::DecodeFailed { error: e };
            }
        };
        log_task(&task);

        match self.forwarder.submit(&task, cancel).await {
            Ok(status) => {
                info!(
                    task_id = %task.task_id,
                    status = status.as_u16(),
                    "Task forwarded to MCP service"
                );
                MessageOutcome::Forwarded {
                    task_id: task.task_id,
                    status: status.as_u16(),
                }
            }
            Err(e) => {
                error!(task_id = %task.task_id, "Error sending task to MCP service: {}", e);
                MessageOutcome::SendFailed {
                    task_id: task.task_id,
                    error: e,
                }
            }
        }
    }
}

fn log_task(task: &McpTask) {
    #[cfg(feature = "debug-logs")]
    debug!(
        task_id = %task.task_id,
        task_type = %task.task_type,
        "Decoded task parameters: {:?}",
        task.parameters
    );
    #[cfg(not(feature = "debug-logs"))]
    debug!(
        task_id = %task.task_id,
        task_type = %task.task_type,
        "Decoded task with {} parameters [values masked, enable debug-logs feature to view]",
        task.parameters.len()
    );
}

/// Relays `messages` to the MCP service at `base_url`.
pub async fn process_batch<I>(
    messages: I,
    base_url: &str,
    cancel: &CancellationToken,
) -> BatchReport
where
    I: IntoIterator<Item = RawMessage>,
{
    TaskRelay::with_forwarder(TaskForwarder::new(base_url))
        .process_batch(messages, cancel)
        .await
}
