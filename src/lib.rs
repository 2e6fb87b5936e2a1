//! MCP relay - forwards queued MCP tasks from SQS to the MCP service.
//!
//! The crate implements a single Lambda function:
//! SQS delivers a batch of task notifications, each record body is decoded into an
//! [`McpTask`](core::models::McpTask) and posted to `<MCP_SERVICE_URL>/tasks`.
//!
//! # Architecture
//!
//! The system uses:
//! - AWS Lambda (`lambda_runtime`) for serverless execution
//! - SQS as the upstream task queue
//! - reqwest for the MCP service calls
//! - Tokio for async runtime and `tokio-util` cancellation tokens
//!
//! # Example
//!
//! ```no_run
//! use mcp_relay::core::config::RelayConfig;
//! use mcp_relay::core::models::RawMessage;
//! use mcp_relay::relay::TaskRelay;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() {
//!     mcp_relay::setup_logging();
//!
//!     let config = RelayConfig::new("http://mcp.internal:8080");
//!     let relay = TaskRelay::new(&config);
//!     let batch = vec![RawMessage::new(
//!         r#"{"taskId":"t1","type":"create_task","parameters":{"taskType":"audit"}}"#,
//!     )];
//!
//!     let report = relay.process_batch(batch, &CancellationToken::new()).await;
//!     println!("forwarded {} of {}", report.forwarded(), report.attempted());
//! }
//! ```
// Module declarations
pub mod core;
pub mod errors;
pub mod relay;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Sets up tracing-subscriber with a JSON formatter suitable for `CloudWatch`
/// Logs. Calling it more than once is harmless; later calls keep the first
/// subscriber.
///
/// # Example
///
/// ```
/// mcp_relay::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}
