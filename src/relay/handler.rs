use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use super::{TaskRelay, read_batch};
use crate::core::config::RelayConfig;

pub use self::function_handler as handler;

/// Lambda handler for the relay entrypoint.
///
/// # Errors
///
/// Fails only when the SQS batch cannot be read. A missing `MCP_SERVICE_URL`
/// leaves an empty base URL, so every decoded message fails request
/// construction on its own and the invocation still succeeds.
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<(), Error> {
    let config = RelayConfig::from_env().unwrap_or_else(|e| {
        error!("Config error: {}", e);
        RelayConfig::new("")
    });
    let (payload, context) = event.into_parts();

    let messages = read_batch(&payload).map_err(|e| {
        error!("{}", e);
        Error::from(e)
    })?;
    info!(
        request_id = %context.request_id,
        "Relay Lambda received {} SQS messages",
        messages.len()
    );

    let cancel = deadline_token(context.deadline);
    let report = TaskRelay::new(&config)
        .process_batch(messages, &cancel)
        .await;
    cancel.cancel();

    if report.forwarded() < report.attempted() {
        warn!(
            attempted = report.attempted(),
            forwarded = report.forwarded(),
            decode_failures = report.decode_failures(),
            send_failures = report.send_failures(),
            "Batch relayed with failures"
        );
    } else {
        info!(
            attempted = report.attempted(),
            forwarded = report.forwarded(),
            "Batch relayed"
        );
    }

    Ok(())
}

/// Builds a token that fires when the invocation deadline (ms since epoch) passes.
///
/// A zero deadline means the runtime supplied none and the token only fires when
/// cancelled explicitly.
#[must_use]
pub fn deadline_token(deadline_ms: u64) -> CancellationToken {
    let token = CancellationToken::new();
    if deadline_ms == 0 {
        return token;
    }

    let deadline = UNIX_EPOCH + Duration::from_millis(deadline_ms);
    let Ok(remaining) = deadline.duration_since(SystemTime::now()) else {
        token.cancel();
        return token;
    };

    let timer = token.clone();
    tokio::spawn(async move {
        tokio::select! {
            () = tokio::time::sleep(remaining) => timer.cancel(),
            () = timer.cancelled() => {}
        }
    });
    token
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_deadline_in_the_past_cancels_immediately() {
        assert!(deadline_token(1).is_cancelled());
    }

    #[tokio::test]
    async fn test_zero_deadline_never_fires() {
        let token = deadline_token(0);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!token.is_cancelled());
    }

    #[tokio::test]
    async fn test_deadline_fires_when_reached() {
        let now_ms = u64::try_from(
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_millis(),
        )
        .unwrap();
        let token = deadline_token(now_ms + 50);
        assert!(!token.is_cancelled());

        tokio::time::timeout(Duration::from_secs(2), token.cancelled())
            .await
            .expect("deadline token should fire");
    }
}
