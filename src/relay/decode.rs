//! Conversion between SQS payloads and [`McpTask`] records.

use serde_json::Value;
use tracing::{error, warn};

use crate::core::models::{McpTask, RawMessage};
use crate::errors::RelayError;

/// Parses a single message body into a task.
///
/// # Errors
///
/// Returns [`RelayError::Decode`] when the body is not valid JSON or is missing
/// `taskId`, `type` or `parameters`.
pub fn decode_task(body: &str) -> Result<McpTask, RelayError> {
    Ok(serde_json::from_str(body)?)
}

/// Encodes a task in the same wire schema it was received in.
///
/// # Errors
///
/// Returns [`RelayError::RequestConstruction`] if serialization fails.
pub fn encode_task(task: &McpTask) -> Result<Vec<u8>, RelayError> {
    serde_json::to_vec(task)
        .map_err(|e| RelayError::RequestConstruction(format!("Failed to serialize task: {e}")))
}

/// Decodes the body of a queue record.
///
/// # Errors
///
/// Returns [`RelayError::Decode`] if the record has no body or the body is not a task.
pub fn decode_message(message: &RawMessage) -> Result<McpTask, RelayError> {
    let body = message
        .body
        .as_deref()
        .ok_or_else(|| RelayError::Decode("message has no body".to_string()))?;
    decode_task(body)
}

/// Extracts the ordered list of records from a raw SQS event payload.
///
/// `messageId` and `body` are read independently, so a malformed id never drops
/// the body. Records without a string body are kept as empty messages and still
/// count as (failed) attempts.
///
/// # Errors
///
/// Returns [`RelayError::BatchRead`] if the payload has no `Records` array.
pub fn read_batch(payload: &Value) -> Result<Vec<RawMessage>, RelayError> {
    let records = payload
        .get("Records")
        .and_then(|records| records.as_array())
        .ok_or_else(|| RelayError::BatchRead("event payload has no Records array".to_string()))?;

    Ok(records.iter().map(read_record).collect())
}

fn read_record(record: &Value) -> RawMessage {
    let message_id = match record.get("messageId") {
        None | Some(Value::Null) => None,
        Some(Value::String(id)) => Some(id.clone()),
        Some(other) => {
            warn!("Ignoring non-string SQS messageId: {}", other);
            None
        }
    };
    let body = match record.get("body") {
        Some(Value::String(body)) => Some(body.clone()),
        other => {
            error!(
                message_id = message_id.as_deref().unwrap_or("-"),
                "SQS record has no string body: {}",
                other.map_or_else(|| record.to_string(), ToString::to_string)
            );
            None
        }
    };
    RawMessage { message_id, body }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn sample_task() -> McpTask {
        McpTask {
            task_id: "task-42".to_string(),
            task_type: "create_task".to_string(),
            parameters: HashMap::from([
                ("taskType".to_string(), "inspection".to_string()),
                ("location".to_string(), "warehouse-3".to_string()),
            ]),
            callback_url: Some("https://example.com/callback".to_string()),
        }
    }

    #[test]
    fn test_decode_full_task() {
        let body = r#"{"taskId":"t1","type":"add","parameters":{"a":"1","b":"2"},"callbackUrl":"https://cb"}"#;
        let task = decode_task(body).unwrap();

        assert_eq!(task.task_id, "t1");
        assert_eq!(task.task_type, "add");
        assert_eq!(task.parameters.get("a").map(String::as_str), Some("1"));
        assert_eq!(task.callback_url.as_deref(), Some("https://cb"));
    }

    #[test]
    fn test_decode_without_callback_url() {
        let task = decode_task(r#"{"taskId":"t1","type":"add","parameters":{}}"#).unwrap();
        assert!(task.parameters.is_empty());
        assert!(task.callback_url.is_none());
    }

    #[test]
    fn test_decode_rejects_missing_required_fields() {
        for body in [
            r#"{"type":"add","parameters":{}}"#,
            r#"{"taskId":"t1","parameters":{}}"#,
            r#"{"taskId":"t1","type":"add"}"#,
            r#"{"taskId":"t1","type":"add","parameters":{"a":1}}"#,
            "not json at all",
        ] {
            let err = decode_task(body).unwrap_err();
            assert!(matches!(err, RelayError::Decode(_)), "body: {body}");
        }
    }

    #[test]
    fn test_encode_then_decode_is_stable() {
        let task = sample_task();
        let encoded = encode_task(&task).unwrap();
        let decoded = decode_task(std::str::from_utf8(&encoded).unwrap()).unwrap();
        assert_eq!(decoded, task);

        let mut no_callback = sample_task();
        no_callback.callback_url = None;
        let encoded = encode_task(&no_callback).unwrap();
        assert_eq!(decode_task(std::str::from_utf8(&encoded).unwrap()).unwrap(), no_callback);
    }

    #[test]
    fn test_encode_then_decode_edge_values() {
        let cases = [
            McpTask {
                task_id: "empty".to_string(),
                task_type: "noop".to_string(),
                parameters: HashMap::new(),
                callback_url: None,
            },
            McpTask {
                task_id: "ünïcødé-✓".to_string(),
                task_type: "créer_tâche".to_string(),
                parameters: HashMap::from([
                    ("emplacement".to_string(), "entrepôt 東京".to_string()),
                    ("quote\"key".to_string(), "back\\slash\nnew\tline".to_string()),
                    (String::new(), String::new()),
                ]),
                callback_url: Some("https://cb.example/?q=\"x\"&r=é".to_string()),
            },
        ];

        for task in cases {
            let encoded = encode_task(&task).unwrap();
            let decoded = decode_task(std::str::from_utf8(&encoded).unwrap()).unwrap();
            assert_eq!(decoded, task);
        }
    }

    #[test]
    fn test_encode_uses_wire_names_and_omits_missing_callback() {
        let mut task = sample_task();
        task.callback_url = None;
        let value: Value = serde_json::from_slice(&encode_task(&task).unwrap()).unwrap();

        assert_eq!(value["taskId"], "task-42");
        assert_eq!(value["type"], "create_task");
        assert_eq!(value["parameters"]["location"], "warehouse-3");
        assert!(value.get("callbackUrl").is_none());
    }

    #[test]
    fn test_decode_message_without_body() {
        let err = decode_message(&RawMessage::default()).unwrap_err();
        assert!(matches!(err, RelayError::Decode(_)));
    }

    #[test]
    fn test_read_batch_keeps_order_and_ids() {
        let payload = json!({
            "Records": [
                { "messageId": "m-1", "body": "first", "eventSource": "aws:sqs" },
                { "messageId": "m-2", "body": "second" },
                "garbage"
            ]
        });

        let batch = read_batch(&payload).unwrap();
        assert_eq!(batch.len(), 3);
        assert_eq!(batch[0].message_id.as_deref(), Some("m-1"));
        assert_eq!(batch[0].body.as_deref(), Some("first"));
        assert_eq!(batch[1].body.as_deref(), Some("second"));
        assert_eq!(batch[2], RawMessage::default());
    }

    #[test]
    fn test_read_batch_keeps_body_when_message_id_is_malformed() {
        let payload = json!({
            "Records": [
                { "messageId": 17, "body": "kept" },
                { "messageId": "m-2", "body": { "not": "a string" } }
            ]
        });

        let batch = read_batch(&payload).unwrap();
        assert_eq!(batch[0].message_id, None);
        assert_eq!(batch[0].body.as_deref(), Some("kept"));
        assert_eq!(batch[1].message_id.as_deref(), Some("m-2"));
        assert_eq!(batch[1].body, None);
    }

    #[test]
    fn test_read_batch_without_records_fails() {
        for payload in [json!({}), json!({ "Records": "nope" }), json!(null)] {
            let err = read_batch(&payload).unwrap_err();
            assert!(matches!(err, RelayError::BatchRead(_)));
        }
    }

    #[test]
    fn test_read_batch_empty_records() {
        assert!(read_batch(&json!({ "Records": [] })).unwrap().is_empty());
    }
}
