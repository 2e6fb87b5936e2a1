use crate::errors::RelayError;

/// Result of relaying one message of a batch.
#[derive(Debug)]
pub enum MessageOutcome {
    /// The MCP service answered; the status is recorded but never acted upon.
    Forwarded { task_id: String, status: u16 },
    DecodeFailed { error: RelayError },
    SendFailed { task_id: String, error: RelayError },
}

impl MessageOutcome {
    #[must_use]
    pub fn is_forwarded(&self) -> bool {
        matches!(self, MessageOutcome::Forwarded { .. })
    }

    #[must_use]
    pub fn task_id(&self) -> Option<&str> {
        match self {
            MessageOutcome::Forwarded { task_id, .. } | MessageOutcome::SendFailed { task_id, .. } => {
                Some(task_id)
            }
            MessageOutcome::DecodeFailed { .. } => None,
        }
    }
}

/// Per-message outcomes of one invocation, in delivery order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<MessageOutcome>,
}

impl BatchReport {
    pub fn push(&mut self, outcome: MessageOutcome) {
        self.outcomes.push(outcome);
    }

    #[must_use]
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn forwarded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_forwarded()).count()
    }

    #[must_use]
    pub fn decode_failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, MessageOutcome::DecodeFailed { .. }))
            .count()
    }

    #[must_use]
    pub fn send_failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, MessageOutcome::SendFailed { .. }))
            .count()
    }
}
