//! Scripted gateway for tests.

use super::{GatewayError, ModelGateway};
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Gateway that replays a fixed outcome and records what it was asked.
pub struct MockGateway {
    reply: Result<String, String>,
    calls: AtomicUsize,
    last_request: Mutex<Option<(String, String)>>,
}

impl MockGateway {
    /// Succeed with the given text on every call.
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Fail with an API error on every call.
    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Number of times `generate` was invoked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The `(mime_type, instruction)` pair from the most recent call.
    pub fn last_request(&self) -> Option<(String, String)> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelGateway for MockGateway {
    async fn generate(
        &self,
        _data: &[u8],
        mime_type: &str,
        instruction: &str,
    ) -> Result<String, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() =
            Some((mime_type.to_string(), instruction.to_string()));

        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(GatewayError::Api(message.clone())),
        }
    }
}
