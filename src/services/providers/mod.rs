//! Model gateway abstraction and implementations.
//!
//! The gateway is a thin adapter around the external generative model:
//! one payload in, one text blob out. Swapping the backend (Gemini, mock)
//! happens behind the `ModelGateway` trait.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for gateway operations.
///
/// Callers treat every variant uniformly; the split exists for logs and
/// metrics only.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("network error: {0}")]
    Network(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Adapter to the external generative model.
///
/// A single synchronous remote call: no retries, no streaming, no caching.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Send a byte payload and an instruction, return the model's text.
    async fn generate(
        &self,
        data: &[u8],
        mime_type: &str,
        instruction: &str,
    ) -> Result<String, GatewayError>;
}
