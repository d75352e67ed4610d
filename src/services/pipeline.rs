//! Classification pipeline: upload validation and model invocation.

use crate::error::ApiError;
use crate::services::providers::ModelGateway;
use std::sync::Arc;

/// The only media type the pipeline accepts. Matched against the declared
/// type exactly; file content is never inspected.
pub const PDF_MIME: &str = "application/pdf";

/// Instruction sent with every upload. Never templated with request data.
pub const CLASSIFICATION_PROMPT: &str = "\
Analyze this document for data sensitivity.
Return the result in clean Markdown. No intro, no conversational filler.
Format:
### Sensitivity Level
**[Choose: Public / Internal / Confidential / Restricted]**
### Summary
(One clear sentence describing the document nature)
### Key Data Detected
(Bullet points of specific data elements found, e.g., Financial Projections, Customer Emails, Source Code)
### Reasoning
(Brief explanation of why this level was chosen)";

/// An inbound file, fully buffered. Discarded once the pipeline consumed it.
#[derive(Debug)]
pub struct Upload {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Validates an upload and runs it through the model gateway.
///
/// Holds `None` when no API credential was configured at startup; every
/// classification then fails with `ApiError::Configuration`.
#[derive(Clone)]
pub struct ClassificationPipeline {
    gateway: Option<Arc<dyn ModelGateway>>,
}

impl ClassificationPipeline {
    pub fn new(gateway: Option<Arc<dyn ModelGateway>>) -> Self {
        Self { gateway }
    }

    /// Classify one upload.
    ///
    /// Check order is part of the external contract: credential first,
    /// media type second, then the gateway call. First failure wins.
    pub async fn classify(&self, upload: &Upload) -> Result<String, ApiError> {
        let gateway = self.gateway.as_ref().ok_or(ApiError::Configuration)?;

        if upload.content_type != PDF_MIME {
            return Err(ApiError::Validation(format!(
                "unsupported media type {:?}",
                upload.content_type
            )));
        }

        gateway
            .generate(&upload.data, PDF_MIME, CLASSIFICATION_PROMPT)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, filename = %upload.filename, "Model gateway call failed");
                ApiError::Engine(e)
            })
    }
}
