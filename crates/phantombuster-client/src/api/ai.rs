//! AI completions API.

use crate::client::PhantombusterClient;
use crate::error::Result;
use crate::types::{AiCompletionRequest, AiCompletionResponse};

/// AI API client.
pub struct AiApi {
    client: PhantombusterClient,
}

impl AiApi {
    pub(crate) fn new(client: PhantombusterClient) -> Self {
        Self { client }
    }

    /// Get a completion for a prompt.
    pub async fn completions(&self, request: AiCompletionRequest) -> Result<AiCompletionResponse> {
        self.client.post("/ai/completions", &request).await
    }

    /// Complete a prompt with default sampling options.
    pub async fn complete(
        &self,
        prompt: impl Into<String>,
        max_tokens_to_sample: u32,
    ) -> Result<AiCompletionResponse> {
        self.completions(AiCompletionRequest::new(prompt, max_tokens_to_sample))
            .await
    }
}
