//! Chat completion executor with bounded retries.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::LlmError;
use crate::executors::CHAT_COMPLETIONS_PATH;
use crate::normalize::{PromptInput, normalize};
use crate::traits::ChatModel;
use crate::transformers::{
    OpenAiRequestTransformer, OpenAiResponseTransformer, RequestTransformer, ResponseTransformer,
};
use crate::transport::{HttpTransport, TransportRequest};
use crate::types::{ChatReply, GenerationConfig};

/// Chat model over an OpenAI-compatible endpoint.
///
/// The request body is built once per invocation; the retry loop reissues the
/// identical request on any transport failure, back to back with no backoff,
/// until `max_retries` additional attempts are spent. The final failure is
/// propagated unchanged. Callers that need rate-limit friendliness must pace
/// their own calls.
pub struct OpenAiChatModel {
    config: GenerationConfig,
    transport: Arc<dyn HttpTransport>,
    request_transformer: Arc<dyn RequestTransformer>,
    response_transformer: Arc<dyn ResponseTransformer>,
}

impl OpenAiChatModel {
    /// Create a chat model with the OpenAI wire dialect
    pub fn new(config: GenerationConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            config,
            transport,
            request_transformer: Arc::new(OpenAiRequestTransformer),
            response_transformer: Arc::new(OpenAiResponseTransformer),
        }
    }

    /// Swap the wire dialect (for compatible providers with quirks)
    pub fn with_transformers(
        mut self,
        request: Arc<dyn RequestTransformer>,
        response: Arc<dyn ResponseTransformer>,
    ) -> Self {
        self.request_transformer = request;
        self.response_transformer = response;
        self
    }

    /// Generation parameters this model submits
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }
}

#[async_trait]
impl ChatModel for OpenAiChatModel {
    async fn invoke(&self, input: PromptInput) -> Result<ChatReply, LlmError> {
        let messages = normalize(&input);
        let body = self.request_transformer.transform_chat(&messages, &self.config)?;

        let mut attempt: u32 = 0;
        loop {
            let request = TransportRequest::post(
                CHAT_COMPLETIONS_PATH,
                body.clone(),
                self.config.timeout,
            );
            match self.transport.request(request).await {
                Ok(response) => {
                    return Ok(ChatReply {
                        content: self.response_transformer.chat_text(&response),
                    });
                }
                Err(error) => {
                    attempt += 1;
                    if attempt > self.config.max_retries {
                        return Err(error);
                    }
                    tracing::warn!(
                        model = %self.config.model,
                        attempt,
                        max_retries = self.config.max_retries,
                        error = %error,
                        "chat completion failed, retrying"
                    );
                }
            }
        }
    }
}
