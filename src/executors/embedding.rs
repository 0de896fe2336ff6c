//! Embedding executor with sequential batching.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::LlmError;
use crate::executors::EMBEDDINGS_PATH;
use crate::traits::EmbeddingModel;
use crate::transformers::{
    OpenAiRequestTransformer, OpenAiResponseTransformer, RequestTransformer, ResponseTransformer,
};
use crate::transport::{HttpTransport, TransportRequest};
use crate::types::EmbeddingConfig;

/// Embeddings over an OpenAI-compatible endpoint.
///
/// Inputs are split into contiguous chunks no larger than the configured
/// batch size and issued strictly sequentially, one request per chunk, so
/// results assemble in input order without a merge step. A failing chunk
/// aborts the whole call; embeddings have no side effects to roll back.
pub struct OpenAiEmbeddings {
    config: EmbeddingConfig,
    transport: Arc<dyn HttpTransport>,
    request_transformer: Arc<dyn RequestTransformer>,
    response_transformer: Arc<dyn ResponseTransformer>,
}

impl OpenAiEmbeddings {
    /// Create an embeddings client with the OpenAI wire dialect
    pub fn new(config: EmbeddingConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            config,
            transport,
            request_transformer: Arc::new(OpenAiRequestTransformer),
            response_transformer: Arc::new(OpenAiResponseTransformer),
        }
    }

    /// Embedding parameters this client submits
    pub fn config(&self) -> &EmbeddingConfig {
        &self.config
    }

    /// Newline stripping is the only normalization applied to inputs.
    fn preprocess(&self, text: &str) -> String {
        if self.config.strip_new_lines {
            text.replace('\n', " ")
        } else {
            text.to_string()
        }
    }

    async fn create_embeddings(&self, batch: &[String]) -> Result<Vec<Vec<f32>>, LlmError> {
        let body = self.request_transformer.transform_embedding(batch, &self.config)?;
        let request = TransportRequest::post(EMBEDDINGS_PATH, body, self.config.timeout);
        let response = self.transport.request(request).await?;
        self.response_transformer.embedding_vectors(&response)
    }
}

#[async_trait]
impl EmbeddingModel for OpenAiEmbeddings {
    async fn embed_documents(&self, documents: Vec<String>) -> Result<Vec<Vec<f32>>, LlmError> {
        let inputs: Vec<String> = documents.iter().map(|d| self.preprocess(d)).collect();
        let mut vectors = Vec::with_capacity(inputs.len());
        for batch in inputs.chunks(self.config.effective_batch_size()) {
            tracing::debug!(
                model = %self.config.model,
                batch_len = batch.len(),
                "submitting embeddings batch"
            );
            vectors.extend(self.create_embeddings(batch).await?);
        }
        Ok(vectors)
    }

    async fn embed_query(&self, document: String) -> Result<Vec<f32>, LlmError> {
        self.embed_documents(vec![document])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                LlmError::ParseError("embeddings response contained no vectors".to_string())
            })
    }
}
