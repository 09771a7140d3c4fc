//! Generation transport
//!
//! The generation service accepts `{ app, prompt }` and answers with a streamed body in
//! the tagged text-delta encoding understood by [`crate::decoder`]. Transports only move
//! bytes; decoding and job bookkeeping belong to the scheduler.

use crate::catalog::{CatalogItem, Category};
use crate::config::GenerationServiceConfig;
use crate::error::ApiError;
use async_trait::async_trait;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use tokio::sync::mpsc;
use tracing::debug;

/// Raw response body.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, ApiError>> + Send>>;

/// Item description sent to the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDescriptor {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub description: String,
    pub tags: Vec<String>,
    pub skill_context: String,
}

impl From<&CatalogItem> for ItemDescriptor {
    fn from(item: &CatalogItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            category: item.category,
            description: item.description.clone(),
            tags: item.tags.clone(),
            skill_context: item.skill_context.clone(),
        }
    }
}

/// Body of a generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub app: ItemDescriptor,
    pub prompt: String,
}

impl GenerationRequest {
    pub fn new(item: &CatalogItem, prompt: impl Into<String>) -> Self {
        Self {
            app: ItemDescriptor::from(item),
            prompt: prompt.into(),
        }
    }

    /// Both fields are required; the service answers 400 otherwise.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.app.id.trim().is_empty() || self.app.name.trim().is_empty() {
            return Err(ApiError::InvalidRequest(
                "app and prompt are required".to_string(),
            ));
        }
        if self.prompt.trim().is_empty() {
            return Err(ApiError::InvalidRequest(
                "app and prompt are required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Opens one streamed generation per call.
#[async_trait]
pub trait GenerationTransport: Send + Sync {
    /// Send the request and return the response body once headers arrive.
    async fn open(&self, request: GenerationRequest) -> Result<ByteStream, ApiError>;

    /// Transport name for logs
    fn name(&self) -> &str;
}

// Helper function to map HTTP errors to ApiError
fn map_http_error(error: reqwest::Error) -> ApiError {
    if let Some(status) = error.status() {
        ApiError::ProviderRequestFailed(format!("Request failed with status {}: {}", status, error))
    } else if error.is_timeout() {
        ApiError::TransportFailure(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        ApiError::TransportFailure(format!("Connection error: {}", error))
    } else {
        ApiError::TransportFailure(format!("HTTP error: {}", error))
    }
}

pub(crate) fn build_http_client(config: &GenerationServiceConfig) -> Result<Client, ApiError> {
    Client::builder()
        .connect_timeout(config.connect_timeout())
        .timeout(config.request_timeout())
        .build()
        .map_err(|e| ApiError::ProviderError(format!("Failed to create HTTP client: {}", e)))
}

/// HTTP transport streaming the response body.
pub struct HttpGenerationTransport {
    client: Client,
    endpoint: String,
}

impl HttpGenerationTransport {
    pub fn new(config: &GenerationServiceConfig) -> Result<Self, ApiError> {
        Ok(Self {
            client: build_http_client(config)?,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GenerationTransport for HttpGenerationTransport {
    async fn open(&self, request: GenerationRequest) -> Result<ByteStream, ApiError> {
        request.validate()?;

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(map_http_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(match status.as_u16() {
                400 => ApiError::InvalidRequest(error_text),
                _ => ApiError::ProviderRequestFailed(format!(
                    "Request failed with status {}: {}",
                    status, error_text
                )),
            });
        }

        debug!(
            endpoint = %self.endpoint,
            item_id = %request.app.id,
            "Generation stream opened"
        );
        Ok(Box::pin(response.bytes_stream().map(|chunk| chunk.map_err(map_http_error))))
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// A stream opened through [`ChannelTransport`].
///
/// Send chunks (or an error) through `chunks`; dropping it ends the body cleanly.
pub struct OpenedStream {
    pub request: GenerationRequest,
    pub chunks: mpsc::UnboundedSender<Result<Bytes, ApiError>>,
}

impl OpenedStream {
    /// Send one raw chunk. Returns false once the consumer has gone away.
    pub fn send(&self, chunk: impl Into<Bytes>) -> bool {
        self.chunks.send(Ok(chunk.into())).is_ok()
    }

    /// Send a text-delta line for `text`.
    pub fn send_delta(&self, text: &str) -> bool {
        let encoded = serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string());
        self.send(format!("0:{}\n", encoded))
    }

    /// Send the finish message line.
    pub fn send_finish(&self) -> bool {
        self.send("d:{\"finishReason\":\"stop\"}\n")
    }

    /// Break the body with a transport error.
    pub fn send_error(&self, reason: impl Into<String>) -> bool {
        self.chunks
            .send(Err(ApiError::TransportFailure(reason.into())))
            .is_ok()
    }
}

/// In-process loopback transport.
///
/// Every `open` publishes an [`OpenedStream`] on the paired receiver, letting the
/// embedding produce the body by hand.
pub struct ChannelTransport {
    opened: mpsc::UnboundedSender<OpenedStream>,
}

impl ChannelTransport {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<OpenedStream>) {
        let (opened, receiver) = mpsc::unbounded_channel();
        (Self { opened }, receiver)
    }
}

#[async_trait]
impl GenerationTransport for ChannelTransport {
    async fn open(&self, request: GenerationRequest) -> Result<ByteStream, ApiError> {
        request.validate()?;

        let (chunks, receiver) = mpsc::unbounded_channel();
        self.opened
            .send(OpenedStream { request, chunks })
            .map_err(|_| ApiError::TransportFailure("channel transport closed".to_string()))?;

        let body = futures::stream::unfold(receiver, |mut receiver| async move {
            receiver.recv().await.map(|chunk| (chunk, receiver))
        });
        Ok(Box::pin(body))
    }

    fn name(&self) -> &str {
        "channel"
    }
}
