//! HTTP recognition backend
//!
//! Posts the signature as JSON to the recognition server and reads back its
//! plain-text prediction. Only HTTP 200 counts as success.

use crate::capture::types::Signature;
use crate::config::ClientConfig;
use crate::recognizer::backend::{Prediction, RecognitionBackend, RecognitionError, RecognitionResult};
use crate::recognizer::payload::SignaturePayload;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

pub struct HttpRecognizer {
    client: Client,
    endpoint: String,
}

impl HttpRecognizer {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> RecognitionResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RecognitionError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> RecognitionResult<Self> {
        Self::new(config.endpoint.clone(), config.timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl From<reqwest::Error> for RecognitionError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RecognitionError::Timeout
        } else if e.is_body() || e.is_decode() {
            RecognitionError::Body(e.to_string())
        } else {
            RecognitionError::Network(e.to_string())
        }
    }
}

#[async_trait]
impl RecognitionBackend for HttpRecognizer {
    fn name(&self) -> &str {
        "http"
    }

    async fn recognize(&self, signature: &Signature) -> RecognitionResult<Prediction> {
        tracing::debug!(
            "POST {} ({} strokes, {} points)",
            self.endpoint,
            signature.len(),
            signature.point_count()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&SignaturePayload::new(signature))
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(RecognitionError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        Ok(Prediction::new(text))
    }
}
