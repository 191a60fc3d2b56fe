//! One-shot recognition of a recorded signature

use crate::capture::types::Signature;
use crate::config::ClientConfig;
use crate::recognizer::{HttpRecognizer, Prediction, RecognitionBackend};
use anyhow::Context;
use std::path::Path;

pub fn load_signature(path: &Path) -> anyhow::Result<Signature> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read signature file {}", path.display()))?;
    let signature = Signature::from_json(&content)
        .with_context(|| format!("Failed to parse signature file {}", path.display()))?;

    tracing::info!(
        "Loaded {} strokes ({} points) from {}",
        signature.len(),
        signature.point_count(),
        path.display()
    );
    Ok(signature)
}

/// Post the whole signature once and return the prediction
pub async fn recognize_file(input: &Path, config: &ClientConfig) -> anyhow::Result<Prediction> {
    let signature = load_signature(input)?;
    let recognizer = HttpRecognizer::from_config(config)?;

    let prediction = recognizer
        .recognize(&signature)
        .await
        .with_context(|| format!("Recognition via {} failed", recognizer.endpoint()))?;

    tracing::info!("Predicted {:?}", prediction.as_str());
    Ok(prediction)
}
