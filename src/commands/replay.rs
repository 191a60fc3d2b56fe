//! Stroke-by-stroke replay through a recognition controller

use crate::capture::pad::SignaturePad;
use crate::capture::replay::replay_stroke;
use crate::capture::types::Signature;
use crate::config::ClientConfig;
use crate::controller::RecognitionController;
use crate::display::DisplayState;
use crate::recognizer::RecognitionBackend;
use parking_lot::Mutex as ParkingMutex;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Display state observed after one replayed stroke
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayStep {
    pub stroke: usize,
    pub state: DisplayState,
}

/// Replay `signature`, waiting for each stroke's response before the next.
pub async fn replay(
    signature: &Signature,
    backend: Arc<dyn RecognitionBackend>,
    config: &ClientConfig,
    pacing: Duration,
) -> anyhow::Result<Vec<ReplayStep>> {
    let surface = Arc::new(ParkingMutex::new(SignaturePad::new()));
    let controller = RecognitionController::new(surface.clone(), backend, config)?;
    let wait = config.timeout() + Duration::from_secs(1);

    let mut steps = Vec::with_capacity(signature.len());
    for stroke in signature.strokes() {
        let fired = {
            let mut pad = surface.lock();
            replay_stroke(&mut pad, stroke)?
        };
        if !fired {
            continue;
        }

        let drawn = steps.len() + 1;
        if !controller.settle(drawn as u64, wait).await {
            tracing::warn!("No response for stroke {} within {:?}", drawn, wait);
        }
        steps.push(ReplayStep {
            stroke: drawn,
            state: controller.display(),
        });

        if !pacing.is_zero() {
            tokio::time::sleep(pacing).await;
        }
    }

    controller.dispose();
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::DisplayStatus;
    use crate::recognizer::{Prediction, RecognitionError, RecognitionResult};
    use async_trait::async_trait;

    struct StrokeCounter;

    #[async_trait]
    impl RecognitionBackend for StrokeCounter {
        fn name(&self) -> &str {
            "counter"
        }

        async fn recognize(&self, signature: &Signature) -> RecognitionResult<Prediction> {
            match signature.len() {
                2 => Err(RecognitionError::Status(500)),
                n => Ok(Prediction::new(format!("{n}"))),
            }
        }
    }

    #[tokio::test]
    async fn test_replay_reports_each_stroke() {
        let signature = Signature::from_json(
            r#"[{"x":[1,2],"y":[1,2]},{"x":[],"y":[]},{"x":[3],"y":[3]},{"x":[4,5],"y":[4,5]}]"#,
        )
        .unwrap();

        let steps = replay(
            &signature,
            Arc::new(StrokeCounter),
            &ClientConfig::default(),
            Duration::ZERO,
        )
        .await
        .unwrap();

        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].state.text, "1");
        assert_eq!(steps[1].state.text, "1");
        assert!(matches!(steps[1].state.status, DisplayStatus::Failed(_)));
        assert_eq!(steps[2].state.text, "3");
        assert_eq!(steps[2].stroke, 3);
    }
}
