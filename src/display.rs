//! Prediction display
//!
//! Holds the text shown to the user and decides which recognition responses
//! are allowed to replace it. State changes are published on a
//! `tokio::sync::watch` channel so front ends can follow them.

use crate::recognizer::backend::{Prediction, RecognitionResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// How out-of-order responses are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseOrdering {
    /// Discard a response older than the one already shown
    #[default]
    LatestRequest,
    /// Show every response in arrival order
    LastResponse,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "camelCase")]
pub enum DisplayStatus {
    #[default]
    Idle,
    Pending,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayState {
    /// Raw text of the last accepted prediction
    pub text: String,
    pub status: DisplayStatus,
    /// Sequence number of the response that last changed this state
    pub last_sequence: u64,
    pub updated_at: Option<DateTime<Utc>>,
    /// Responses below this sequence predate the last reset
    #[serde(skip)]
    floor: u64,
}

pub struct ResultDisplay {
    target_id: String,
    state: watch::Sender<DisplayState>,
}

impl ResultDisplay {
    pub const DEFAULT_TARGET: &'static str = "predicted_char";

    pub fn new(target_id: impl Into<String>) -> Self {
        let (state, _) = watch::channel(DisplayState::default());
        Self {
            target_id: target_id.into(),
            state,
        }
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn snapshot(&self) -> DisplayState {
        self.state.borrow().clone()
    }

    pub fn text(&self) -> String {
        self.state.borrow().text.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.state.subscribe()
    }

    pub fn mark_pending(&self, sequence: u64) {
        self.state.send_if_modified(|state| {
            if sequence < state.floor {
                return false;
            }
            state.status = DisplayStatus::Pending;
            true
        });
    }

    /// Apply the outcome of request `sequence`. Returns false if discarded.
    ///
    /// Failures never touch the text; they only flip the status.
    pub fn apply(
        &self,
        sequence: u64,
        result: RecognitionResult<Prediction>,
        ordering: ResponseOrdering,
    ) -> bool {
        self.state.send_if_modified(|state| {
            if sequence < state.floor {
                return false;
            }
            if ordering == ResponseOrdering::LatestRequest && sequence < state.last_sequence {
                return false;
            }

            match result {
                Ok(prediction) => {
                    state.text = prediction.into_text();
                    state.status = DisplayStatus::Ready;
                }
                Err(e) => {
                    state.status = DisplayStatus::Failed(e.to_string());
                }
            }
            state.last_sequence = sequence;
            state.updated_at = Some(Utc::now());
            true
        })
    }

    /// Empty the display and reject every response issued before `floor`
    pub fn clear(&self, floor: u64) {
        self.state.send_modify(|state| {
            state.text.clear();
            state.status = DisplayStatus::Idle;
            state.last_sequence = 0;
            state.updated_at = Some(Utc::now());
            state.floor = floor;
        });
        tracing::debug!("Display '{}' cleared", self.target_id);
    }
}

impl Default for ResultDisplay {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TARGET)
    }
}
