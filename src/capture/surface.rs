//! Drawing surface trait
//!
//! Defines the contract between the recognition controller and whatever hosts
//! the handwriting canvas (an in-memory pad, a GUI widget, a replayed file).

use crate::capture::types::Signature;
use parking_lot::Mutex as ParkingMutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Errors that can occur while driving a drawing surface
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("Surface not initialized")]
    NotInitialized,

    #[error("Invalid surface options: {0}")]
    InvalidOptions(String),

    #[error("A stroke is already in progress")]
    StrokeInProgress,

    #[error("No stroke in progress")]
    NoActiveStroke,
}

/// Result type for surface operations
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Canvas dimensions and styling handed to `DrawingSurface::init`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SurfaceOptions {
    /// Id of the element hosting the canvas
    pub element_id: String,
    pub width: u32,
    pub height: u32,
    pub background_color: String,
    /// Pen color
    pub color: String,
    /// Pen width in pixels
    pub line_width: u32,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            element_id: "signature".to_string(),
            width: 200,
            height: 200,
            background_color: "#FFFFFF".to_string(),
            color: "#000000".to_string(),
            line_width: 3,
        }
    }
}

impl SurfaceOptions {
    pub fn validate(&self) -> SurfaceResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SurfaceError::InvalidOptions(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.line_width == 0 {
            return Err(SurfaceError::InvalidOptions(
                "line width must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Fired by a surface each time its signature changes.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    /// Full accumulated signature at the moment of the change
    pub signature: Signature,
    /// Surface generation; bumped by every reset
    pub generation: u64,
}

/// Sending half a listener hands to `DrawingSurface::bind_change`
pub type ChangeSender = mpsc::UnboundedSender<ChangeEvent>;

/// Receiving half paired with a `ChangeSender`
pub type ChangeReceiver = mpsc::UnboundedReceiver<ChangeEvent>;

/// Handle identifying one bound change listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(Uuid);

impl ListenerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Surface shared between the input driver and the controller
pub type SharedSurface<S> = Arc<ParkingMutex<S>>;

/// Trait for drawing surfaces
///
/// A surface accumulates strokes and notifies bound listeners once per
/// completed stroke, and once more on `reset`.
pub trait DrawingSurface: Send {
    /// Apply canvas options and start from a blank drawing
    fn init(&mut self, options: &SurfaceOptions) -> SurfaceResult<()>;

    /// Current signature in native format
    fn data(&self) -> Signature;

    /// Clear every stroke and notify bound listeners
    fn reset(&mut self);

    /// Number of resets since init
    fn generation(&self) -> u64;

    /// Register a change listener
    fn bind_change(&mut self, sender: ChangeSender) -> ListenerId;

    /// Remove a change listener; returns false if it was not bound
    fn unbind_change(&mut self, id: ListenerId) -> bool;

    /// Number of currently bound listeners
    fn listener_count(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_match_canvas() {
        let options = SurfaceOptions::default();
        assert_eq!((options.width, options.height), (200, 200));
        assert_eq!(options.background_color, "#FFFFFF");
        assert_eq!(options.color, "#000000");
        assert_eq!(options.line_width, 3);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_options_reject_zero_sizes() {
        let options = SurfaceOptions {
            width: 0,
            ..SurfaceOptions::default()
        };
        assert!(matches!(options.validate(), Err(SurfaceError::InvalidOptions(_))));

        let options = SurfaceOptions {
            line_width: 0,
            ..SurfaceOptions::default()
        };
        assert!(matches!(options.validate(), Err(SurfaceError::InvalidOptions(_))));
    }

    #[test]
    fn test_options_fill_missing_fields() {
        let options: SurfaceOptions = serde_json::from_str(r#"{"lineWidth": 5}"#).unwrap();
        assert_eq!(options.line_width, 5);
        assert_eq!(options.width, 200);
        assert_eq!(options.element_id, "signature");
    }
}
