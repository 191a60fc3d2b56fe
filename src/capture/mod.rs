//! Handwriting capture
//!
//! This module provides the drawing surface contract, an in-memory pad
//! implementing it, the listener binding used by the controller, and replay
//! of recorded signatures.

pub mod binding;
pub mod pad;
pub mod replay;
pub mod surface;
pub mod types;

pub use binding::CaptureBinding;
pub use pad::SignaturePad;
pub use replay::{replay_signature, replay_stroke};
pub use surface::{
    ChangeEvent, ChangeReceiver, ChangeSender, DrawingSurface, ListenerId, SharedSurface,
    SurfaceError, SurfaceOptions, SurfaceResult,
};
pub use types::{Point, Signature, SignatureError, Stroke};
