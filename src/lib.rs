//! Hanzi Sketch - handwritten character capture for a remote recognizer.
//!
//! Strokes drawn on a drawing surface are sent, one request per completed
//! stroke, to a recognition server; its plain-text answer is shown in a
//! result display.

pub mod capture;
pub mod cli;
pub mod commands;
pub mod config;
pub mod controller;
pub mod display;
pub mod recognizer;

pub use capture::{DrawingSurface, Point, Signature, SignaturePad, Stroke, SurfaceOptions};
pub use config::ClientConfig;
pub use controller::RecognitionController;
pub use display::{DisplayState, DisplayStatus, ResponseOrdering, ResultDisplay};
pub use recognizer::{HttpRecognizer, Prediction, RecognitionBackend, RecognitionError};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging. `RUST_LOG` takes precedence over `verbose`.
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "hanzi_sketch=debug"
    } else {
        "hanzi_sketch=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
