//! Character recognition
//!
//! The backend seam, the JSON payload sent to the recognition server, and the
//! reqwest-based HTTP backend.

pub mod backend;
pub mod http;
pub mod payload;

pub use backend::{Prediction, RecognitionBackend, RecognitionError, RecognitionResult};
pub use http::HttpRecognizer;
pub use payload::SignaturePayload;
