//! CLI command handlers

pub mod recognize;
pub mod replay;

pub use recognize::{load_signature, recognize_file};
pub use replay::{replay, ReplayStep};
