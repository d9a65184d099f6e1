//! src/stream.rs
//!
//! Reading, splitting, and routing input lines.

pub mod engine;
pub mod format;
pub mod source;

/// Re-exports
pub use engine::StreamEngine;
pub use format::FormatMode;
pub use source::{InputSource, LineSource};
