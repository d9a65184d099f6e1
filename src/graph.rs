//! src/graph.rs
//!
//! Windowed series, figures, and scale policy.

pub mod config;
pub mod figure;
pub mod scale;
pub mod series;
pub mod window;

/// Re-exports
pub use config::{FigureConfig, Pattern, ScaleConfig};
pub use figure::Figure;
