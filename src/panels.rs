//! src/panels.rs
//!
//! Panels drawn by the terminal surface, and re-exports.

pub mod chart;
pub mod info;
pub mod paragraph;
pub mod readout;
pub mod title;

pub use chart::ChartPanel;
pub use info::InfoPanel;
pub use paragraph::ParagraphPanel;
pub use readout::ReadoutPanel;
pub use title::TitlePanel;
