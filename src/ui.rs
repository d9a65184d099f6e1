//! src/ui.rs
//!
//! Layout tree used by the terminal surface to place panels.

pub mod node;

pub use node::{Node, Panel, group, leaf};
