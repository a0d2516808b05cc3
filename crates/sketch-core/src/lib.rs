//! Core scene types for the sketch-to-code engine.
//!
//! This crate owns the read side of the pipeline:
//! - Raw canvas objects as the drawing editor serializes them
//! - Value types (colors, geometry, style)
//! - The normalized, arena-backed scene graph the analyzer walks
//! - Error types

pub mod canvas;
pub mod errors;
pub mod scene;
pub mod types;

pub use canvas::*;
pub use errors::*;
pub use scene::*;
pub use types::*;
