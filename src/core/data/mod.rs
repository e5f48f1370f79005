//! Core data types used across the analysis pipeline.
//!
//! ## Module Structure
//!
//! - `source`: Source code location types (SourceContext, SourceLocation, LineIndex)

pub mod source;

pub use source::{LineIndex, SourceContext, SourceLocation};
