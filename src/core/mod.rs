//! Core analysis engine.
//!
//! Pipeline per component: split the SFC into blocks, extract declared
//! `data()` keys from the script, extract bound expressions from the
//! template, then walk those expressions into a usage set.
//!
//! ## Module Structure
//!
//! - `analysis`: expression model, usage walker, declared-state extractor
//! - `component`: per-file front end producing `ParsedComponent`
//! - `context`: `CheckContext` (config, file list, lazily parsed components)
//! - `data`: source location types
//! - `file_scanner`: `.vue` discovery honouring includes/ignores
//! - `parsers`: SFC, script, template and binding parsers

pub mod analysis;
pub mod component;
pub mod context;
pub mod data;
pub mod file_scanner;
pub mod parsers;

pub use component::{MarkupBinding, ParsedComponent, SkippedBinding, parse_component};
pub use context::CheckContext;
pub use data::{LineIndex, SourceContext, SourceLocation};
