//! Unused-data analysis.
//!
//! - `node`: expression node model over swc AST plus Vue filter/iteration nodes
//! - `walker`: usage walker collecting referenced names into a `UsageSet`
//! - `declared`: declared-state extractor for the `data()` option

pub mod declared;
pub mod node;
pub mod walker;

pub use declared::{DeclaredStateKey, STATE_DECLARATION_KEY, extract_declared_state};
pub use node::{ExpressionNode, MarkupExpression};
pub use walker::{GLOBAL_ALLOW_LIST, UsageSet, UsageWalker, chain_root, collect_usages};
