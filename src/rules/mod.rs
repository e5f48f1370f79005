//! Rule implementations for vuedata.
//!
//! Each rule takes the `CheckContext` (or the narrower inputs it needs) and
//! returns its own issue type.
//!
//! ## Module Structure
//!
//! - `no_unused_data`: `data()` keys never referenced by the template

pub mod no_unused_data;

pub use no_unused_data::{
    ComponentReport, UnsupportedExpression, check_component, check_unused_data_issues, find_unused,
};
