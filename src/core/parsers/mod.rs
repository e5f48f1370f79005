//! Parsers for single-file components.
//!
//! - `sfc`: splits a `.vue` file into top-level blocks
//! - `html`: minimal start-tag reader shared by `sfc` and `template`
//! - `script`: swc parse of the `<script>` block (JS or TS)
//! - `template`: finds markup-bound expression sites in `<template>`
//! - `binding`: parses a binding site into markup expressions

pub mod binding;
pub mod html;
pub mod script;
pub mod sfc;
pub mod template;
