//! vuedata - dead-state detection for Vue single-file components
//!
//! vuedata is a CLI tool and library that reports keys returned by a Vue
//! component's `data()` function which the component's own `<template>`
//! never references.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands and reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Component parsing and template expression analysis
//! - `issues`: Issue type definitions and reporting
//! - `mcp`: Model Context Protocol server implementation
//! - `rules`: Detection rules

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod mcp;
pub mod rules;
