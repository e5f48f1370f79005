//! Model Context Protocol (MCP) server.
//!
//! Exposes the unused-data check to AI coding agents over stdio.
//!
//! ## Module Structure
//!
//! - `server`: tool router and stdio entry point
//! - `types`: tool parameters and JSON results

mod server;
pub mod types;

pub use server::{VuedataMcpServer, run_server};
