//! Weather lookup exposed as MCP tools and prompts over JSON-RPC.

pub mod api;
pub mod cli;
pub mod clients;
pub mod core;
pub mod domain;
pub mod infra;
pub mod prompts;
pub mod tools;
