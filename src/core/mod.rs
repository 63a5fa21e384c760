//! Core types: transport- and weather-agnostic protocol contracts.

pub mod content;
pub mod error;
pub mod mcp;
pub mod prompt;
pub mod request;
pub mod tool;
