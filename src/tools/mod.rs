pub mod mcp_router;
pub mod weather;
