pub mod env;
pub mod error;
pub mod exposure;
pub mod mcp_api;
pub mod redis;
pub mod store;
