#![cfg_attr(not(test), deny(unsafe_code))]
#![warn(
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::missing_docs_in_private_items
)]

//! Typed tools exposed over the Model Context Protocol.
//!
//! A [`ToolBox`] describes and serves its functions, a [`ToolSet`] routes calls
//! between toolboxes, and [`McpServer`] speaks JSON-RPC on a byte stream.

pub mod error;
pub mod protocol;
pub mod server;
pub mod set;
pub mod tool;

pub use error::*;
pub use protocol::ServerInfo;
pub use server::McpServer;
pub use set::ToolSet;
pub use tool::{FunctionMetadata, ToolBox, parse_arguments, schema_for_type, text_response};

pub use mcp_sdk::types::{CallToolRequest, CallToolResponse, ToolResponseContent};
