#![cfg_attr(not(test), deny(unsafe_code))]
#![warn(
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::missing_docs_in_private_items
)]
#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

//! Currency conversion exposed as a single MCP tool, `convert_currency`.
//!
//! ```no_run
//! use currency_ox::ConversionTool;
//! use exchange_rate_ox::ExchangeRate;
//!
//! # async fn run() -> Result<(), mcp_ox::ErrorData> {
//! let tool = ConversionTool::new(ExchangeRate::new("YOUR_KEY_HERE"));
//! let response = tool.invoke(100.0, "usd", "inr").await?;
//! # let _ = response;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod tool;

pub use config::Config;
pub use tool::{Conversion, ConversionTool, ConvertCurrencyArgs, TOOL_NAME};

/// Name reported to MCP clients during `initialize`.
pub const SERVER_NAME: &str = "Currency Converter MCP Server";
