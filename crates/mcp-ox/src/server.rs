use futures_util::stream::{FuturesUnordered, StreamExt};
use mcp_sdk::types::CallToolRequest;
use serde_json::{Value, json};
use std::time::Instant;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::{
    ErrorData, ToolSet,
    protocol::{JSONRPC_VERSION, MCP_PROTOCOL_VERSION, Request, Response, ServerInfo, methods},
};

/// Serves a [`ToolSet`] over newline-delimited JSON-RPC.
///
/// Requests on one connection are handled concurrently and answered in
/// completion order, so a slow tool never holds up the others.
#[derive(Debug, Clone)]
pub struct McpServer {
    info: ServerInfo,
    tools: ToolSet,
}

impl McpServer {
    pub fn new(info: ServerInfo, tools: ToolSet) -> Self {
        Self { info, tools }
    }

    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    /// Reads requests until `reader` is exhausted, then finishes the in-flight
    /// ones before returning.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        log::info!("{} {} ready", self.info.name, self.info.version);

        let mut lines = reader.lines();
        let mut pending = FuturesUnordered::new();
        let mut reading = true;

        while reading || !pending.is_empty() {
            tokio::select! {
                line = lines.next_line(), if reading => match line? {
                    Some(line) if line.trim().is_empty() => {}
                    Some(line) => pending.push(self.handle_line(line)),
                    None => reading = false,
                },
                Some(response) = pending.next(), if !pending.is_empty() => {
                    if let Some(response) = response {
                        write_response(&mut writer, &response).await?;
                    }
                }
            }
        }

        log::info!("input closed, shutting down");
        Ok(())
    }

    /// Parses and handles one frame. Returns `None` for notifications.
    pub async fn handle_line(&self, line: String) -> Option<Response> {
        match serde_json::from_str::<Request>(&line) {
            Ok(request) => self.handle(request).await,
            Err(e) => {
                log::warn!("unparseable frame: {e}");
                Some(Response::error(
                    None,
                    ErrorData::parse_error(format!("Parse error: {e}")),
                ))
            }
        }
    }

    pub async fn handle(&self, request: Request) -> Option<Response> {
        let Some(id) = request.id else {
            log::debug!("notification {}", request.method);
            return None;
        };

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(Response::error(
                Some(id),
                ErrorData::invalid_request(format!(
                    "Unsupported jsonrpc version: {}",
                    request.jsonrpc
                )),
            ));
        }

        let result = match request.method.as_str() {
            methods::INITIALIZE => Ok(self.initialize_result()),
            methods::PING => Ok(json!({})),
            methods::TOOLS_LIST => Ok(json!({ "tools": self.tools.get_all_tools() })),
            methods::TOOLS_CALL => self.call_tool(request.params).await,
            other => Err(ErrorData::method_not_found(other)),
        };

        Some(match result {
            Ok(value) => Response::success(id, value),
            Err(error) => Response::error(Some(id), error),
        })
    }

    fn initialize_result(&self) -> Value {
        json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "capabilities": { "tools": {} },
            "serverInfo": self.info,
        })
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, ErrorData> {
        let request: CallToolRequest = serde_json::from_value(params.unwrap_or(Value::Null))
            .map_err(|e| ErrorData::invalid_params(format!("Invalid tools/call params: {e}")))?;

        let name = request.name.clone();
        let started = Instant::now();
        let outcome = self.tools.call(request).await;
        log::info!(
            "tools/call {name} {} in {:?}",
            if outcome.is_ok() { "succeeded" } else { "failed" },
            started.elapsed()
        );

        let response = outcome.map_err(ErrorData::from)?;
        serde_json::to_value(response).map_err(|e| ErrorData::internal_error(e.to_string()))
    }
}

async fn write_response<W: AsyncWrite + Unpin>(
    writer: &mut W,
    response: &Response,
) -> std::io::Result<()> {
    let mut frame = serde_json::to_vec(response)?;
    frame.push(b'\n');
    writer.write_all(&frame).await?;
    writer.flush().await
}
