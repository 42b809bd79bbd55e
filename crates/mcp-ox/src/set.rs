use super::{FunctionMetadata, ToolBox, ToolError};
use futures_util::future::BoxFuture;
use mcp_sdk::types::{CallToolRequest, CallToolResponse};
use std::sync::Arc;

/// A container that holds multiple toolboxes and provides a unified interface
/// for tool discovery and invocation.
#[derive(Clone, Default)]
pub struct ToolSet {
    toolboxes: Vec<Arc<dyn ToolBox>>,
}

impl std::fmt::Debug for ToolSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolSet")
            .field("toolboxes_count", &self.toolboxes.len())
            .field("tools", &self.get_all_tools())
            .finish()
    }
}

impl ToolSet {
    /// Creates a new empty ToolSet.
    pub fn new() -> Self {
        Self {
            toolboxes: Vec::new(),
        }
    }

    /// Adds a toolbox to this set.
    ///
    /// To share one toolbox between several sets, wrap it in an `Arc` first.
    pub fn add_toolbox(&mut self, toolbox: impl ToolBox + 'static) {
        self.toolboxes.push(Arc::new(toolbox));
    }

    /// Adds a toolbox to this set using a builder pattern.
    pub fn with_toolbox(mut self, toolbox: impl ToolBox + 'static) -> Self {
        self.add_toolbox(toolbox);
        self
    }

    /// Returns all tools from all toolboxes in this set.
    pub fn get_all_tools(&self) -> Vec<FunctionMetadata> {
        self.toolboxes
            .iter()
            .flat_map(|toolbox| toolbox.tools())
            .collect()
    }

    /// Finds the toolbox that contains the function with the given name.
    fn find_toolbox_for_function(&self, name: &str) -> Option<&Arc<dyn ToolBox>> {
        self.toolboxes
            .iter()
            .find(|toolbox| toolbox.has_function(name))
    }

    /// Checks if any toolbox in this set has a function with the given name.
    pub fn has_function(&self, name: &str) -> bool {
        self.find_toolbox_for_function(name).is_some()
    }

    /// Invokes a tool function by finding the appropriate toolbox and
    /// delegating the call to it.
    pub async fn call(&self, request: CallToolRequest) -> Result<CallToolResponse, ToolError> {
        let toolbox = self
            .find_toolbox_for_function(&request.name)
            .ok_or_else(|| ToolError::not_found(&request.name))?;

        toolbox.call(request).await
    }
}

impl ToolBox for ToolSet {
    fn tools(&self) -> Vec<FunctionMetadata> {
        self.get_all_tools()
    }

    fn call(&self, request: CallToolRequest) -> BoxFuture<'_, Result<CallToolResponse, ToolError>> {
        Box::pin(async move { ToolSet::call(self, request).await })
    }

    fn has_function(&self, name: &str) -> bool {
        ToolSet::has_function(self, name)
    }
}
