use futures_util::future::BoxFuture;
use mcp_sdk::types::{CallToolRequest, CallToolResponse, ToolResponseContent};
use schemars::{JsonSchema, generate::SchemaSettings};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::sync::Arc;

use crate::ToolError;

/// Metadata for a tool function, in the shape `tools/list` reports it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FunctionMetadata {
    /// Name of the function
    pub name: String,

    /// Optional description of what the function does
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// JSON schema for the function's input parameters
    pub input_schema: Value,
}

impl FunctionMetadata {
    /// Metadata whose input schema is derived from `T`.
    pub fn for_type<T: JsonSchema>(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
            input_schema: schema_for_type::<T>(),
        }
    }
}

/// Trait for objects that provide tool functionality.
///
/// A toolbox lists the functions it serves and handles calls addressed to them.
/// Calls are independent: implementations hold no per-call state, so the server
/// may run any number of them concurrently.
pub trait ToolBox: Send + Sync + 'static {
    /// Returns the functions provided by this toolbox.
    fn tools(&self) -> Vec<FunctionMetadata>;

    /// Invokes a tool function with the given call parameters.
    fn call(&self, request: CallToolRequest) -> BoxFuture<'_, Result<CallToolResponse, ToolError>>;

    /// Checks if this toolbox has a function with the given name.
    fn has_function(&self, name: &str) -> bool {
        self.tools().iter().any(|func| func.name == name)
    }
}

impl<T: ToolBox + ?Sized> ToolBox for Arc<T> {
    fn tools(&self) -> Vec<FunctionMetadata> {
        self.as_ref().tools()
    }

    fn call(&self, request: CallToolRequest) -> BoxFuture<'_, Result<CallToolResponse, ToolError>> {
        self.as_ref().call(request)
    }

    fn has_function(&self, name: &str) -> bool {
        self.as_ref().has_function(name)
    }
}

/// Deserializes the call arguments into `T`. Missing arguments are read as `{}`.
pub fn parse_arguments<T: DeserializeOwned>(request: &CallToolRequest) -> Result<T, ToolError> {
    let arguments = request
        .arguments
        .clone()
        .unwrap_or_else(|| Value::Object(Default::default()));
    serde_json::from_value(arguments).map_err(|e| ToolError::input_deserialization(&request.name, e))
}

/// A successful result holding a single text block.
pub fn text_response(text: impl Into<String>) -> CallToolResponse {
    CallToolResponse {
        content: vec![ToolResponseContent::Text { text: text.into() }],
        meta: None,
        is_error: None,
    }
}

/// Generates a JSON schema for the given type using schemars.
///
/// # Panics
///
/// Panics if the schema cannot be serialized to JSON.
#[must_use]
pub fn schema_for_type<T: JsonSchema>() -> Value {
    let settings = SchemaSettings::draft2020_12().with(|s| {
        s.inline_subschemas = true;
        s.meta_schema = None;
    });
    let generator = schemars::generate::SchemaGenerator::new(settings);
    let root_schema = generator.into_root_schema_for::<T>();
    let mut schema_value =
        serde_json::to_value(root_schema).expect("Failed to serialize schema to JSON");

    // Remove the title field if present
    if let Some(obj) = schema_value.as_object_mut() {
        obj.remove("title");
    }

    schema_value
}
