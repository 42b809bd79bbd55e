use futures_util::future::BoxFuture;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

use exchange_rate_ox::{CurrencyCode, ExchangeRate, ExchangeRateRequestError};
use mcp_ox::{
    CallToolRequest, CallToolResponse, ErrorData, FunctionMetadata, ToolBox, ToolError,
    parse_arguments, text_response,
};

pub const TOOL_NAME: &str = "convert_currency";

const TOOL_DESCRIPTION: &str = "Convert an amount from one currency to another. \
     Example: convert_currency(100, \"USD\", \"INR\")";

/// Arguments of the `convert_currency` tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConvertCurrencyArgs {
    /// Amount of money to convert
    pub amount: f64,
    /// Currency code to convert from, e.g. "USD"
    pub from_currency: String,
    /// Currency code to convert to, e.g. "INR"
    pub to_currency: String,
}

/// A completed conversion. Displays as `100 USD = 8310 INR (Rate: 83.1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub amount: f64,
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub converted_amount: Number,
    pub rate: Number,
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} = {} {} (Rate: {})",
            self.amount, self.from, self.converted_amount, self.to, self.rate
        )
    }
}

/// The `convert_currency` tool: one upstream call per invocation, no state.
#[derive(Debug, Clone)]
pub struct ConversionTool {
    client: ExchangeRate,
}

impl ConversionTool {
    pub fn new(client: ExchangeRate) -> Self {
        Self { client }
    }

    pub async fn convert(
        &self,
        amount: f64,
        from_currency: &str,
        to_currency: &str,
    ) -> Result<Conversion, ExchangeRateRequestError> {
        let from = CurrencyCode::new(from_currency);
        let to = CurrencyCode::new(to_currency);

        let response = self.client.convert(from.clone(), to.clone(), amount).await?;
        let result = response.conversion_result()?;

        Ok(Conversion {
            amount,
            from,
            to,
            converted_amount: result.converted_amount,
            rate: result.rate,
        })
    }

    /// Runs the conversion and renders it for the client. Every classified
    /// failure becomes an `INTERNAL_ERROR` carrying the error's message.
    pub async fn invoke(
        &self,
        amount: f64,
        from_currency: &str,
        to_currency: &str,
    ) -> Result<CallToolResponse, ErrorData> {
        match self.convert(amount, from_currency, to_currency).await {
            Ok(conversion) => Ok(text_response(conversion.to_string())),
            Err(error) => {
                log::warn!(
                    "conversion {from_currency} -> {to_currency} failed ({}): {error}",
                    error.kind()
                );
                Err(ErrorData::internal_error(error.to_string()))
            }
        }
    }
}

impl ToolBox for ConversionTool {
    fn tools(&self) -> Vec<FunctionMetadata> {
        vec![FunctionMetadata::for_type::<ConvertCurrencyArgs>(
            TOOL_NAME,
            TOOL_DESCRIPTION,
        )]
    }

    fn call(&self, request: CallToolRequest) -> BoxFuture<'_, Result<CallToolResponse, ToolError>> {
        Box::pin(async move {
            if request.name != TOOL_NAME {
                return Err(ToolError::not_found(request.name));
            }
            let args: ConvertCurrencyArgs = parse_arguments(&request)?;
            self.invoke(args.amount, &args.from_currency, &args.to_currency)
                .await
                .map_err(|error| ToolError::execution(TOOL_NAME, error))
        })
    }

    fn has_function(&self, name: &str) -> bool {
        name == TOOL_NAME
    }
}
