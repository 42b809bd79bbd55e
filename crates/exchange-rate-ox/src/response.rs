use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::ExchangeRateRequestError;

const SUCCESS: &str = "success";
const UNKNOWN_ERROR: &str = "Unknown error";

/// A validated `result = "success"` payload from the pair endpoint.
///
/// Decimals are kept as [`Number`] so they render exactly as the upstream sent them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairResponse {
    pub conversion_rate: Number,

    /// Only present when the request carried an amount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_result: Option<Number>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_code: Option<String>,

    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub time_last_update_unix: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_last_update_utc: Option<String>,
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub time_next_update_unix: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_next_update_utc: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms_of_use: Option<String>,
}

/// Converted amount and the rate it was computed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    pub converted_amount: Number,
    pub rate: Number,
}

impl PairResponse {
    /// The converted amount and rate, or a malformed-response error when the
    /// payload carries no `conversion_result`.
    pub fn conversion_result(&self) -> Result<ConversionResult, ExchangeRateRequestError> {
        let converted_amount = self.conversion_result.clone().ok_or_else(|| {
            ExchangeRateRequestError::MalformedResponse(
                "success payload is missing `conversion_result`".to_string(),
            )
        })?;

        Ok(ConversionResult {
            converted_amount,
            rate: self.conversion_rate.clone(),
        })
    }
}

/// The `error-type` code of a failure payload, if the body is one.
pub(crate) fn failure_code(bytes: &[u8]) -> Option<String> {
    let value = serde_json::from_slice::<Value>(bytes).ok()?;
    if value.get("result").and_then(Value::as_str) == Some(SUCCESS) {
        return None;
    }
    value
        .get("error-type")
        .and_then(Value::as_str)
        .map(ToString::to_string)
}

/// Classifies the body of a 200 response.
pub(crate) fn parse_pair_response(bytes: &[u8]) -> Result<PairResponse, ExchangeRateRequestError> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| {
        ExchangeRateRequestError::MalformedResponse(format!(
            "failed to decode JSON: {e}; body: {}",
            String::from_utf8_lossy(bytes)
        ))
    })?;

    let payload = match value {
        Value::Object(payload) => payload,
        other => {
            return Err(ExchangeRateRequestError::MalformedResponse(format!(
                "expected a JSON object, got {other}"
            )));
        }
    };

    if payload.get("result").and_then(Value::as_str) != Some(SUCCESS) {
        let error_type = payload
            .get("error-type")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_ERROR);
        return Err(ExchangeRateRequestError::Api(error_type.to_string()));
    }

    serde_json::from_value(Value::Object(payload))
        .map_err(|e| ExchangeRateRequestError::MalformedResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use serde_json::json;

    fn body(value: &Value) -> Vec<u8> {
        serde_json::to_vec(value).unwrap()
    }

    #[test]
    fn test_success_payload() {
        let bytes = body(&json!({
            "result": "success",
            "documentation": "https://www.exchangerate-api.com/docs",
            "terms_of_use": "https://www.exchangerate-api.com/terms",
            "time_last_update_unix": 1_700_000_000,
            "time_last_update_utc": "Tue, 14 Nov 2023 22:13:20 +0000",
            "base_code": "USD",
            "target_code": "INR",
            "conversion_rate": 83.1,
            "conversion_result": 8310
        }));

        let response = parse_pair_response(&bytes).unwrap();
        assert_eq!(response.base_code.as_deref(), Some("USD"));
        assert_eq!(
            response.time_last_update_unix.map(|t| t.timestamp()),
            Some(1_700_000_000)
        );
        assert!(response.time_next_update_unix.is_none());

        let conversion = response.conversion_result().unwrap();
        assert_eq!(conversion.converted_amount.to_string(), "8310");
        assert_eq!(conversion.rate.to_string(), "83.1");
    }

    #[test]
    fn test_error_payload_carries_error_type() {
        let bytes = body(&json!({"result": "error", "error-type": "unsupported-code"}));
        let err = parse_pair_response(&bytes).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UpstreamApi);
        assert_eq!(err.to_string(), "ExchangeRate API error: unsupported-code");
    }

    #[test]
    fn test_error_payload_without_error_type() {
        let bytes = body(&json!({"result": "error"}));
        let err = parse_pair_response(&bytes).unwrap_err();
        assert!(matches!(err, ExchangeRateRequestError::Api(ref code) if code == "Unknown error"));
    }

    #[test]
    fn test_missing_result_is_api_error() {
        // no `result` at all counts as "not success"
        let bytes = body(&json!({"conversion_rate": 1.0}));
        let err = parse_pair_response(&bytes).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UpstreamApi);
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = parse_pair_response(b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, ExchangeRateRequestError::MalformedResponse(_)));
        assert_eq!(err.kind(), ErrorKind::UpstreamHttp);
    }

    #[test]
    fn test_non_object_is_malformed() {
        let err = parse_pair_response(b"[1, 2, 3]").unwrap_err();
        assert!(matches!(err, ExchangeRateRequestError::MalformedResponse(_)));
    }

    #[test]
    fn test_success_without_rate_is_malformed() {
        let bytes = body(&json!({"result": "success"}));
        let err = parse_pair_response(&bytes).unwrap_err();
        assert!(matches!(err, ExchangeRateRequestError::MalformedResponse(_)));
    }

    #[test]
    fn test_rate_only_payload_has_no_conversion() {
        let bytes = body(&json!({"result": "success", "conversion_rate": 0.92}));
        let response = parse_pair_response(&bytes).unwrap();
        assert!(response.conversion_result.is_none());
        let err = response.conversion_result().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UpstreamHttp);
    }

    #[test]
    fn test_failure_code() {
        let bytes = body(&json!({"result": "error", "error-type": "invalid-key"}));
        assert_eq!(failure_code(&bytes).as_deref(), Some("invalid-key"));
        assert_eq!(failure_code(b"Service Unavailable"), None);
        let bytes = body(&json!({"result": "success", "error-type": "ignored"}));
        assert_eq!(failure_code(&bytes), None);
    }
}
