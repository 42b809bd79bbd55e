use std::time::{Duration, Instant};

use exchange_rate_ox::{ErrorKind, ExchangeRate, ExchangeRateRequestError, PairRequest};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

const API_KEY: &str = "test-key";

fn client_for(server: &MockServer) -> ExchangeRate {
    ExchangeRate::builder()
        .api_key(API_KEY)
        .base_url(format!("{}/v6", server.uri()))
        .build()
}

/// Address of a port nothing is listening on.
fn refused_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/v6")
}

#[tokio::test]
async fn test_convert_builds_uppercased_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v6/test-key/pair/USD/INR/100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": "success",
            "base_code": "USD",
            "target_code": "INR",
            "conversion_rate": 83.1,
            "conversion_result": 8310
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .convert("usd", "inr", 100.0)
        .await
        .unwrap();

    let conversion = response.conversion_result().unwrap();
    assert_eq!(conversion.converted_amount.to_string(), "8310");
    assert_eq!(conversion.rate.to_string(), "83.1");
    assert_eq!(response.target_code.as_deref(), Some("INR"));
}

#[tokio::test]
async fn test_pair_without_amount() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v6/test-key/pair/EUR/GBP"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": "success",
            "conversion_rate": 0.8412
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server).pair("eur", "gbp").await.unwrap();
    assert_eq!(response.conversion_rate.to_string(), "0.8412");
    assert!(response.conversion_result.is_none());
}

#[tokio::test]
async fn test_non_200_is_upstream_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .convert("usd", "eur", 1.0)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UpstreamHttp);
    assert_eq!(err.to_string(), "ExchangeRate API returned status 503");
}

#[tokio::test]
async fn test_non_200_with_failure_body_stays_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "result": "error",
            "error-type": "invalid-key"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .convert("usd", "eur", 1.0)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ExchangeRateRequestError::HttpStatus { status: 403, ref detail } if detail.as_deref() == Some("invalid-key")
    ));
    assert_eq!(err.kind(), ErrorKind::UpstreamHttp);
}

#[tokio::test]
async fn test_api_error_carries_error_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v6/test-key/pair/USD/XYZ/50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": "error",
            "error-type": "unsupported-code"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .convert("usd", "xyz", 50.0)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UpstreamApi);
    assert!(err.to_string().contains("unsupported-code"));
}

#[tokio::test]
async fn test_api_error_without_error_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "error"})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .convert("usd", "eur", 5.0)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "ExchangeRate API error: Unknown error");
}

#[tokio::test]
async fn test_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .convert("usd", "eur", 5.0)
        .await
        .unwrap_err();

    assert!(matches!(err, ExchangeRateRequestError::MalformedResponse(_)));
    assert_eq!(err.kind(), ErrorKind::UpstreamHttp);
}

#[tokio::test]
async fn test_success_missing_conversion_result_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": "success",
            "conversion_rate": 1.09
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .convert("eur", "usd", 10.0)
        .await
        .unwrap_err();

    assert!(matches!(err, ExchangeRateRequestError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let client = ExchangeRate::builder()
        .api_key(API_KEY)
        .base_url(refused_base_url())
        .timeout(Duration::from_secs(5))
        .build();

    let started = Instant::now();
    let err = client.convert("usd", "inr", 100.0).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(err.to_string().starts_with("Network error: "));
    assert!(started.elapsed() < Duration::from_secs(5));
    // the credential lives in the URL path and must not leak into messages
    assert!(!err.to_string().contains(API_KEY));
}

#[tokio::test]
async fn test_timeout_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"result": "success", "conversion_rate": 1.0, "conversion_result": 1.0}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = ExchangeRate::builder()
        .api_key(API_KEY)
        .base_url(format!("{}/v6", server.uri()))
        .timeout(Duration::from_millis(200))
        .build();

    let started = Instant::now();
    let err = client.convert("usd", "eur", 1.0).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(err.is_timeout());
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_repeated_requests_are_identical() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v6/test-key/pair/USD/JPY/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": "success",
            "conversion_rate": 149.52,
            "conversion_result": 448.56
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = PairRequest::new("usd", "jpy", Some(3.0));
    let first = client.send(&request).await.unwrap();
    let second = client.send(&request).await.unwrap();

    assert_eq!(first, second);
}
