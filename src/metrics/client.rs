//! Admin Metrics REST Client
//!
//! HTTP client for the admin API that serves carbon and energy-usage
//! figures. One GET per call, no retries.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, COOKIE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::types::{CarbonRecord, EnergyUsageRecord};
use super::{MetricsError, MetricsSource};

/// Path of the carbon payback endpoint
pub const CARBON_PAYBACK_PATH: &str = "/admin/carbon-payback";
/// Path of the renewable energy usage endpoint
pub const RENEWABLE_ENERGY_PATH: &str = "/admin/renewable-energy";

/// Configuration for the metrics client
#[derive(Debug, Clone)]
pub struct MetricsClientConfig {
    /// Base URL of the admin API (e.g., "http://localhost:5000")
    pub base_url: String,
    /// Session cookie forwarded with every request
    pub session_cookie: Option<String>,
    /// Per-request timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
}

impl Default for MetricsClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            session_cookie: None,
            request_timeout: None,
        }
    }
}

/// Admin API client
pub struct MetricsClient {
    client: Client,
    config: MetricsClientConfig,
}

impl MetricsClient {
    /// Create a new client with the given configuration
    pub fn new(config: MetricsClientConfig) -> Result<Self, MetricsError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(cookie) = &config.session_cookie {
            let value = HeaderValue::from_str(cookie)
                .map_err(|e| MetricsError::InvalidConfig(format!("session cookie: {}", e)))?;
            headers.insert(COOKIE, value);
        }

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(MetricsError::Request)?;

        Ok(Self { client, config })
    }

    /// Full URL for an endpoint path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// GET `path` and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, MetricsError> {
        let url = self.url(path);
        tracing::debug!(url = %url, "GET");

        let response = self.client.get(&url).send().await.map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.map_err(classify)?;
            return Err(MetricsError::ApiError {
                status: status.as_u16(),
                message: text,
            });
        }

        // The timeout also covers reading the body
        let bytes = response.bytes().await.map_err(classify)?;
        serde_json::from_slice(&bytes).map_err(|e| MetricsError::Decode(e.to_string()))
    }
}

fn classify(e: reqwest::Error) -> MetricsError {
    if e.is_timeout() {
        MetricsError::Timeout
    } else if e.is_connect() {
        MetricsError::Unavailable
    } else {
        MetricsError::Request(e)
    }
}

#[async_trait]
impl MetricsSource for MetricsClient {
    async fn carbon_payback(&self) -> Result<Vec<CarbonRecord>, MetricsError> {
        self.get_json(CARBON_PAYBACK_PATH).await
    }

    async fn renewable_energy(&self) -> Result<Vec<EnergyUsageRecord>, MetricsError> {
        self.get_json(RENEWABLE_ENERGY_PATH).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::HeaderMap as AxumHeaders, http::StatusCode, routing::get, Json, Router};

    async fn spawn_upstream(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_with_timeout(base_url: String, timeout: Duration) -> MetricsClient {
        MetricsClient::new(MetricsClientConfig {
            base_url,
            session_cookie: None,
            request_timeout: Some(timeout),
        })
        .unwrap()
    }

    fn client_for(base_url: String) -> MetricsClient {
        MetricsClient::new(MetricsClientConfig {
            base_url,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = MetricsClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:5000");
        assert!(config.session_cookie.is_none());
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = client_for("http://example.test/".to_string());
        assert_eq!(
            client.url(CARBON_PAYBACK_PATH),
            "http://example.test/admin/carbon-payback"
        );
    }

    #[test]
    fn test_invalid_cookie_rejected() {
        let result = MetricsClient::new(MetricsClientConfig {
            session_cookie: Some("bad\ncookie".to_string()),
            ..Default::default()
        });
        assert!(matches!(result, Err(MetricsError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_fetches_both_endpoints() {
        let router = Router::new()
            .route(
                CARBON_PAYBACK_PATH,
                get(|| async {
                    Json(serde_json::json!([
                        {"CarbonPaybackPeriod": 4.0, "TotalCarbonEmission": 2.5},
                        {"CarbonPaybackPeriod": 6.0, "TotalCarbonEmission": 1.5}
                    ]))
                }),
            )
            .route(
                RENEWABLE_ENERGY_PATH,
                get(|| async {
                    Json(serde_json::json!([
                        {"source": "Wind", "totalUsed": 30.0},
                        {"source": "Solar", "totalUsed": 70.0}
                    ]))
                }),
            );
        let client = client_for(spawn_upstream(router).await);

        let carbon = client.carbon_payback().await.unwrap();
        assert_eq!(carbon.len(), 2);
        assert_eq!(carbon[1], CarbonRecord::new(6.0, 1.5));

        let energy = client.renewable_energy().await.unwrap();
        assert_eq!(energy[0].source, "Wind");
        assert_eq!(energy[1].source, "Solar");
    }

    #[tokio::test]
    async fn test_forwards_cookie_and_content_type() {
        let router = Router::new().route(
            CARBON_PAYBACK_PATH,
            get(|headers: AxumHeaders| async move {
                let cookie = headers.get("cookie").and_then(|v| v.to_str().ok());
                let ctype = headers.get("content-type").and_then(|v| v.to_str().ok());
                if cookie == Some("session=abc") && ctype == Some("application/json") {
                    (StatusCode::OK, Json(serde_json::json!([])))
                } else {
                    (StatusCode::UNAUTHORIZED, Json(serde_json::json!([])))
                }
            }),
        );
        let base_url = spawn_upstream(router).await;

        let client = MetricsClient::new(MetricsClientConfig {
            base_url: base_url.clone(),
            session_cookie: Some("session=abc".to_string()),
            request_timeout: None,
        })
        .unwrap();
        assert!(client.carbon_payback().await.unwrap().is_empty());

        let anonymous = client_for(base_url);
        let err = anonymous.carbon_payback().await.unwrap_err();
        assert!(matches!(err, MetricsError::ApiError { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_server_error_is_classified() {
        let router = Router::new().route(
            RENEWABLE_ENERGY_PATH,
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "database down") }),
        );
        let client = client_for(spawn_upstream(router).await);

        match client.renewable_energy().await {
            Err(MetricsError::ApiError { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "database down");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let router = Router::new().route(
            CARBON_PAYBACK_PATH,
            get(|| async { Json(serde_json::json!({"not": "an array"})) }),
        );
        let client = client_for(spawn_upstream(router).await);

        let err = client.carbon_payback().await.unwrap_err();
        assert!(matches!(err, MetricsError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_upstream() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(format!("http://{}", addr));
        let err = client.carbon_payback().await.unwrap_err();
        assert!(matches!(err, MetricsError::Unavailable));
    }

    #[tokio::test]
    async fn test_timeout_before_headers() {
        let router = Router::new().route(
            CARBON_PAYBACK_PATH,
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(serde_json::json!([]))
            }),
        );
        let client =
            client_with_timeout(spawn_upstream(router).await, Duration::from_millis(200));

        let err = client.carbon_payback().await.unwrap_err();
        assert!(matches!(err, MetricsError::Timeout), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_timeout_while_reading_body() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 100\r\n\r\n[",
                )
                .await
                .unwrap();
            socket.flush().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let client = client_with_timeout(format!("http://{}", addr), Duration::from_millis(200));
        let err = client.renewable_energy().await.unwrap_err();
        assert!(matches!(err, MetricsError::Timeout), "got {:?}", err);
    }
}
