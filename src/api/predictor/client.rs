use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::models::{
    AnalyzeRangeForm, AnalyzeRangeResponse, ApiError, PredictSingleForm, PredictSingleResponse,
};
use super::PredictionApi;
use crate::models::{RangeOutcome, RangeRequest, SingleCheckRequest};

/// HTTP client for the fraud prediction backend
pub struct PredictorClient {
    http_client: HttpClient,
    base_url: String,
}

impl PredictorClient {
    pub const PREDICT_SINGLE_PATH: &'static str = "/predict_single";
    pub const ANALYZE_RANGE_PATH: &'static str = "/analyze_range";

    /// Create a client with no request timeout
    pub fn new(base_url: &str) -> Self {
        Self::with_http_client(HttpClient::new(), base_url)
    }

    /// Create a client whose requests fail after `timeout`
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::RequestError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_http_client(http_client, base_url))
    }

    /// Create a client around an existing reqwest client
    pub fn with_http_client(http_client: HttpClient, base_url: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Turn a non-success response into an error, keeping the body for diagnostics
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();

        match status_code {
            500..=599 => {
                warn!("Server error {}: {}", status_code, body_text);
                ApiError::ServerError(status_code, body_text)
            }
            _ => ApiError::HttpError(status_code, body_text),
        }
    }

    /// POST a URL-encoded form and decode the JSON body
    async fn post_form<F, T>(&self, path: &str, form: &F) -> Result<T, ApiError>
    where
        F: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self
            .http_client
            .post(&url)
            .form(form)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl PredictionApi for PredictorClient {
    async fn predict_single(&self, request: &SingleCheckRequest) -> Result<String, ApiError> {
        let form = PredictSingleForm::from(request);
        let response: PredictSingleResponse =
            self.post_form(Self::PREDICT_SINGLE_PATH, &form).await?;
        Ok(response.result)
    }

    async fn analyze_range(&self, request: &RangeRequest) -> Result<RangeOutcome, ApiError> {
        let form = AnalyzeRangeForm::from(request);
        let response: AnalyzeRangeResponse =
            self.post_form(Self::ANALYZE_RANGE_PATH, &form).await?;
        response.into_outcome()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    /// Accept one connection, answer it with a canned response, and hand back the raw request
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });

        (format!("http://{}", address), handle)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 1024];

        loop {
            let read = socket.read(&mut chunk).await.unwrap();
            if read == 0 {
                break;
            }
            buffer.extend_from_slice(&chunk[..read]);

            if let Some(end) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buffer[..end]).to_lowercase();
                let content_length = head
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|value| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buffer.len() >= end + 4 + content_length {
                    break;
                }
            }
        }

        String::from_utf8_lossy(&buffer).to_string()
    }

    fn local_client(base_url: &str) -> PredictorClient {
        let http_client = HttpClient::builder().no_proxy().build().unwrap();
        PredictorClient::with_http_client(http_client, base_url)
    }

    #[tokio::test]
    async fn test_predict_single_posts_form() {
        let (base_url, server) = serve_once("200 OK", r#"{"result": "Fraud Transaction"}"#).await;
        let client = local_client(&base_url);
        let request = SingleCheckRequest::new("M-7", "10.5").unwrap();

        let verdict = client.predict_single(&request).await.unwrap();
        assert_eq!(verdict, "Fraud Transaction");

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /predict_single "));
        assert!(raw.to_lowercase().contains("content-type: application/x-www-form-urlencoded"));
        assert!(raw.ends_with("merchant_id=M-7&amount=10.5"));
    }

    #[tokio::test]
    async fn test_analyze_range_posts_dates() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"error": "No transactions found", "debug_info": "Dataset contains transactions from 2019-01-01 to 2019-12-31"}"#,
        )
        .await;
        let client = local_client(&format!("{}/", base_url));
        let request = RangeRequest::new("2024-01-01", "2024-01-31").unwrap();

        let outcome = client.analyze_range(&request).await.unwrap();
        match outcome {
            RangeOutcome::Rejected(error) => {
                assert_eq!(error.message, "No transactions found");
                assert!(error.debug_info.is_some());
            }
            other => panic!("expected rejection, got {:?}", other),
        }

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /analyze_range "));
        assert!(raw.ends_with("start_date=2024-01-01&end_date=2024-01-31"));
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let (base_url, server) = serve_once("502 Bad Gateway", "upstream down").await;
        let client = local_client(&base_url);
        let request = SingleCheckRequest::new("M1", "1").unwrap();

        let err = client.predict_single(&request).await.unwrap_err();
        assert_eq!(err, ApiError::ServerError(502, "upstream down".to_string()));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let (base_url, server) = serve_once("200 OK", r#"{"verdict": "Safe"}"#).await;
        let client = local_client(&base_url);
        let request = SingleCheckRequest::new("M1", "1").unwrap();

        let err = client.predict_single(&request).await.unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let client = local_client(&format!("http://{}", address));
        let request = RangeRequest::new("2024-01-01", "2024-01-02").unwrap();
        let err = client.analyze_range(&request).await.unwrap_err();
        assert!(matches!(err, ApiError::RequestError(_)));
    }
}
