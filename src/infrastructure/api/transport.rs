// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::infrastructure::constants::{
    API_BASE_URL, REQUEST_TIMEOUT_SECS, RETRY_MAX_DELAY_MS, RETRY_MAX_TIMES, RETRY_MIN_DELAY_MS,
};
use crate::shared::{CancelToken, CliError, Result};
use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::Method;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// One request against the control-plane API. `path` is relative to the
/// base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// The seam between resource services and the network. Returns the raw
/// response body of a successful call.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Vec<u8>>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: String,
}

pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    cancel: CancelToken,
    max_retries: usize,
    min_delay: Duration,
    max_delay: Duration,
}

impl HttpTransport {
    pub fn new(api_key: impl Into<String>, cancel: CancelToken) -> Result<Self> {
        Self::with_base_url(API_BASE_URL, api_key, cancel)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        cancel: CancelToken,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self {
            http,
            base_url,
            api_key: api_key.into(),
            cancel,
            max_retries: RETRY_MAX_TIMES,
            min_delay: Duration::from_millis(RETRY_MIN_DELAY_MS),
            max_delay: Duration::from_millis(RETRY_MAX_DELAY_MS),
        })
    }

    pub fn with_retry(mut self, max_retries: usize, min_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.min_delay = min_delay;
        self.max_delay = self.max_delay.max(min_delay);
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send_once(&self, request: &ApiRequest) -> Result<Vec<u8>> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(CliError::Cancelled),
            result = self.execute(request) => result,
        }
    }

    async fn execute(&self, request: &ApiRequest) -> Result<Vec<u8>> {
        debug!(method = %request.method, path = %request.path, "sending request");

        let mut builder = self
            .http
            .request(request.method.clone(), self.url(&request.path))
            .header(USER_AGENT, concat!("vultr-cli/", env!("CARGO_PKG_VERSION")));

        // Catalogue endpoints are public and run without a key.
        if !self.api_key.is_empty() {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", self.api_key));
        }

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = bytes.len(), "response received");

        if status.is_success() {
            return Ok(bytes.to_vec());
        }

        let message = serde_json::from_slice::<ErrorBody>(&bytes)
            .ok()
            .map(|b| b.error)
            .filter(|m| !m.is_empty())
            .or_else(|| {
                let text = String::from_utf8_lossy(&bytes).trim().to_string();
                (!text.is_empty()).then_some(text)
            })
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());

        Err(CliError::api(status.as_u16(), message))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Vec<u8>> {
        // Only reads are idempotent enough to resend.
        if request.method != Method::GET || self.max_retries == 0 {
            return self.send_once(&request).await;
        }

        let backoff = ExponentialBuilder::default()
            .with_min_delay(self.min_delay)
            .with_max_delay(self.max_delay)
            .with_max_times(self.max_retries);

        (|| async { self.send_once(&request).await })
            .retry(backoff)
            .when(CliError::is_retryable)
            .notify(|err: &CliError, delay: Duration| {
                warn!(path = %request.path, ?delay, "retrying request: {err}");
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join() {
        let transport =
            HttpTransport::with_base_url("http://localhost:1234/v2", "k", CancelToken::new()).unwrap();
        assert_eq!(transport.url("blocks"), "http://localhost:1234/v2/blocks");
        assert_eq!(transport.url("/blocks/x"), "http://localhost:1234/v2/blocks/x");
    }

    #[tokio::test]
    async fn test_cancelled_before_send() {
        let cancel = CancelToken::new();
        cancel.cancel();
        // Port 9 (discard) is never answered; cancellation must win the race.
        let transport = HttpTransport::with_base_url("http://127.0.0.1:9/v2/", "k", cancel)
            .unwrap()
            .with_retry(0, Duration::from_millis(1));

        let err = transport
            .send(ApiRequest::new(Method::GET, "account"))
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Cancelled));
    }
}
