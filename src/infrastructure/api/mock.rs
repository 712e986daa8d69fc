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

//! In-memory [`Transport`] that answers from canned responses and records
//! every request it receives.

use super::transport::{ApiRequest, Transport};
use crate::shared::{CliError, Result};
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone)]
enum Reply {
    Json(Value),
    Empty,
    Error { status: u16, message: String },
}

#[derive(Debug, Default)]
pub struct MockTransport {
    routes: Mutex<Vec<(Method, String, Reply)>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(self, method: Method, path: &str, body: Value) -> Self {
        self.route(method, path, Reply::Json(body))
    }

    pub fn with_empty(self, method: Method, path: &str) -> Self {
        self.route(method, path, Reply::Empty)
    }

    pub fn with_error(self, method: Method, path: &str, status: u16, message: &str) -> Self {
        self.route(
            method,
            path,
            Reply::Error {
                status,
                message: message.to_string(),
            },
        )
    }

    fn route(self, method: Method, path: &str, reply: Reply) -> Self {
        lock(&self.routes).push((method, path.to_string(), reply));
        self
    }

    /// Every request sent so far, oldest first.
    pub fn requests(&self) -> Vec<ApiRequest> {
        lock(&self.requests).clone()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        lock(&self.requests).last().cloned()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<Vec<u8>> {
        let reply = lock(&self.routes)
            .iter()
            .rev()
            .find(|(m, p, _)| *m == request.method && *p == request.path)
            .map(|(_, _, reply)| reply.clone());
        let (method, path) = (request.method.clone(), request.path.clone());
        lock(&self.requests).push(request);

        match reply {
            Some(Reply::Json(body)) => Ok(serde_json::to_vec(&body)?),
            Some(Reply::Empty) => Ok(Vec::new()),
            Some(Reply::Error { status, message }) => Err(CliError::api(status, message)),
            None => Err(CliError::api(404, format!("no mock response for {method} {path}"))),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_records_and_replies() {
        let mock = MockTransport::new()
            .with_json(Method::GET, "account", json!({"account": {"name": "a"}}))
            .with_error(Method::DELETE, "blocks/x", 404, "block not found");

        let body = mock
            .send(ApiRequest::new(Method::GET, "account"))
            .await
            .unwrap();
        assert_eq!(body, br#"{"account":{"name":"a"}}"#.to_vec());

        let err = mock
            .send(ApiRequest::new(Method::DELETE, "blocks/x"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "block not found (HTTP 404)");

        assert_eq!(mock.requests().len(), 2);
        assert_eq!(mock.last_request().unwrap().path, "blocks/x");
    }

    #[tokio::test]
    async fn test_unrouted_request() {
        let mock = MockTransport::new();
        let err = mock
            .send(ApiRequest::new(Method::GET, "plans"))
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Api { status: 404, .. }));
    }
}
