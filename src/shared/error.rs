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

use crate::domain::compose::ComposeError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid argument: {0}")]
    Usage(String),

    #[error("no API key found; set VULTR_API_KEY, pass --api-key or add api-key to the config file")]
    Auth,

    #[error(transparent)]
    Compose(#[from] ComposeError),

    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unable to render output: {0}")]
    Render(String),

    #[error("request cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("unable to decode payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

impl CliError {
    pub fn config_error(context: impl Into<String>) -> Self {
        Self::Config(context.into())
    }

    pub fn usage(context: impl Into<String>) -> Self {
        Self::Usage(context.into())
    }

    pub fn render(context: impl Into<String>) -> Self {
        Self::Render(context.into())
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Whether a failed request may succeed when sent again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message() {
        let err = CliError::api(404, "block storage not found");
        assert_eq!(err.to_string(), "block storage not found (HTTP 404)");
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(CliError::api(429, "slow down").is_retryable());
        assert!(CliError::api(503, "unavailable").is_retryable());
        assert!(!CliError::api(400, "bad request").is_retryable());
        assert!(!CliError::Auth.is_retryable());
        assert!(!CliError::Cancelled.is_retryable());
    }
}
