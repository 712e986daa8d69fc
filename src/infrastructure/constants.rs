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

/// API endpoint
pub const API_BASE_URL: &str = "https://api.vultr.com/v2/";

/// Environment variable holding the bearer credential
pub const API_KEY_ENV: &str = "VULTR_API_KEY";

/// Configuration file name, relative to the home directory
pub const DEFAULT_CONFIG_FILE: &str = ".vultr-cli.yaml";

/// Paging defaults
pub const DEFAULT_PER_PAGE: u32 = 100;
pub const MAX_PER_PAGE: u32 = 500;

/// Request retry settings
pub const RETRY_MAX_TIMES: usize = 3;
pub const RETRY_MIN_DELAY_MS: u64 = 500;
pub const RETRY_MAX_DELAY_MS: u64 = 5_000;
pub const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Table output markers
pub const EMPTY_CELL: &str = "---";
pub const PAGING_SEPARATOR: &str = "======================================";
pub const BLOCK_SEPARATOR: &str = "---------------------------";

/// Kubeconfig output permissions
pub const KUBECONFIG_FILE_MODE: u32 = 0o600;
pub const KUBECONFIG_DIR_MODE: u32 = 0o755;

/// Query parameter names used for pagination
pub const QUERY_CURSOR: &str = "cursor";
pub const QUERY_PER_PAGE: &str = "per_page";
