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

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadBalancer {
    pub id: String,
    pub date_created: String,
    pub region: String,
    pub label: String,
    pub status: String,
    pub ipv4: String,
    pub ipv6: String,
    pub nodes: u32,
    pub generic_info: GenericInfo,
    pub health_check: HealthCheck,
    pub has_ssl: bool,
    pub http2: bool,
    pub forwarding_rules: Vec<ForwardingRule>,
    pub firewall_rules: Vec<LbFirewallRule>,
    pub instances: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenericInfo {
    pub balancing_algorithm: String,
    pub ssl_redirect: bool,
    pub sticky_sessions: StickySessions,
    pub proxy_protocol: bool,
    pub vpc: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StickySessions {
    pub cookie_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthCheck {
    pub protocol: String,
    pub port: u32,
    pub path: String,
    pub check_interval: u32,
    pub response_timeout: u32,
    pub unhealthy_threshold: u32,
    pub healthy_threshold: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheckReq {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_interval: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_timeout: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unhealthy_threshold: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub healthy_threshold: Option<u32>,
}

impl HealthCheckReq {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Forwarding rule, both as returned and as composed from
/// `--forwarding-rules`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForwardingRule {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub frontend_protocol: String,
    pub frontend_port: u32,
    pub backend_protocol: String,
    pub backend_port: u32,
}

/// Load balancer firewall rule, both as returned and as composed from
/// `--firewall-rules`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LbFirewallRule {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub port: u32,
    pub source: String,
    pub ip_type: String,
}

/// Create and update share one request shape; `region` is only sent on
/// create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalancerReq {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balancing_algorithm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_redirect: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http2: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_protocol: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check: Option<HealthCheckReq>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticky_session: Option<StickySessions>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub forwarding_rules: Vec<ForwardingRule>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub firewall_rules: Vec<LbFirewallRule>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub instances: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpc: Option<String>,
}
