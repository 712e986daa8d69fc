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
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cluster {
    pub id: String,
    pub label: String,
    pub date_created: String,
    pub cluster_subnet: String,
    pub service_subnet: String,
    pub ip: String,
    pub endpoint: String,
    pub version: String,
    pub region: String,
    pub status: String,
    pub ha_controlplanes: bool,
    pub firewall_group_id: String,
    pub node_pools: Vec<NodePool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodePool {
    pub id: String,
    pub date_created: String,
    pub date_updated: String,
    pub label: String,
    pub tag: String,
    pub plan: String,
    pub status: String,
    pub node_quantity: u32,
    pub min_nodes: u32,
    pub max_nodes: u32,
    pub auto_scaler: bool,
    pub labels: BTreeMap<String, String>,
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub date_created: String,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterCreate {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,
    pub region: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ha_controlplanes: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_firewall: Option<bool>,
    pub node_pools: Vec<NodePoolReq>,
}

/// Node pool request, also the target of the `--node-pools` compound flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodePoolReq {
    pub node_quantity: u32,
    pub label: String,
    pub plan: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scaler: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_nodes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_nodes: Option<u32>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterUpdate {
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodePoolUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scaler: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_nodes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_nodes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeReq {
    pub upgrade_version: String,
}
