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

/// Managed database. Its listing meta carries a total but no cursors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Database {
    pub id: String,
    pub date_created: String,
    pub plan: String,
    pub plan_disk: u32,
    pub plan_ram: u32,
    pub plan_vcpus: u32,
    pub plan_replicas: u32,
    pub region: String,
    pub database_engine: String,
    pub database_engine_version: String,
    pub status: String,
    pub label: String,
    pub tag: String,
    pub dbname: String,
    pub host: String,
    pub user: String,
    pub port: String,
}
