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

use super::Client;
use crate::domain::models::{Plan, Region};
use crate::domain::paging::{ListOptions, Meta};
use crate::shared::Result;

/// Public catalogue endpoints; these need no API key.
pub struct RegionService<'a> {
    client: &'a Client,
}

impl<'a> RegionService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self, options: &ListOptions) -> Result<(Vec<Region>, Meta)> {
        self.client.list("regions", "regions", options).await
    }

    pub async fn availability(&self, region: &str) -> Result<Vec<String>> {
        self.client
            .get(&format!("regions/{region}/availability"), "available_plans")
            .await
    }

    pub async fn plans(
        &self,
        plan_type: Option<&str>,
        options: &ListOptions,
    ) -> Result<(Vec<Plan>, Meta)> {
        let filter = plan_type
            .map(|t| vec![("type".to_string(), t.to_string())])
            .unwrap_or_default();
        self.client
            .list_filtered("plans", "plans", options, filter)
            .await
    }
}
