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
use crate::domain::models::Database;
use crate::domain::paging::{ListOptions, Meta};
use crate::shared::Result;

pub struct DatabaseService<'a> {
    client: &'a Client,
}

impl<'a> DatabaseService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// The returned meta carries a total only.
    pub async fn list(&self, options: &ListOptions) -> Result<(Vec<Database>, Meta)> {
        self.client.list("databases", "databases", options).await
    }

    pub async fn get(&self, id: &str) -> Result<Database> {
        self.client.get(&format!("databases/{id}"), "database").await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&format!("databases/{id}")).await
    }
}
