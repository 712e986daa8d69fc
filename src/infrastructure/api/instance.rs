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
use crate::domain::models::{Instance, InstanceCreate, InstanceReinstall, InstanceUpdate};
use crate::domain::paging::{ListOptions, Meta};
use crate::shared::Result;
use reqwest::Method;

pub struct InstanceService<'a> {
    client: &'a Client,
}

impl<'a> InstanceService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self, options: &ListOptions) -> Result<(Vec<Instance>, Meta)> {
        self.client.list("instances", "instances", options).await
    }

    pub async fn get(&self, id: &str) -> Result<Instance> {
        self.client.get(&format!("instances/{id}"), "instance").await
    }

    pub async fn create(&self, req: &InstanceCreate) -> Result<Instance> {
        self.client
            .send_for(Method::POST, "instances", req, "instance")
            .await
    }

    pub async fn update(&self, id: &str, req: &InstanceUpdate) -> Result<Instance> {
        self.client
            .send_for(Method::PATCH, &format!("instances/{id}"), req, "instance")
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&format!("instances/{id}")).await
    }

    pub async fn start(&self, id: &str) -> Result<()> {
        self.client
            .call(Method::POST, &format!("instances/{id}/start"))
            .await
    }

    pub async fn halt(&self, id: &str) -> Result<()> {
        self.client
            .call(Method::POST, &format!("instances/{id}/halt"))
            .await
    }

    pub async fn reboot(&self, id: &str) -> Result<()> {
        self.client
            .call(Method::POST, &format!("instances/{id}/reboot"))
            .await
    }

    pub async fn reinstall(&self, id: &str, req: &InstanceReinstall) -> Result<Instance> {
        self.client
            .send_for(Method::POST, &format!("instances/{id}/reinstall"), req, "instance")
            .await
    }
}
