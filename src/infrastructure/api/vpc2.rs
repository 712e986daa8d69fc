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
use crate::domain::models::{Vpc2, Vpc2Create, Vpc2Node, Vpc2Nodes, Vpc2Update};
use crate::domain::paging::{ListOptions, Meta};
use crate::shared::Result;
use reqwest::Method;

pub struct Vpc2Service<'a> {
    client: &'a Client,
}

impl<'a> Vpc2Service<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self, options: &ListOptions) -> Result<(Vec<Vpc2>, Meta)> {
        self.client.list("vpc2", "vpcs", options).await
    }

    pub async fn get(&self, id: &str) -> Result<Vpc2> {
        self.client.get(&format!("vpc2/{id}"), "vpc").await
    }

    pub async fn create(&self, req: &Vpc2Create) -> Result<Vpc2> {
        self.client.send_for(Method::POST, "vpc2", req, "vpc").await
    }

    pub async fn update(&self, id: &str, req: &Vpc2Update) -> Result<()> {
        self.client.send(Method::PUT, &format!("vpc2/{id}"), req).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&format!("vpc2/{id}")).await
    }

    pub async fn list_nodes(
        &self,
        id: &str,
        options: &ListOptions,
    ) -> Result<(Vec<Vpc2Node>, Meta)> {
        self.client
            .list(&format!("vpc2/{id}/nodes"), "nodes", options)
            .await
    }

    pub async fn attach_nodes(&self, id: &str, req: &Vpc2Nodes) -> Result<()> {
        self.client
            .send(Method::POST, &format!("vpc2/{id}/nodes/attach"), req)
            .await
    }

    pub async fn detach_nodes(&self, id: &str, req: &Vpc2Nodes) -> Result<()> {
        self.client
            .send(Method::POST, &format!("vpc2/{id}/nodes/detach"), req)
            .await
    }
}
