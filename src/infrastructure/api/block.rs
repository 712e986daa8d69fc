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
use crate::domain::models::{
    BlockStorage, BlockStorageAttach, BlockStorageCreate, BlockStorageDetach, BlockStorageUpdate,
};
use crate::domain::paging::{ListOptions, Meta};
use crate::shared::Result;
use reqwest::Method;

pub struct BlockStorageService<'a> {
    client: &'a Client,
}

impl<'a> BlockStorageService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self, options: &ListOptions) -> Result<(Vec<BlockStorage>, Meta)> {
        self.client.list("blocks", "blocks", options).await
    }

    pub async fn get(&self, id: &str) -> Result<BlockStorage> {
        self.client.get(&format!("blocks/{id}"), "block").await
    }

    pub async fn create(&self, req: &BlockStorageCreate) -> Result<BlockStorage> {
        self.client.send_for(Method::POST, "blocks", req, "block").await
    }

    /// Covers both `label` and `resize`.
    pub async fn update(&self, id: &str, req: &BlockStorageUpdate) -> Result<()> {
        self.client.send(Method::PATCH, &format!("blocks/{id}"), req).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&format!("blocks/{id}")).await
    }

    pub async fn attach(&self, id: &str, req: &BlockStorageAttach) -> Result<()> {
        self.client.send(Method::POST, &format!("blocks/{id}/attach"), req).await
    }

    pub async fn detach(&self, id: &str, req: &BlockStorageDetach) -> Result<()> {
        self.client.send(Method::POST, &format!("blocks/{id}/detach"), req).await
    }
}
