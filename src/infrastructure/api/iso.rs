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
use crate::domain::models::{Iso, IsoCreate, PublicIso};
use crate::domain::paging::{ListOptions, Meta};
use crate::shared::Result;
use reqwest::Method;

pub struct IsoService<'a> {
    client: &'a Client,
}

impl<'a> IsoService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self, options: &ListOptions) -> Result<(Vec<Iso>, Meta)> {
        self.client.list("iso", "isos", options).await
    }

    pub async fn get(&self, id: &str) -> Result<Iso> {
        self.client.get(&format!("iso/{id}"), "iso").await
    }

    pub async fn create(&self, req: &IsoCreate) -> Result<Iso> {
        self.client.send_for(Method::POST, "iso", req, "iso").await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&format!("iso/{id}")).await
    }

    pub async fn list_public(&self, options: &ListOptions) -> Result<(Vec<PublicIso>, Meta)> {
        self.client.list("iso-public", "public_isos", options).await
    }
}
