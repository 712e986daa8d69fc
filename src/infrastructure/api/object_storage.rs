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
    ObjectStorage, ObjectStorageCluster, ObjectStorageCreate, ObjectStorageTier,
    ObjectStorageUpdate, S3Keys,
};
use crate::domain::paging::{ListOptions, Meta};
use crate::shared::Result;
use reqwest::Method;

pub struct ObjectStorageService<'a> {
    client: &'a Client,
}

impl<'a> ObjectStorageService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self, options: &ListOptions) -> Result<(Vec<ObjectStorage>, Meta)> {
        self.client
            .list("object-storage", "object_storages", options)
            .await
    }

    pub async fn get(&self, id: &str) -> Result<ObjectStorage> {
        self.client
            .get(&format!("object-storage/{id}"), "object_storage")
            .await
    }

    pub async fn create(&self, req: &ObjectStorageCreate) -> Result<ObjectStorage> {
        self.client
            .send_for(Method::POST, "object-storage", req, "object_storage")
            .await
    }

    pub async fn update(&self, id: &str, req: &ObjectStorageUpdate) -> Result<()> {
        self.client
            .send(Method::PUT, &format!("object-storage/{id}"), req)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&format!("object-storage/{id}")).await
    }

    pub async fn regenerate_keys(&self, id: &str) -> Result<S3Keys> {
        self.client
            .call_for(
                Method::POST,
                &format!("object-storage/{id}/regenerate-keys"),
                "s3_credentials",
            )
            .await
    }

    pub async fn list_clusters(
        &self,
        options: &ListOptions,
    ) -> Result<(Vec<ObjectStorageCluster>, Meta)> {
        self.client
            .list("object-storage/clusters", "clusters", options)
            .await
    }

    pub async fn list_tiers(&self) -> Result<(Vec<ObjectStorageTier>, Meta)> {
        self.client
            .list("object-storage/tiers", "tiers", &ListOptions::default())
            .await
    }
}
