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
    ReservedIp, ReservedIpAttach, ReservedIpConvert, ReservedIpCreate, ReservedIpUpdate,
};
use crate::domain::paging::{ListOptions, Meta};
use crate::shared::Result;
use reqwest::Method;

pub struct ReservedIpService<'a> {
    client: &'a Client,
}

impl<'a> ReservedIpService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self, options: &ListOptions) -> Result<(Vec<ReservedIp>, Meta)> {
        self.client
            .list("reserved-ips", "reserved_ips", options)
            .await
    }

    pub async fn get(&self, id: &str) -> Result<ReservedIp> {
        self.client
            .get(&format!("reserved-ips/{id}"), "reserved_ip")
            .await
    }

    pub async fn create(&self, req: &ReservedIpCreate) -> Result<ReservedIp> {
        self.client
            .send_for(Method::POST, "reserved-ips", req, "reserved_ip")
            .await
    }

    pub async fn update(&self, id: &str, req: &ReservedIpUpdate) -> Result<ReservedIp> {
        self.client
            .send_for(Method::PATCH, &format!("reserved-ips/{id}"), req, "reserved_ip")
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&format!("reserved-ips/{id}")).await
    }

    pub async fn attach(&self, id: &str, req: &ReservedIpAttach) -> Result<()> {
        self.client
            .send(Method::POST, &format!("reserved-ips/{id}/attach"), req)
            .await
    }

    pub async fn detach(&self, id: &str) -> Result<()> {
        self.client
            .call(Method::POST, &format!("reserved-ips/{id}/detach"))
            .await
    }

    /// Turn an instance's existing address into a reserved IP.
    pub async fn convert(&self, req: &ReservedIpConvert) -> Result<ReservedIp> {
        self.client
            .send_for(Method::POST, "reserved-ips/convert", req, "reserved_ip")
            .await
    }
}
