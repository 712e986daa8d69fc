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
    Domain, DomainCreate, DomainUpdate, Record, RecordCreate, RecordUpdate, Soa, SoaUpdate,
};
use crate::domain::paging::{ListOptions, Meta};
use crate::shared::Result;
use reqwest::Method;

pub struct DnsService<'a> {
    client: &'a Client,
}

impl<'a> DnsService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list_domains(&self, options: &ListOptions) -> Result<(Vec<Domain>, Meta)> {
        self.client.list("domains", "domains", options).await
    }

    pub async fn get_domain(&self, domain: &str) -> Result<Domain> {
        self.client.get(&format!("domains/{domain}"), "domain").await
    }

    pub async fn create_domain(&self, req: &DomainCreate) -> Result<Domain> {
        self.client.send_for(Method::POST, "domains", req, "domain").await
    }

    pub async fn update_domain(&self, domain: &str, req: &DomainUpdate) -> Result<()> {
        self.client.send(Method::PUT, &format!("domains/{domain}"), req).await
    }

    pub async fn delete_domain(&self, domain: &str) -> Result<()> {
        self.client.delete(&format!("domains/{domain}")).await
    }

    pub async fn dnssec_info(&self, domain: &str) -> Result<Vec<String>> {
        self.client.get(&format!("domains/{domain}/dnssec"), "dns_sec").await
    }

    pub async fn soa_info(&self, domain: &str) -> Result<Soa> {
        self.client.get(&format!("domains/{domain}/soa"), "dns_soa").await
    }

    pub async fn update_soa(&self, domain: &str, req: &SoaUpdate) -> Result<()> {
        self.client.send(Method::PATCH, &format!("domains/{domain}/soa"), req).await
    }

    pub async fn list_records(
        &self,
        domain: &str,
        options: &ListOptions,
    ) -> Result<(Vec<Record>, Meta)> {
        self.client
            .list(&format!("domains/{domain}/records"), "records", options)
            .await
    }

    pub async fn get_record(&self, domain: &str, id: &str) -> Result<Record> {
        self.client
            .get(&format!("domains/{domain}/records/{id}"), "record")
            .await
    }

    pub async fn create_record(&self, domain: &str, req: &RecordCreate) -> Result<Record> {
        self.client
            .send_for(Method::POST, &format!("domains/{domain}/records"), req, "record")
            .await
    }

    pub async fn update_record(&self, domain: &str, id: &str, req: &RecordUpdate) -> Result<()> {
        self.client
            .send(Method::PATCH, &format!("domains/{domain}/records/{id}"), req)
            .await
    }

    pub async fn delete_record(&self, domain: &str, id: &str) -> Result<()> {
        self.client
            .delete(&format!("domains/{domain}/records/{id}"))
            .await
    }
}
