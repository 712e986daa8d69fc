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
use crate::domain::models::{InferenceUsage, Subscription, SubscriptionReq};
use crate::domain::paging::{ListOptions, Meta};
use crate::shared::Result;
use reqwest::Method;

pub struct InferenceService<'a> {
    client: &'a Client,
}

impl<'a> InferenceService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self, options: &ListOptions) -> Result<(Vec<Subscription>, Meta)> {
        self.client.list("inference", "subscriptions", options).await
    }

    pub async fn get(&self, id: &str) -> Result<Subscription> {
        self.client.get(&format!("inference/{id}"), "subscription").await
    }

    pub async fn create(&self, req: &SubscriptionReq) -> Result<Subscription> {
        self.client
            .send_for(Method::POST, "inference", req, "subscription")
            .await
    }

    pub async fn update(&self, id: &str, req: &SubscriptionReq) -> Result<Subscription> {
        self.client
            .send_for(Method::PATCH, &format!("inference/{id}"), req, "subscription")
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&format!("inference/{id}")).await
    }

    pub async fn usage(&self, id: &str) -> Result<InferenceUsage> {
        self.client.get(&format!("inference/{id}/usage"), "usage").await
    }
}
