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
use crate::domain::models::{User, UserCreate, UserUpdate};
use crate::domain::paging::{ListOptions, Meta};
use crate::shared::Result;
use reqwest::Method;

pub struct UserService<'a> {
    client: &'a Client,
}

impl<'a> UserService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self, options: &ListOptions) -> Result<(Vec<User>, Meta)> {
        self.client.list("users", "users", options).await
    }

    pub async fn get(&self, id: &str) -> Result<User> {
        self.client.get(&format!("users/{id}"), "user").await
    }

    pub async fn create(&self, req: &UserCreate) -> Result<User> {
        self.client.send_for(Method::POST, "users", req, "user").await
    }

    pub async fn update(&self, id: &str, req: &UserUpdate) -> Result<()> {
        self.client
            .send(Method::PATCH, &format!("users/{id}"), req)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&format!("users/{id}")).await
    }
}
