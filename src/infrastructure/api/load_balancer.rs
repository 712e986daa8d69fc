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
use crate::domain::models::{ForwardingRule, LbFirewallRule, LoadBalancer, LoadBalancerReq};
use crate::domain::paging::{ListOptions, Meta};
use crate::shared::Result;
use reqwest::Method;

pub struct LoadBalancerService<'a> {
    client: &'a Client,
}

impl<'a> LoadBalancerService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self, options: &ListOptions) -> Result<(Vec<LoadBalancer>, Meta)> {
        self.client
            .list("load-balancers", "load_balancers", options)
            .await
    }

    pub async fn get(&self, id: &str) -> Result<LoadBalancer> {
        self.client
            .get(&format!("load-balancers/{id}"), "load_balancer")
            .await
    }

    pub async fn create(&self, req: &LoadBalancerReq) -> Result<LoadBalancer> {
        self.client
            .send_for(Method::POST, "load-balancers", req, "load_balancer")
            .await
    }

    pub async fn update(&self, id: &str, req: &LoadBalancerReq) -> Result<()> {
        self.client
            .send(Method::PATCH, &format!("load-balancers/{id}"), req)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&format!("load-balancers/{id}")).await
    }

    pub async fn list_forwarding_rules(
        &self,
        id: &str,
        options: &ListOptions,
    ) -> Result<(Vec<ForwardingRule>, Meta)> {
        self.client
            .list(
                &format!("load-balancers/{id}/forwarding-rules"),
                "forwarding_rules",
                options,
            )
            .await
    }

    pub async fn get_forwarding_rule(&self, id: &str, rule_id: &str) -> Result<ForwardingRule> {
        self.client
            .get(
                &format!("load-balancers/{id}/forwarding-rules/{rule_id}"),
                "forwarding_rule",
            )
            .await
    }

    pub async fn create_forwarding_rule(
        &self,
        id: &str,
        rule: &ForwardingRule,
    ) -> Result<ForwardingRule> {
        self.client
            .send_for(
                Method::POST,
                &format!("load-balancers/{id}/forwarding-rules"),
                rule,
                "forwarding_rule",
            )
            .await
    }

    pub async fn delete_forwarding_rule(&self, id: &str, rule_id: &str) -> Result<()> {
        self.client
            .delete(&format!("load-balancers/{id}/forwarding-rules/{rule_id}"))
            .await
    }

    pub async fn list_firewall_rules(
        &self,
        id: &str,
        options: &ListOptions,
    ) -> Result<(Vec<LbFirewallRule>, Meta)> {
        self.client
            .list(
                &format!("load-balancers/{id}/firewall-rules"),
                "firewall_rules",
                options,
            )
            .await
    }

    pub async fn get_firewall_rule(&self, id: &str, rule_id: &str) -> Result<LbFirewallRule> {
        self.client
            .get(
                &format!("load-balancers/{id}/firewall-rules/{rule_id}"),
                "firewall_rule",
            )
            .await
    }
}
