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
    NatGateway, NatGatewayReq, PortForwardingRule, PortForwardingRuleReq, Vpc, VpcCreate,
    VpcUpdate,
};
use crate::domain::paging::{ListOptions, Meta};
use crate::shared::Result;
use reqwest::Method;

pub struct VpcService<'a> {
    client: &'a Client,
}

impl<'a> VpcService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self, options: &ListOptions) -> Result<(Vec<Vpc>, Meta)> {
        self.client.list("vpcs", "vpcs", options).await
    }

    pub async fn get(&self, id: &str) -> Result<Vpc> {
        self.client.get(&format!("vpcs/{id}"), "vpc").await
    }

    pub async fn create(&self, req: &VpcCreate) -> Result<Vpc> {
        self.client.send_for(Method::POST, "vpcs", req, "vpc").await
    }

    pub async fn update(&self, id: &str, req: &VpcUpdate) -> Result<()> {
        self.client.send(Method::PUT, &format!("vpcs/{id}"), req).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&format!("vpcs/{id}")).await
    }

    pub async fn list_nat_gateways(
        &self,
        vpc_id: &str,
        options: &ListOptions,
    ) -> Result<(Vec<NatGateway>, Meta)> {
        self.client
            .list(&format!("vpcs/{vpc_id}/nat-gateway"), "nat_gateways", options)
            .await
    }

    pub async fn get_nat_gateway(&self, vpc_id: &str, id: &str) -> Result<NatGateway> {
        self.client
            .get(&format!("vpcs/{vpc_id}/nat-gateway/{id}"), "nat_gateway")
            .await
    }

    pub async fn create_nat_gateway(&self, vpc_id: &str, req: &NatGatewayReq) -> Result<NatGateway> {
        self.client
            .send_for(
                Method::POST,
                &format!("vpcs/{vpc_id}/nat-gateway"),
                req,
                "nat_gateway",
            )
            .await
    }

    pub async fn update_nat_gateway(
        &self,
        vpc_id: &str,
        id: &str,
        req: &NatGatewayReq,
    ) -> Result<NatGateway> {
        self.client
            .send_for(
                Method::PUT,
                &format!("vpcs/{vpc_id}/nat-gateway/{id}"),
                req,
                "nat_gateway",
            )
            .await
    }

    pub async fn delete_nat_gateway(&self, vpc_id: &str, id: &str) -> Result<()> {
        self.client
            .delete(&format!("vpcs/{vpc_id}/nat-gateway/{id}"))
            .await
    }

    pub async fn list_port_forwarding_rules(
        &self,
        vpc_id: &str,
        gateway_id: &str,
        options: &ListOptions,
    ) -> Result<(Vec<PortForwardingRule>, Meta)> {
        self.client
            .list(
                &pfr_path(vpc_id, gateway_id),
                "port_forwarding_rules",
                options,
            )
            .await
    }

    pub async fn get_port_forwarding_rule(
        &self,
        vpc_id: &str,
        gateway_id: &str,
        id: &str,
    ) -> Result<PortForwardingRule> {
        self.client
            .get(
                &format!("{}/{id}", pfr_path(vpc_id, gateway_id)),
                "port_forwarding_rule",
            )
            .await
    }

    pub async fn create_port_forwarding_rule(
        &self,
        vpc_id: &str,
        gateway_id: &str,
        req: &PortForwardingRuleReq,
    ) -> Result<PortForwardingRule> {
        self.client
            .send_for(
                Method::POST,
                &pfr_path(vpc_id, gateway_id),
                req,
                "port_forwarding_rule",
            )
            .await
    }

    pub async fn update_port_forwarding_rule(
        &self,
        vpc_id: &str,
        gateway_id: &str,
        id: &str,
        req: &PortForwardingRuleReq,
    ) -> Result<PortForwardingRule> {
        self.client
            .send_for(
                Method::PUT,
                &format!("{}/{id}", pfr_path(vpc_id, gateway_id)),
                req,
                "port_forwarding_rule",
            )
            .await
    }

    pub async fn delete_port_forwarding_rule(
        &self,
        vpc_id: &str,
        gateway_id: &str,
        id: &str,
    ) -> Result<()> {
        self.client
            .delete(&format!("{}/{id}", pfr_path(vpc_id, gateway_id)))
            .await
    }
}

fn pfr_path(vpc_id: &str, gateway_id: &str) -> String {
    format!("vpcs/{vpc_id}/nat-gateway/{gateway_id}/global/port-forwarding-rules")
}
