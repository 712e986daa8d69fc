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
    Cluster, ClusterCreate, ClusterUpdate, NodePool, NodePoolReq, NodePoolUpdate, UpgradeReq,
};
use crate::domain::paging::{ListOptions, Meta};
use crate::shared::Result;
use reqwest::Method;

pub struct KubernetesService<'a> {
    client: &'a Client,
}

impl<'a> KubernetesService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self, options: &ListOptions) -> Result<(Vec<Cluster>, Meta)> {
        self.client
            .list("kubernetes/clusters", "vke_clusters", options)
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Cluster> {
        self.client
            .get(&format!("kubernetes/clusters/{id}"), "vke_cluster")
            .await
    }

    pub async fn create(&self, req: &ClusterCreate) -> Result<Cluster> {
        self.client
            .send_for(Method::POST, "kubernetes/clusters", req, "vke_cluster")
            .await
    }

    pub async fn update(&self, id: &str, req: &ClusterUpdate) -> Result<()> {
        self.client
            .send(Method::PUT, &format!("kubernetes/clusters/{id}"), req)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .delete(&format!("kubernetes/clusters/{id}"))
            .await
    }

    /// Delete the cluster together with its linked block storage and load
    /// balancers.
    pub async fn delete_with_resources(&self, id: &str) -> Result<()> {
        self.client
            .delete(&format!(
                "kubernetes/clusters/{id}/delete-with-linked-resources"
            ))
            .await
    }

    /// Base64 encoded kubeconfig.
    pub async fn config(&self, id: &str) -> Result<String> {
        self.client
            .get(&format!("kubernetes/clusters/{id}/config"), "kube_config")
            .await
    }

    pub async fn versions(&self) -> Result<Vec<String>> {
        self.client.get("kubernetes/versions", "versions").await
    }

    pub async fn available_upgrades(&self, id: &str) -> Result<Vec<String>> {
        self.client
            .get(
                &format!("kubernetes/clusters/{id}/available-upgrades"),
                "available_upgrades",
            )
            .await
    }

    pub async fn upgrade(&self, id: &str, req: &UpgradeReq) -> Result<()> {
        self.client
            .send(Method::POST, &format!("kubernetes/clusters/{id}/upgrades"), req)
            .await
    }

    pub async fn list_node_pools(
        &self,
        cluster_id: &str,
        options: &ListOptions,
    ) -> Result<(Vec<NodePool>, Meta)> {
        self.client
            .list(
                &format!("kubernetes/clusters/{cluster_id}/node-pools"),
                "node_pools",
                options,
            )
            .await
    }

    pub async fn get_node_pool(&self, cluster_id: &str, id: &str) -> Result<NodePool> {
        self.client
            .get(
                &format!("kubernetes/clusters/{cluster_id}/node-pools/{id}"),
                "node_pool",
            )
            .await
    }

    pub async fn create_node_pool(&self, cluster_id: &str, req: &NodePoolReq) -> Result<NodePool> {
        self.client
            .send_for(
                Method::POST,
                &format!("kubernetes/clusters/{cluster_id}/node-pools"),
                req,
                "node_pool",
            )
            .await
    }

    pub async fn update_node_pool(
        &self,
        cluster_id: &str,
        id: &str,
        req: &NodePoolUpdate,
    ) -> Result<NodePool> {
        self.client
            .send_for(
                Method::PATCH,
                &format!("kubernetes/clusters/{cluster_id}/node-pools/{id}"),
                req,
                "node_pool",
            )
            .await
    }

    pub async fn delete_node_pool(&self, cluster_id: &str, id: &str) -> Result<()> {
        self.client
            .delete(&format!("kubernetes/clusters/{cluster_id}/node-pools/{id}"))
            .await
    }

    pub async fn delete_node(&self, cluster_id: &str, pool_id: &str, node_id: &str) -> Result<()> {
        self.client
            .delete(&format!(
                "kubernetes/clusters/{cluster_id}/node-pools/{pool_id}/nodes/{node_id}"
            ))
            .await
    }

    pub async fn recycle_node(&self, cluster_id: &str, pool_id: &str, node_id: &str) -> Result<()> {
        self.client
            .call(
                Method::POST,
                &format!(
                    "kubernetes/clusters/{cluster_id}/node-pools/{pool_id}/nodes/{node_id}/recycle"
                ),
            )
            .await
    }
}
