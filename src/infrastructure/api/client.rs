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

use super::transport::{ApiRequest, Transport};
use super::{
    AccountService, BlockStorageService, DatabaseService, DnsService, InferenceService,
    InstanceService, IsoService, KubernetesService, LoadBalancerService, ObjectStorageService,
    RegionService, ReservedIpService, UserService, Vpc2Service, VpcService,
};
use crate::domain::paging::{ListOptions, Meta};
use crate::shared::{CliError, Result};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Typed facade over a [`Transport`]. Resource services borrow it and
/// unwrap the API's `{"<key>": ...}` envelopes.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
}

impl Client {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn account(&self) -> AccountService<'_> {
        AccountService::new(self)
    }

    pub fn instances(&self) -> InstanceService<'_> {
        InstanceService::new(self)
    }

    pub fn block_storage(&self) -> BlockStorageService<'_> {
        BlockStorageService::new(self)
    }

    pub fn object_storage(&self) -> ObjectStorageService<'_> {
        ObjectStorageService::new(self)
    }

    pub fn dns(&self) -> DnsService<'_> {
        DnsService::new(self)
    }

    pub fn load_balancers(&self) -> LoadBalancerService<'_> {
        LoadBalancerService::new(self)
    }

    pub fn kubernetes(&self) -> KubernetesService<'_> {
        KubernetesService::new(self)
    }

    pub fn reserved_ips(&self) -> ReservedIpService<'_> {
        ReservedIpService::new(self)
    }

    pub fn vpcs(&self) -> VpcService<'_> {
        VpcService::new(self)
    }

    pub fn vpc2(&self) -> Vpc2Service<'_> {
        Vpc2Service::new(self)
    }

    pub fn isos(&self) -> IsoService<'_> {
        IsoService::new(self)
    }

    pub fn inference(&self) -> InferenceService<'_> {
        InferenceService::new(self)
    }

    pub fn users(&self) -> UserService<'_> {
        UserService::new(self)
    }

    pub fn databases(&self) -> DatabaseService<'_> {
        DatabaseService::new(self)
    }

    pub fn regions(&self) -> RegionService<'_> {
        RegionService::new(self)
    }

    /// GET a single object wrapped in `key`.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str, key: &'static str) -> Result<T> {
        let bytes = self.transport.send(ApiRequest::new(Method::GET, path)).await?;
        unwrap_envelope(&bytes, key)
    }

    /// GET a page of objects wrapped in `key`, together with its `meta`.
    pub(crate) async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        key: &'static str,
        options: &ListOptions,
    ) -> Result<(Vec<T>, Meta)> {
        self.list_filtered(path, key, options, Vec::new()).await
    }

    /// Like [`Client::list`] with extra filter parameters ahead of paging.
    pub(crate) async fn list_filtered<T: DeserializeOwned>(
        &self,
        path: &str,
        key: &'static str,
        options: &ListOptions,
        mut query: Vec<(String, String)>,
    ) -> Result<(Vec<T>, Meta)> {
        query.extend(options.query());
        let request = ApiRequest::new(Method::GET, path).with_query(query);
        let bytes = self.transport.send(request).await?;
        let mut value: Value = serde_json::from_slice(&bytes)?;

        let items = match value.get_mut(key).map(Value::take) {
            Some(Value::Null) | None => Vec::new(),
            Some(items) => serde_json::from_value(items)?,
        };
        let meta = match value.get_mut("meta").map(Value::take) {
            Some(Value::Null) | None => Meta::default(),
            Some(meta) => serde_json::from_value(meta)?,
        };
        Ok((items, meta))
    }

    /// Send `body` and decode the object wrapped in `key`.
    pub(crate) async fn send_for<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        key: &'static str,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = ApiRequest::new(method, path).with_body(serde_json::to_value(body)?);
        let bytes = self.transport.send(request).await?;
        unwrap_envelope(&bytes, key)
    }

    /// Send `body`, ignoring any response payload.
    pub(crate) async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<()> {
        let request = ApiRequest::new(method, path).with_body(serde_json::to_value(body)?);
        self.transport.send(request).await?;
        Ok(())
    }

    /// Body-less call, ignoring any response payload.
    pub(crate) async fn call(&self, method: Method, path: &str) -> Result<()> {
        self.transport.send(ApiRequest::new(method, path)).await?;
        Ok(())
    }

    /// Body-less call decoding the object wrapped in `key`.
    pub(crate) async fn call_for<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        key: &'static str,
    ) -> Result<T> {
        let bytes = self.transport.send(ApiRequest::new(method, path)).await?;
        unwrap_envelope(&bytes, key)
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        self.call(Method::DELETE, path).await
    }
}

fn unwrap_envelope<T: DeserializeOwned>(bytes: &[u8], key: &'static str) -> Result<T> {
    let mut value: Value = serde_json::from_slice(bytes)?;
    match value.get_mut(key).map(Value::take) {
        Some(inner) => Ok(serde_json::from_value(inner)?),
        None => Err(CliError::JsonParse(serde::de::Error::missing_field(key))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::BlockStorage;

    #[test]
    fn test_unwrap_envelope() {
        let block: BlockStorage =
            unwrap_envelope(br#"{"block": {"id": "b1", "size_gb": 10}}"#, "block").unwrap();
        assert_eq!(block.id, "b1");
        assert_eq!(block.size_gb, 10);
    }

    #[test]
    fn test_unwrap_envelope_missing_key() {
        let err = unwrap_envelope::<BlockStorage>(br#"{"blocks": []}"#, "block").unwrap_err();
        assert!(err.to_string().contains("missing field `block`"));
    }
}
