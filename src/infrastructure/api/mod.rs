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

//! API client adapter: a [`Transport`] seam, the reqwest-backed
//! [`HttpTransport`] and the typed [`Client`] facade with one service per
//! resource group.

mod account;
mod block;
mod client;
mod database;
mod dns;
mod inference;
mod instance;
mod iso;
mod kubernetes;
mod load_balancer;
pub mod mock;
mod object_storage;
mod region;
mod reserved_ip;
pub mod transport;
mod user;
mod vpc;
mod vpc2;

pub use account::AccountService;
pub use block::BlockStorageService;
pub use client::Client;
pub use database::DatabaseService;
pub use dns::DnsService;
pub use inference::InferenceService;
pub use instance::InstanceService;
pub use iso::IsoService;
pub use kubernetes::KubernetesService;
pub use load_balancer::LoadBalancerService;
pub use mock::MockTransport;
pub use object_storage::ObjectStorageService;
pub use region::RegionService;
pub use reserved_ip::ReservedIpService;
pub use transport::{ApiRequest, HttpTransport, Transport};
pub use user::UserService;
pub use vpc::VpcService;
pub use vpc2::Vpc2Service;
