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

//! Wire types exchanged with the control-plane API.
//!
//! Response types default every field so that additions on the server side
//! never break deserialisation. Request types model "unset" as `None` and
//! skip it on the wire, letting the server apply its own default.

pub mod account;
pub mod block;
pub mod database;
pub mod dns;
pub mod inference;
pub mod instance;
pub mod iso;
pub mod kubernetes;
pub mod load_balancer;
pub mod object_storage;
pub mod region;
pub mod reserved_ip;
pub mod user;
pub mod vpc;
pub mod vpc2;

pub use account::Account;
pub use block::{BlockStorage, BlockStorageAttach, BlockStorageCreate, BlockStorageDetach, BlockStorageUpdate};
pub use database::Database;
pub use dns::{Domain, DomainCreate, DomainUpdate, Record, RecordCreate, RecordUpdate, Soa, SoaUpdate};
pub use inference::{InferenceUsage, Subscription, SubscriptionReq};
pub use instance::{Instance, InstanceCreate, InstanceReinstall, InstanceUpdate};
pub use iso::{Iso, IsoCreate, PublicIso};
pub use kubernetes::{
    Cluster, ClusterCreate, ClusterUpdate, Node, NodePool, NodePoolReq, NodePoolUpdate,
    UpgradeReq,
};
pub use load_balancer::{
    ForwardingRule, GenericInfo, HealthCheck, HealthCheckReq, LbFirewallRule, LoadBalancer,
    LoadBalancerReq, StickySessions,
};
pub use object_storage::{
    ObjectStorage, ObjectStorageCluster, ObjectStorageCreate, ObjectStorageTier, ObjectStorageUpdate,
    S3Keys,
};
pub use region::{Plan, Region};
pub use reserved_ip::{ReservedIp, ReservedIpAttach, ReservedIpConvert, ReservedIpCreate, ReservedIpUpdate};
pub use user::{User, UserCreate, UserUpdate};
pub use vpc::{NatGateway, NatGatewayBilling, NatGatewayReq, PortForwardingRule, PortForwardingRuleReq, Vpc, VpcCreate, VpcUpdate};
pub use vpc2::{Vpc2, Vpc2Create, Vpc2Node, Vpc2Nodes, Vpc2Update};
