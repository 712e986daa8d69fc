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

//! `--node-pools` for kubernetes cluster creation.

use super::grammar::{parse_bool, parse_int, parse_labels, render_labels};
use super::{ComposeError, Field, Schema};
use crate::domain::models::NodePoolReq;

pub static NODE_POOL_SCHEMA: Schema<NodePoolReq> = Schema {
    resource: "node pool",
    fields: &[
        Field { key: "label", required: true, apply: set_label, render: label },
        Field { key: "quantity", required: true, apply: set_quantity, render: quantity },
        Field { key: "plan", required: true, apply: set_plan, render: plan },
        Field { key: "tag", required: false, apply: set_tag, render: tag },
        Field { key: "auto-scaler", required: false, apply: set_auto_scaler, render: auto_scaler },
        Field { key: "min-nodes", required: false, apply: set_min_nodes, render: min_nodes },
        Field { key: "max-nodes", required: false, apply: set_max_nodes, render: max_nodes },
        Field { key: "node-labels", required: false, apply: set_node_labels, render: node_labels },
    ],
    min_keys: 3,
    max_keys: 8,
};

pub fn compose_node_pools(spec: &str) -> Result<Vec<NodePoolReq>, ComposeError> {
    NODE_POOL_SCHEMA.compose(spec)
}

pub fn node_pools_to_spec(pools: &[NodePoolReq]) -> String {
    NODE_POOL_SCHEMA.to_spec(pools)
}

fn set_label(r: &mut NodePoolReq, v: &str) -> Result<(), ComposeError> {
    r.label = v.to_string();
    Ok(())
}

fn set_quantity(r: &mut NodePoolReq, v: &str) -> Result<(), ComposeError> {
    r.node_quantity = parse_int("quantity", v)?;
    Ok(())
}

fn set_plan(r: &mut NodePoolReq, v: &str) -> Result<(), ComposeError> {
    r.plan = v.to_string();
    Ok(())
}

fn set_tag(r: &mut NodePoolReq, v: &str) -> Result<(), ComposeError> {
    r.tag = v.to_string();
    Ok(())
}

fn set_auto_scaler(r: &mut NodePoolReq, v: &str) -> Result<(), ComposeError> {
    r.auto_scaler = Some(parse_bool("auto-scaler", v)?);
    Ok(())
}

fn set_min_nodes(r: &mut NodePoolReq, v: &str) -> Result<(), ComposeError> {
    r.min_nodes = Some(parse_int("min-nodes", v)?);
    Ok(())
}

fn set_max_nodes(r: &mut NodePoolReq, v: &str) -> Result<(), ComposeError> {
    r.max_nodes = Some(parse_int("max-nodes", v)?);
    Ok(())
}

fn set_node_labels(r: &mut NodePoolReq, v: &str) -> Result<(), ComposeError> {
    r.labels.extend(parse_labels("node-labels", v)?);
    Ok(())
}

fn label(r: &NodePoolReq) -> Option<String> {
    Some(r.label.clone())
}

fn quantity(r: &NodePoolReq) -> Option<String> {
    Some(r.node_quantity.to_string())
}

fn plan(r: &NodePoolReq) -> Option<String> {
    Some(r.plan.clone())
}

fn tag(r: &NodePoolReq) -> Option<String> {
    (!r.tag.is_empty()).then(|| r.tag.clone())
}

fn auto_scaler(r: &NodePoolReq) -> Option<String> {
    r.auto_scaler.map(|v| v.to_string())
}

fn min_nodes(r: &NodePoolReq) -> Option<String> {
    r.min_nodes.map(|v| v.to_string())
}

fn max_nodes(r: &NodePoolReq) -> Option<String> {
    r.max_nodes.map(|v| v.to_string())
}

fn node_labels(r: &NodePoolReq) -> Option<String> {
    render_labels(&r.labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_two_pools_with_labels() {
        let pools = compose_node_pools(
            "quantity:3,plan:p,label:np,node-labels:a=b|c=d/quantity:1,plan:p,label:np2",
        )
        .unwrap();

        assert_eq!(pools.len(), 2);
        assert_eq!(pools[0].node_quantity, 3);
        assert_eq!(pools[0].plan, "p");
        assert_eq!(pools[0].label, "np");
        assert_eq!(
            pools[0].labels,
            BTreeMap::from([("a".to_string(), "b".to_string()), ("c".to_string(), "d".to_string())])
        );
        assert_eq!(pools[1].node_quantity, 1);
        assert_eq!(pools[1].label, "np2");
        assert!(pools[1].labels.is_empty());
    }

    #[test]
    fn test_too_few_keys_lists_required() {
        let err = compose_node_pools("plan:p,quantity:3").unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, ComposeError::KeyCount { .. }));
        assert!(msg.contains("label, quantity and plan"), "{msg}");
        assert!(msg.contains("optionally tag, auto-scaler, min-nodes, max-nodes and node-labels"), "{msg}");
    }

    #[test]
    fn test_too_many_keys_in_one_group() {
        // Repeated keys still count towards the limit.
        let err = compose_node_pools(
            "label:np,quantity:1,plan:p,tag:a,tag:b,auto-scaler:true,min-nodes:1,max-nodes:2,node-labels:a=b",
        )
        .unwrap_err();
        assert!(matches!(err, ComposeError::KeyCount { resource: "node pool", .. }), "{err:?}");

        let eight = "label:np,quantity:1,plan:p,tag:a,auto-scaler:true,min-nodes:1,max-nodes:2,node-labels:a=b";
        assert_eq!(compose_node_pools(eight).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_required_key() {
        let err = compose_node_pools("plan:p,quantity:3,tag:t").unwrap_err();
        assert_eq!(
            err,
            ComposeError::MissingKey {
                resource: "node pool",
                key: "label".into()
            }
        );
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let pools = compose_node_pools("quantity:2,plan:p,label:np,gpu-sharing:on").unwrap();
        assert_eq!(pools[0].node_quantity, 2);
    }

    #[test]
    fn test_autoscaler_fields() {
        let pools = compose_node_pools(
            "quantity:1,plan:p,label:np,auto-scaler:TRUE,min-nodes:1,max-nodes:5,tag:web",
        )
        .unwrap();
        assert_eq!(pools[0].auto_scaler, Some(true));
        assert_eq!(pools[0].min_nodes, Some(1));
        assert_eq!(pools[0].max_nodes, Some(5));
        assert_eq!(pools[0].tag, "web");
    }

    #[test]
    fn test_invalid_quantity_names_key() {
        let err = compose_node_pools("quantity:lots,plan:p,label:np").unwrap_err();
        assert!(err.to_string().contains("'quantity'"));
    }

    #[test]
    fn test_round_trip() {
        let requests = vec![
            NodePoolReq {
                node_quantity: 3,
                label: "workers".into(),
                plan: "vc2-2c-4gb".into(),
                tag: "blue".into(),
                auto_scaler: Some(true),
                min_nodes: Some(2),
                max_nodes: Some(6),
                labels: BTreeMap::from([
                    ("tier".to_string(), "web".to_string()),
                    ("zone".to_string(), "a".to_string()),
                ]),
            },
            NodePoolReq {
                node_quantity: 1,
                label: "system".into(),
                plan: "vc2-1c-2gb".into(),
                ..Default::default()
            },
        ];

        let spec = node_pools_to_spec(&requests);
        assert_eq!(compose_node_pools(&spec).unwrap(), requests);
    }
}
