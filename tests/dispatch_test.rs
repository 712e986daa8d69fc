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

mod common;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use common::{run, run_anonymous, run_with_cancel};
use reqwest::Method;
use serde_json::{json, Value};
use std::sync::Arc;
use vultr_cli::{CancelToken, MockTransport};

fn query_value<'a>(query: &'a [(String, String)], key: &str) -> Option<&'a str> {
    query
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

#[tokio::test]
async fn test_block_storage_list_json() {
    let mock = Arc::new(MockTransport::new().with_json(
        Method::GET,
        "blocks",
        json!({
            "blocks": [
                {"id": "b1", "region": "ewr", "size_gb": 10},
                {"id": "b2", "region": "lax", "size_gb": 20}
            ],
            "meta": {"total": 2, "links": {"next": "", "prev": ""}}
        }),
    ));

    let out = run(mock.clone(), &["block-storage", "list", "--output=json"]).await;
    assert_eq!(out.code, 0, "{}", out.stderr);

    let body: Value = serde_json::from_str(&out.stdout).unwrap();
    assert_eq!(body["blocks"].as_array().unwrap().len(), 2);
    assert_eq!(body["meta"]["total"], 2);
    assert_eq!(body["meta"]["links"]["next"], "");
    assert_eq!(body["meta"]["links"]["prev"], "");
    assert!(!out.stdout.contains("TOTAL"));
}

#[tokio::test]
async fn test_block_storage_create_sends_only_given_fields() {
    let mock = Arc::new(MockTransport::new().with_json(
        Method::POST,
        "blocks",
        json!({"block": {"id": "b1", "region": "lax", "size_gb": 10, "label": "foo"}}),
    ));

    let out = run(
        mock.clone(),
        &["block-storage", "create", "--region=lax", "--size=10", "--label=foo"],
    )
    .await;
    assert_eq!(out.code, 0, "{}", out.stderr);

    let request = mock.last_request().unwrap();
    assert_eq!(request.method, Method::POST);
    assert_eq!(
        request.body,
        Some(json!({"region": "lax", "size_gb": 10, "label": "foo"}))
    );

    let first = out.stdout.lines().next().unwrap();
    assert!(first.starts_with("ID"), "{}", out.stdout);
    assert!(first.ends_with("b1"), "{}", out.stdout);
    assert!(out.stdout.contains("LABEL"));
}

#[tokio::test]
async fn test_kubernetes_create_composes_node_pools() {
    let mock = Arc::new(MockTransport::new().with_json(
        Method::POST,
        "kubernetes/clusters",
        json!({"vke_cluster": {"id": "c1", "label": "c", "region": "ewr"}}),
    ));

    let out = run(
        mock.clone(),
        &[
            "kubernetes",
            "create",
            "--label=c",
            "--region=ewr",
            "--version=v1.29.2+1",
            "--node-pools=quantity:3,plan:p,label:np,node-labels:a=b|c=d/quantity:1,plan:p,label:np2",
        ],
    )
    .await;
    assert_eq!(out.code, 0, "{}", out.stderr);

    let body = mock.last_request().unwrap().body.unwrap();
    assert_eq!(body["version"], "v1.29.2+1");
    let pools = body["node_pools"].as_array().unwrap();
    assert_eq!(pools.len(), 2);
    assert_eq!(pools[0]["node_quantity"], 3);
    assert_eq!(pools[0]["labels"], json!({"a": "b", "c": "d"}));
    assert_eq!(pools[1]["label"], "np2");
    assert!(pools[1].get("labels").is_none());
}

#[tokio::test]
async fn test_kubernetes_create_bad_pool_makes_no_call() {
    let mock = Arc::new(MockTransport::new());

    let out = run(mock.clone(), &["kubernetes", "create", "--node-pools=plan:p,quantity:3"]).await;
    assert_eq!(out.code, 1);
    assert!(
        out.stderr.contains("label, quantity and plan"),
        "{}",
        out.stderr
    );
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_paging_flags_pass_through() {
    let mock = Arc::new(MockTransport::new().with_json(
        Method::GET,
        "blocks",
        json!({
            "blocks": [{"id": "b1"}],
            "meta": {"total": 600, "links": {"next": "def", "prev": "abc"}}
        }),
    ));

    let out = run(
        mock.clone(),
        &["block-storage", "list", "--per-page=250", "--cursor=abc"],
    )
    .await;
    assert_eq!(out.code, 0, "{}", out.stderr);

    let request = mock.last_request().unwrap();
    assert_eq!(query_value(&request.query, "per_page"), Some("250"));
    assert_eq!(query_value(&request.query, "cursor"), Some("abc"));

    let lines: Vec<&str> = out.stdout.lines().collect();
    let footer = lines
        .iter()
        .position(|l| l.starts_with("TOTAL"))
        .expect("footer header");
    assert!(lines[footer].contains("NEXT PAGE"));
    assert!(lines[footer].contains("PREV PAGE"));
    assert!(lines[footer + 1].starts_with("600"));
    assert!(lines[footer + 1].contains("def"));
    assert!(lines[footer + 1].ends_with("abc"));
}

#[tokio::test]
async fn test_cursor_reaches_adapter_verbatim() {
    let mock = Arc::new(MockTransport::new().with_json(
        Method::GET,
        "instances",
        json!({"instances": [], "meta": {"total": 0, "links": {"next": "", "prev": ""}}}),
    ));
    let cursor = "bmV4dF9fQ0I0RjFGMkQ=+/ x";

    let out = run(mock.clone(), &["instance", "list", "--cursor", cursor]).await;
    assert_eq!(out.code, 0, "{}", out.stderr);
    let request = mock.last_request().unwrap();
    assert_eq!(query_value(&request.query, "cursor"), Some(cursor));
}

#[tokio::test]
async fn test_default_per_page_is_sent() {
    let mock = Arc::new(MockTransport::new().with_json(
        Method::GET,
        "iso",
        json!({"isos": [], "meta": {"total": 0, "links": {"next": "", "prev": ""}}}),
    ));

    let out = run(mock.clone(), &["iso", "list"]).await;
    assert_eq!(out.code, 0, "{}", out.stderr);
    let request = mock.last_request().unwrap();
    assert_eq!(query_value(&request.query, "per_page"), Some("100"));
    assert_eq!(query_value(&request.query, "cursor"), None);
}

#[tokio::test]
async fn test_dnssec_flags_are_exclusive() {
    let mock = Arc::new(MockTransport::new());

    let out = run(
        mock.clone(),
        &["dns", "domain", "dnssec", "example.com", "--enabled", "--disabled"],
    )
    .await;
    assert_eq!(out.code, 1);
    assert!(out.stderr.contains("cannot be used with"), "{}", out.stderr);
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_missing_key_fails_before_any_call() {
    let mock = Arc::new(MockTransport::new().with_json(
        Method::GET,
        "account",
        json!({"account": {"name": "n"}}),
    ));

    let out = run_anonymous(mock.clone(), &["account", "get"]).await;
    assert_eq!(out.code, 1);
    assert!(out.stderr.contains("no API key found"), "{}", out.stderr);
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_discovery_commands_need_no_key() {
    let mock = Arc::new(
        MockTransport::new()
            .with_json(
                Method::GET,
                "kubernetes/versions",
                json!({"versions": ["v1.29.2+1", "v1.28.7+1"]}),
            )
            .with_json(
                Method::GET,
                "plans",
                json!({"plans": [], "meta": {"total": 0, "links": {"next": "", "prev": ""}}}),
            ),
    );

    let out = run_anonymous(mock.clone(), &["kubernetes", "versions"]).await;
    assert_eq!(out.code, 0, "{}", out.stderr);
    assert_eq!(out.stdout, "VERSION\nv1.29.2+1\nv1.28.7+1\n");

    let out = run_anonymous(mock.clone(), &["plans", "list", "--type", "vc2"]).await;
    assert_eq!(out.code, 0, "{}", out.stderr);
    let request = mock.last_request().unwrap();
    assert_eq!(query_value(&request.query, "type"), Some("vc2"));
}

#[tokio::test]
async fn test_api_error_is_wrapped_with_context() {
    let mock = Arc::new(MockTransport::new().with_error(
        Method::GET,
        "blocks/missing",
        404,
        "block not found",
    ));

    let out = run(mock, &["bs", "get", "missing"]).await;
    assert_eq!(out.code, 1);
    assert_eq!(
        out.stderr.trim_end(),
        "Error: error getting block storage: block not found (HTTP 404)"
    );
    assert!(out.stdout.is_empty());
}

#[tokio::test]
async fn test_yaml_output() {
    let mock = Arc::new(MockTransport::new().with_json(
        Method::GET,
        "account",
        json!({"account": {"name": "jane", "email": "jane@example.com"}}),
    ));

    let out = run(mock, &["account", "get", "-o", "yaml"]).await;
    assert_eq!(out.code, 0, "{}", out.stderr);
    let body: serde_yaml::Value = serde_yaml::from_str(&out.stdout).unwrap();
    assert_eq!(body["account"]["name"].as_str(), Some("jane"));
}

#[tokio::test]
async fn test_kubernetes_delete_with_linked_resources() {
    let mock = Arc::new(MockTransport::new().with_empty(
        Method::DELETE,
        "kubernetes/clusters/c1/delete-with-linked-resources",
    ));

    let out = run(mock.clone(), &["k", "delete", "c1", "--delete-resources"]).await;
    assert_eq!(out.code, 0, "{}", out.stderr);
    assert_eq!(mock.requests().len(), 1);
    assert!(out.stdout.contains("linked resources have been deleted"));
}

#[tokio::test]
async fn test_kubeconfig_written_to_file() {
    let config = "apiVersion: v1\nkind: Config\n";
    let mock = Arc::new(MockTransport::new().with_json(
        Method::GET,
        "kubernetes/clusters/c1/config",
        json!({"kube_config": STANDARD.encode(config)}),
    ));
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kube").join("config");

    let out = run(
        mock,
        &["kubernetes", "config", "c1", "--output-file", path.to_str().unwrap()],
    )
    .await;
    assert_eq!(out.code, 0, "{}", out.stderr);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), config);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }
}

#[tokio::test]
async fn test_kubeconfig_not_written_after_cancel() {
    let mock = Arc::new(MockTransport::new().with_json(
        Method::GET,
        "kubernetes/clusters/c1/config",
        json!({"kube_config": STANDARD.encode("apiVersion: v1\n")}),
    ));
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config");
    let cancel = CancelToken::new();
    cancel.cancel();

    let out = run_with_cancel(
        mock,
        cancel,
        &["kubernetes", "config", "c1", "--output-file", path.to_str().unwrap()],
    )
    .await;
    assert_eq!(out.code, 1);
    assert!(out.stderr.contains("request cancelled"), "{}", out.stderr);
    assert!(!path.exists());
    assert!(out.stdout.is_empty());
}

#[tokio::test]
async fn test_kubeconfig_printed_without_file() {
    let config = "apiVersion: v1\n";
    let mock = Arc::new(MockTransport::new().with_json(
        Method::GET,
        "kubernetes/clusters/c1/config",
        json!({"kube_config": STANDARD.encode(config)}),
    ));

    let out = run(mock, &["kubernetes", "config", "c1"]).await;
    assert_eq!(out.code, 0, "{}", out.stderr);
    assert_eq!(out.stdout, config);
}

#[tokio::test]
async fn test_load_balancer_create_with_rules() {
    let mock = Arc::new(MockTransport::new().with_json(
        Method::POST,
        "load-balancers",
        json!({"load_balancer": {"id": "lb1", "region": "ewr"}}),
    ));

    let out = run(
        mock.clone(),
        &[
            "lb",
            "create",
            "--region",
            "ewr",
            "--forwarding-rules",
            "frontend_protocol:http,frontend_port:80,backend_protocol:http,backend_port:8080",
            "--firewall-rules",
            "port:80,ip_type:v4,source:0.0.0.0/0",
        ],
    )
    .await;
    assert_eq!(out.code, 0, "{}", out.stderr);

    let body = mock.last_request().unwrap().body.unwrap();
    assert_eq!(
        body["forwarding_rules"],
        json!([{
            "frontend_protocol": "http",
            "frontend_port": 80,
            "backend_protocol": "http",
            "backend_port": 8080
        }])
    );
    assert_eq!(
        body["firewall_rules"],
        json!([{"port": 80, "source": "0.0.0.0/0", "ip_type": "v4"}])
    );
}

#[tokio::test]
async fn test_instance_create_encodes_userdata() {
    let mock = Arc::new(MockTransport::new().with_json(
        Method::POST,
        "instances",
        json!({"instance": {"id": "i1"}}),
    ));

    let out = run(
        mock.clone(),
        &[
            "instance", "create", "--region", "ewr", "--plan", "vc2-1c-1gb", "--os", "387",
            "--userdata", "#!/bin/sh",
        ],
    )
    .await;
    assert_eq!(out.code, 0, "{}", out.stderr);

    let body = mock.last_request().unwrap().body.unwrap();
    assert_eq!(body["os_id"], 387);
    assert_eq!(body["user_data"], STANDARD.encode("#!/bin/sh"));
    assert!(body.get("backups").is_none());
}

#[tokio::test]
async fn test_database_list_total_footer() {
    let mock = Arc::new(MockTransport::new().with_json(
        Method::GET,
        "databases",
        json!({"databases": [{"id": "d1"}], "meta": {"total": 1, "links": {"next": "", "prev": ""}}}),
    ));

    let out = run(mock, &["db", "list"]).await;
    assert_eq!(out.code, 0, "{}", out.stderr);
    let lines: Vec<&str> = out.stdout.lines().collect();
    assert_eq!(lines[lines.len() - 2], "TOTAL");
    assert_eq!(lines[lines.len() - 1], "1");
}
