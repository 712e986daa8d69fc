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

use assert_cmd::Command;
use predicates::prelude::*;

const NO_CONFIG: &str = "/nonexistent/vultr-cli-test.yaml";

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("vultr-cli").unwrap();
    cmd.env_remove("VULTR_API_KEY");
    cmd
}

#[test]
fn test_help_exits_zero() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("block-storage"))
        .stdout(predicate::str::contains("kubernetes"));
}

#[test]
fn test_version_exits_zero() {
    cli()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_subcommand_help_exits_zero() {
    cli()
        .args(["k", "np", "create", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--node-labels"));
}

#[test]
fn test_unknown_flag_is_usage_error() {
    cli()
        .args(["block-storage", "list", "--bogus"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--bogus"));
}

#[test]
fn test_missing_subcommand_is_usage_error() {
    cli().assert().code(1);
}

#[test]
fn test_missing_positional_is_usage_error() {
    cli()
        .args(["instance", "get"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("INSTANCE-ID"));
}

#[test]
fn test_missing_key_is_rejected() {
    cli()
        .args(["account", "get", "--config", NO_CONFIG])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no API key found"));
}

#[test]
fn test_bad_node_pool_spec() {
    cli()
        .env("VULTR_API_KEY", "dummy")
        .args(["kubernetes", "create", "--node-pools=plan:p,quantity:3"])
        .args(["--config", NO_CONFIG])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unable to format node pool"))
        .stderr(predicate::str::contains("label, quantity and plan"));
}

#[test]
fn test_bad_forwarding_rule_spec() {
    cli()
        .env("VULTR_API_KEY", "dummy")
        .args(["lb", "create", "--region", "ewr"])
        .args(["--forwarding-rules", "frontend_protocol:http,frontend_port:eighty"])
        .args(["--config", NO_CONFIG])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("frontend_port"));
}

#[test]
fn test_dnssec_conflict() {
    cli()
        .env("VULTR_API_KEY", "dummy")
        .args(["dns", "domain", "dnssec", "example.com", "--enabled", "--disabled"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_dnssec_requires_a_switch() {
    cli()
        .args(["dns", "domain", "dnssec", "example.com"])
        .assert()
        .code(1);
}

#[test]
fn test_unknown_output_format() {
    cli()
        .env("VULTR_API_KEY", "dummy")
        .args(["account", "get", "-o", "xml", "--config", NO_CONFIG])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("xml"));
}

#[test]
fn test_unparsable_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.yaml");
    std::fs::write(&config, "api-key: [unterminated").unwrap();

    cli()
        .args(["account", "get", "--config", config.to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unable to parse"));
}
