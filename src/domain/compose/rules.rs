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

//! `--forwarding-rules` and `--firewall-rules` for load balancers.

use super::grammar::parse_int;
use super::{ComposeError, Field, Schema};
use crate::domain::models::{ForwardingRule, LbFirewallRule};

pub static FORWARDING_RULE_SCHEMA: Schema<ForwardingRule> = Schema {
    resource: "forwarding rule",
    fields: &[
        Field { key: "frontend_protocol", required: true, apply: set_frontend_protocol, render: frontend_protocol },
        Field { key: "frontend_port", required: true, apply: set_frontend_port, render: frontend_port },
        Field { key: "backend_protocol", required: true, apply: set_backend_protocol, render: backend_protocol },
        Field { key: "backend_port", required: true, apply: set_backend_port, render: backend_port },
    ],
    min_keys: 4,
    max_keys: 4,
};

pub static FIREWALL_RULE_SCHEMA: Schema<LbFirewallRule> = Schema {
    resource: "firewall rule",
    fields: &[
        Field { key: "port", required: true, apply: set_port, render: port },
        Field { key: "ip_type", required: true, apply: set_ip_type, render: ip_type },
        Field { key: "source", required: true, apply: set_source, render: source },
    ],
    min_keys: 3,
    max_keys: 3,
};

pub fn compose_forwarding_rules(spec: &str) -> Result<Vec<ForwardingRule>, ComposeError> {
    FORWARDING_RULE_SCHEMA.compose(spec)
}

pub fn forwarding_rules_to_spec(rules: &[ForwardingRule]) -> String {
    FORWARDING_RULE_SCHEMA.to_spec(rules)
}

pub fn compose_firewall_rules(spec: &str) -> Result<Vec<LbFirewallRule>, ComposeError> {
    FIREWALL_RULE_SCHEMA.compose(spec)
}

pub fn firewall_rules_to_spec(rules: &[LbFirewallRule]) -> String {
    FIREWALL_RULE_SCHEMA.to_spec(rules)
}

fn set_frontend_protocol(r: &mut ForwardingRule, v: &str) -> Result<(), ComposeError> {
    r.frontend_protocol = v.to_string();
    Ok(())
}

fn set_frontend_port(r: &mut ForwardingRule, v: &str) -> Result<(), ComposeError> {
    r.frontend_port = parse_int("frontend_port", v)?;
    Ok(())
}

fn set_backend_protocol(r: &mut ForwardingRule, v: &str) -> Result<(), ComposeError> {
    r.backend_protocol = v.to_string();
    Ok(())
}

fn set_backend_port(r: &mut ForwardingRule, v: &str) -> Result<(), ComposeError> {
    r.backend_port = parse_int("backend_port", v)?;
    Ok(())
}

fn frontend_protocol(r: &ForwardingRule) -> Option<String> {
    Some(r.frontend_protocol.clone())
}

fn frontend_port(r: &ForwardingRule) -> Option<String> {
    Some(r.frontend_port.to_string())
}

fn backend_protocol(r: &ForwardingRule) -> Option<String> {
    Some(r.backend_protocol.clone())
}

fn backend_port(r: &ForwardingRule) -> Option<String> {
    Some(r.backend_port.to_string())
}

fn set_port(r: &mut LbFirewallRule, v: &str) -> Result<(), ComposeError> {
    r.port = parse_int("port", v)?;
    Ok(())
}

fn set_ip_type(r: &mut LbFirewallRule, v: &str) -> Result<(), ComposeError> {
    r.ip_type = v.to_string();
    Ok(())
}

fn set_source(r: &mut LbFirewallRule, v: &str) -> Result<(), ComposeError> {
    r.source = v.to_string();
    Ok(())
}

fn port(r: &LbFirewallRule) -> Option<String> {
    Some(r.port.to_string())
}

fn ip_type(r: &LbFirewallRule) -> Option<String> {
    Some(r.ip_type.clone())
}

fn source(r: &LbFirewallRule) -> Option<String> {
    Some(r.source.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forwarding_rules() {
        let rules = compose_forwarding_rules(
            "frontend_protocol:http,frontend_port:80,backend_protocol:http,backend_port:8080/\
             frontend_protocol:https,frontend_port:443,backend_protocol:http,backend_port:8080",
        )
        .unwrap();

        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].frontend_port, 80);
        assert_eq!(rules[0].backend_port, 8080);
        assert_eq!(rules[1].frontend_protocol, "https");
        assert!(rules[0].id.is_empty());
    }

    #[test]
    fn test_forwarding_rule_requires_all_keys() {
        let err = compose_forwarding_rules("frontend_protocol:http,frontend_port:80").unwrap_err();
        assert!(err
            .to_string()
            .contains("frontend_protocol, frontend_port, backend_protocol and backend_port"));
    }

    #[test]
    fn test_firewall_rules_keep_cidr_sources() {
        let rules = compose_firewall_rules(
            "port:80,ip_type:v4,source:0.0.0.0/0/port:443,ip_type:v6,source:2001:db8::/32",
        )
        .unwrap();

        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].source, "0.0.0.0/0");
        assert_eq!(rules[1].source, "2001:db8::/32");
        assert_eq!(rules[1].port, 443);
    }

    #[test]
    fn test_firewall_rule_bad_port() {
        let err = compose_firewall_rules("port:http,ip_type:v4,source:cloudflare").unwrap_err();
        assert_eq!(
            err,
            ComposeError::InvalidInteger {
                key: "port".into(),
                value: "http".into()
            }
        );
    }

    #[test]
    fn test_round_trip() {
        let rules = vec![
            LbFirewallRule {
                port: 22,
                ip_type: "v4".into(),
                source: "192.168.0.0/16".into(),
                ..Default::default()
            },
            LbFirewallRule {
                port: 80,
                ip_type: "v4".into(),
                source: "cloudflare".into(),
                ..Default::default()
            },
        ];
        assert_eq!(compose_firewall_rules(&firewall_rules_to_spec(&rules)).unwrap(), rules);

        let forwarding = vec![ForwardingRule {
            frontend_protocol: "tcp".into(),
            frontend_port: 5432,
            backend_protocol: "tcp".into(),
            backend_port: 5432,
            ..Default::default()
        }];
        assert_eq!(
            compose_forwarding_rules(&forwarding_rules_to_spec(&forwarding)).unwrap(),
            forwarding
        );
    }
}
