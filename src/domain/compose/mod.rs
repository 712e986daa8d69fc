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

//! Compound flag composer.
//!
//! Parses compact flag values such as
//! `quantity:3,plan:vc2-1c-2gb,label:np,node-labels:a=b|c=d/quantity:1,...`
//! into typed request objects. Each resource describes its keys with a
//! [`Schema`]; parsing is pure and fails with a single [`ComposeError`] kind.

mod grammar;
pub mod rules;
pub mod node_pool;

pub use grammar::{parse_bool, parse_int, parse_labels, render_labels, split_groups};
pub use node_pool::{compose_node_pools, node_pools_to_spec, NODE_POOL_SCHEMA};
pub use rules::{
    compose_firewall_rules, compose_forwarding_rules, firewall_rules_to_spec,
    forwarding_rules_to_spec,
};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    #[error("no {resource} given")]
    Empty { resource: &'static str },

    #[error("unable to format {resource}: each {resource} must include {required}{optional}")]
    KeyCount {
        resource: &'static str,
        required: String,
        optional: String,
    },

    #[error("unable to format {resource}: missing required key '{key}'")]
    MissingKey { resource: &'static str, key: String },

    #[error("unable to format {resource}: '{entry}' is not a key:value pair")]
    Malformed { resource: &'static str, entry: String },

    #[error("invalid value for '{key}': '{value}' is not a base-10 integer")]
    InvalidInteger { key: String, value: String },

    #[error("invalid value for '{key}': '{value}' is not true or false")]
    InvalidBool { key: String, value: String },

    #[error("invalid value for '{key}': label '{label}' must be name=value")]
    InvalidLabel { key: String, label: String },

    #[error("invalid group pattern: {0}")]
    Pattern(String),
}

pub type Apply<R> = fn(&mut R, &str) -> Result<(), ComposeError>;
pub type Render<R> = fn(&R) -> Option<String>;

/// One recognised key of a compound flag.
pub struct Field<R> {
    pub key: &'static str,
    pub required: bool,
    pub apply: Apply<R>,
    pub render: Render<R>,
}

/// Key table of one compound flag.
pub struct Schema<R: 'static> {
    pub resource: &'static str,
    pub fields: &'static [Field<R>],
    pub min_keys: usize,
    pub max_keys: usize,
}

impl<R: Default> Schema<R> {
    /// Parse every group of `spec` into a request.
    pub fn compose(&self, spec: &str) -> Result<Vec<R>, ComposeError> {
        let groups = split_groups(spec)?;
        if groups.is_empty() {
            return Err(ComposeError::Empty {
                resource: self.resource,
            });
        }
        groups.iter().map(|group| self.compose_group(group)).collect()
    }

    fn compose_group(&self, group: &str) -> Result<R, ComposeError> {
        let mut request = R::default();
        let mut seen: Vec<&'static str> = Vec::new();

        for entry in group.split(',').filter(|e| !e.is_empty()) {
            let (key, value) = entry.split_once(':').ok_or_else(|| ComposeError::Malformed {
                resource: self.resource,
                entry: entry.to_string(),
            })?;
            let key = key.trim();

            // Keys unknown to this client are skipped so newer server-side
            // fields can be passed without breaking older builds.
            let Some(field) = self.fields.iter().find(|f| f.key == key) else {
                tracing::debug!(resource = self.resource, key, "ignoring unknown key");
                continue;
            };

            (field.apply)(&mut request, value)?;
            seen.push(field.key);
        }

        if seen.len() < self.min_keys || seen.len() > self.max_keys {
            return Err(self.key_count_error());
        }

        if let Some(missing) = self
            .fields
            .iter()
            .find(|f| f.required && !seen.contains(&f.key))
        {
            return Err(ComposeError::MissingKey {
                resource: self.resource,
                key: missing.key.to_string(),
            });
        }

        Ok(request)
    }

    /// Canonical serialisation, the inverse of [`Schema::compose`].
    pub fn to_spec(&self, requests: &[R]) -> String {
        requests
            .iter()
            .map(|request| {
                self.fields
                    .iter()
                    .filter_map(|f| (f.render)(request).map(|v| format!("{}:{}", f.key, v)))
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    fn key_count_error(&self) -> ComposeError {
        let required: Vec<&str> = self.fields.iter().filter(|f| f.required).map(|f| f.key).collect();
        let optional: Vec<&str> = self.fields.iter().filter(|f| !f.required).map(|f| f.key).collect();

        ComposeError::KeyCount {
            resource: self.resource,
            required: join_keys(&required),
            optional: if optional.is_empty() {
                String::new()
            } else {
                format!("; optionally {}", join_keys(&optional))
            },
        }
    }
}

fn join_keys(keys: &[&str]) -> String {
    match keys {
        [] => String::new(),
        [one] => one.to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_keys() {
        assert_eq!(join_keys(&["a"]), "a");
        assert_eq!(join_keys(&["a", "b"]), "a and b");
        assert_eq!(join_keys(&["a", "b", "c"]), "a, b and c");
    }

    #[test]
    fn test_empty_spec() {
        let err = compose_node_pools("").unwrap_err();
        assert_eq!(err, ComposeError::Empty { resource: "node pool" });
    }

    #[test]
    fn test_malformed_entry() {
        let err = compose_node_pools("quantity:3,plan,label:x").unwrap_err();
        assert!(matches!(err, ComposeError::Malformed { ref entry, .. } if entry == "plan"));
    }
}
