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

use super::ComposeError;
use regex::Regex;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Split a compound flag value into its `/`-separated groups.
///
/// A `/` starts a new group only when followed by `key:`; otherwise it
/// belongs to the current value, e.g. `source:10.0.0.0/24`.
pub fn split_groups(spec: &str) -> Result<Vec<String>, ComposeError> {
    let group_start = Regex::new(r"^\s*[A-Za-z0-9_-]+:")
        .map_err(|e| ComposeError::Pattern(e.to_string()))?;
    let mut groups: Vec<String> = Vec::new();

    for segment in spec.split('/') {
        if segment.is_empty() {
            continue;
        }
        if !group_start.is_match(segment) {
            if let Some(current) = groups.last_mut() {
                current.push('/');
                current.push_str(segment);
                continue;
            }
        }
        groups.push(segment.to_string());
    }

    Ok(groups)
}

pub fn parse_int<T: FromStr>(key: &str, value: &str) -> Result<T, ComposeError> {
    value.parse::<T>().map_err(|_| ComposeError::InvalidInteger {
        key: key.to_string(),
        value: value.to_string(),
    })
}

pub fn parse_bool(key: &str, value: &str) -> Result<bool, ComposeError> {
    match value.to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ComposeError::InvalidBool {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Sub-parse `a=b|c=d`. Later duplicates overwrite earlier ones.
pub fn parse_labels(key: &str, value: &str) -> Result<BTreeMap<String, String>, ComposeError> {
    let mut labels = BTreeMap::new();
    for label in value.split('|').filter(|l| !l.is_empty()) {
        let (name, val) = label.split_once('=').ok_or_else(|| ComposeError::InvalidLabel {
            key: key.to_string(),
            label: label.to_string(),
        })?;
        labels.insert(name.to_string(), val.to_string());
    }
    Ok(labels)
}

pub fn render_labels(labels: &BTreeMap<String, String>) -> Option<String> {
    if labels.is_empty() {
        return None;
    }
    Some(
        labels
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("|"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_groups() {
        assert_eq!(split_groups("a:1,b:2/a:3").unwrap(), vec!["a:1,b:2", "a:3"]);
        assert_eq!(split_groups("a:1/").unwrap(), vec!["a:1"]);
        assert!(split_groups("").unwrap().is_empty());
    }

    #[test]
    fn test_split_keeps_cidr_values() {
        assert_eq!(
            split_groups("port:80,ip_type:v4,source:0.0.0.0/0/port:443,ip_type:v6,source:2001:db8::/32")
                .unwrap(),
            vec![
                "port:80,ip_type:v4,source:0.0.0.0/0",
                "port:443,ip_type:v6,source:2001:db8::/32",
            ]
        );
        assert_eq!(
            split_groups("source:10.0.0.0/24,port:22,ip_type:v4").unwrap(),
            vec!["source:10.0.0.0/24,port:22,ip_type:v4"]
        );
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int::<u32>("quantity", "12").unwrap(), 12);
        assert_eq!(
            parse_int::<u32>("quantity", "three").unwrap_err(),
            ComposeError::InvalidInteger {
                key: "quantity".into(),
                value: "three".into()
            }
        );
        assert!(parse_int::<u32>("quantity", "0x10").is_err());
    }

    #[test]
    fn test_parse_bool_case_insensitive() {
        assert!(parse_bool("auto-scaler", "TRUE").unwrap());
        assert!(!parse_bool("auto-scaler", "False").unwrap());
        assert!(parse_bool("auto-scaler", "yes").is_err());
    }

    #[test]
    fn test_parse_labels_last_wins() {
        let labels = parse_labels("node-labels", "a=b|c=d|a=z").unwrap();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels["a"], "z");
        assert_eq!(labels["c"], "d");
        assert_eq!(render_labels(&labels).as_deref(), Some("a=z|c=d"));
    }

    #[test]
    fn test_parse_labels_rejects_missing_equals() {
        let err = parse_labels("node-labels", "a=b|broken").unwrap_err();
        assert_eq!(
            err,
            ComposeError::InvalidLabel {
                key: "node-labels".into(),
                label: "broken".into()
            }
        );
    }
}
