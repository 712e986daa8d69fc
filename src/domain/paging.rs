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

//! Pagination model shared by every list command.

use crate::infrastructure::constants::{EMPTY_CELL, QUERY_CURSOR, QUERY_PER_PAGE};
use serde::{Deserialize, Serialize};

/// Listing metadata as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub links: Links,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    #[serde(default)]
    pub next: String,
    #[serde(default)]
    pub prev: String,
}

impl Meta {
    pub fn new(total: u64, next: impl Into<String>, prev: impl Into<String>) -> Self {
        Self {
            total,
            links: Links {
                next: next.into(),
                prev: prev.into(),
            },
        }
    }
}

/// Normalised paging descriptor. Empty cursors become `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paging {
    pub total: u64,
    pub next: Option<String>,
    pub prev: Option<String>,
}

impl Paging {
    pub fn new(total: u64, next: impl Into<String>, prev: impl Into<String>) -> Self {
        Self {
            total,
            next: non_empty(next.into()),
            prev: non_empty(prev.into()),
        }
    }

    /// Table footer: a header row and one value row.
    pub fn footer(&self) -> Vec<Vec<String>> {
        vec![
            vec![
                "TOTAL".to_string(),
                "NEXT PAGE".to_string(),
                "PREV PAGE".to_string(),
            ],
            vec![
                self.total.to_string(),
                cursor_cell(&self.next),
                cursor_cell(&self.prev),
            ],
        ]
    }

    /// Footer for listings whose metadata carries no cursors (managed
    /// databases).
    pub fn total_footer(total: u64) -> Vec<Vec<String>> {
        vec![vec!["TOTAL".to_string()], vec![total.to_string()]]
    }
}

impl From<&Meta> for Paging {
    fn from(meta: &Meta) -> Self {
        Self::new(meta.total, meta.links.next.clone(), meta.links.prev.clone())
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

fn cursor_cell(cursor: &Option<String>) -> String {
    cursor.clone().unwrap_or_else(|| EMPTY_CELL.to_string())
}

/// Paging options sent with a list request. Values are passed through to
/// the API without interpretation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub cursor: Option<String>,
    pub per_page: Option<u32>,
}

impl ListOptions {
    pub fn new(cursor: Option<String>, per_page: Option<u32>) -> Self {
        Self { cursor, per_page }
    }

    pub fn query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(per_page) = self.per_page {
            query.push((QUERY_PER_PAGE.to_string(), per_page.to_string()));
        }
        if let Some(cursor) = &self.cursor {
            query.push((QUERY_CURSOR.to_string(), cursor.clone()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cursors_normalised() {
        let paging = Paging::from(&Meta::new(2, "", ""));
        assert_eq!(paging.next, None);
        assert_eq!(paging.prev, None);
    }

    #[test]
    fn test_footer() {
        let paging = Paging::new(250, "bmV4dA==", "");
        assert_eq!(
            paging.footer(),
            vec![
                vec!["TOTAL", "NEXT PAGE", "PREV PAGE"],
                vec!["250", "bmV4dA==", "---"],
            ]
        );
    }

    #[test]
    fn test_total_footer() {
        assert_eq!(Paging::total_footer(3), vec![vec!["TOTAL"], vec!["3"]]);
    }

    #[test]
    fn test_list_options_passthrough() {
        let opts = ListOptions::new(Some("a b/c==".into()), Some(250));
        assert_eq!(
            opts.query(),
            vec![
                ("per_page".to_string(), "250".to_string()),
                ("cursor".to_string(), "a b/c==".to_string()),
            ]
        );
        assert!(ListOptions::default().query().is_empty());
    }

    #[test]
    fn test_meta_deserialize_without_links() {
        let meta: Meta = serde_json::from_str(r#"{"total": 4}"#).unwrap();
        assert_eq!(meta, Meta::new(4, "", ""));
    }
}
