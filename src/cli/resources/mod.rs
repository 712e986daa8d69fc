//! Resource command groups. Each module owns its clap arguments, the verb
//! bodies and the printers for what the API returns.

use super::display::Row;
use crate::domain::paging::{Meta, Paging};
use crate::infrastructure::constants::EMPTY_CELL;
use clap::Args;

pub mod account;
pub mod block_storage;
pub mod database;
pub mod dns;
pub mod inference;
pub mod instance;
pub mod iso;
pub mod kubernetes;
pub mod load_balancer;
pub mod object_storage;
pub mod plans;
pub mod regions;
pub mod reserved_ip;
pub mod user;
pub mod vpc;
pub mod vpc2;

/// Paging flags shared by every list verb. The values reach the body
/// through the pre-run paging hook, not through this struct.
#[derive(Args, Debug, Clone, Default)]
#[allow(dead_code)]
pub struct PagingArgs {
    /// Cursor for paging
    #[arg(long)]
    pub cursor: Option<String>,

    /// Number of items requested per page. Default is 100 and max is 500
    #[arg(long, value_name = "N")]
    pub per_page: Option<u32>,
}

/// Cursor footer for a listing.
pub(crate) fn footer(meta: &Meta) -> Vec<Row> {
    Paging::from(meta).footer()
}

/// A single placeholder row, shown when a listing is empty.
pub(crate) fn empty_rows(width: usize) -> Vec<Row> {
    vec![vec![EMPTY_CELL.to_string(); width]]
}

/// Rows for a listing, or a placeholder row when there is nothing to show.
pub(crate) fn rows_or_empty<T>(items: &[T], width: usize, row: impl Fn(&T) -> Row) -> Vec<Row> {
    if items.is_empty() {
        empty_rows(width)
    } else {
        items.iter().map(row).collect()
    }
}

pub(crate) fn list_cell(values: &[String]) -> String {
    if values.is_empty() {
        EMPTY_CELL.to_string()
    } else {
        values.join(", ")
    }
}

pub(crate) fn text_cell(value: &str) -> String {
    if value.is_empty() {
        EMPTY_CELL.to_string()
    } else {
        value.to_string()
    }
}

/// `Some(true)` when a boolean switch was given, `None` otherwise.
pub(crate) fn switch(given: bool) -> Option<bool> {
    given.then_some(true)
}
