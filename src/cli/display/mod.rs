//! Display module for formatted CLI output

pub mod printer;

pub use printer::{cells, kv, render, Encode, Printer, Renderable, Row};
