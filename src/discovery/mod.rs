//! URL list input
//!
//! Reads the list of posting URLs to check, one per line.

pub mod input;

pub use input::{parse_urls, read_urls};
