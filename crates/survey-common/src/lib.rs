//! Shared utilities for column survey crates.

pub mod numeric;

pub use numeric::{format_numeric, proportion};
