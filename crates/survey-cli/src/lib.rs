//! CLI library components for the column survey tool.

pub mod cli;
pub mod commands;
pub mod logging;
