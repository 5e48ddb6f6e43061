//! CLI library components for ruleprobe.

pub mod cli;
pub mod commands;
pub mod logging;
