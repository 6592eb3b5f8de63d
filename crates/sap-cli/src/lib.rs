//! Library half of the `sap` command: argument definitions, policy
//! resolution, the planning pipeline, summary tables and logging setup.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod pipeline;
pub mod summary;
