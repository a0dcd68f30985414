//! Shared utilities for the glucose monitor workspace
//!
//! This crate provides logging setup and the small environment-variable
//! helpers used by configuration loaders across the workspace.

pub mod env;
pub mod logging;

pub use env::{
    env_flag, env_parse, env_string, lookup_flag, lookup_parse, lookup_string, process_env,
};
pub use logging::{init_tracing, init_tracing_with_default};
