//! Shared utilities for agent-rs
//!
//! This crate provides common functionality used across the agent-rs workspace:
//! logging setup and startup configuration resolved from the environment.

pub mod config;
pub mod logging;

pub use config::{
    CompletionSettings, ConfigError, DEFAULT_API_BASE, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
    Settings,
};
pub use logging::{LogFormat, init_tracing};
