//! # CareSphere Config
//!
//! Configuration management for the CareSphere content service.
//! Supports layered configuration from TOML files and environment
//! variables, with typed sections and fail-fast validation.

mod app_config;
mod loader;

pub use app_config::*;
pub use loader::*;
