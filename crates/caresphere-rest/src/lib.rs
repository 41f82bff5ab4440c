//! # CareSphere REST
//!
//! REST API layer using Axum for CareSphere.
//! Provides HTTP endpoints for Bible content, verse-of-the-day management,
//! sender settings, transactional messaging, and health checks.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
