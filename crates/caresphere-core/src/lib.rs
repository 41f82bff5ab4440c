//! # CareSphere Core
//!
//! Core types, domain entities, and error definitions for the CareSphere
//! content service. This crate provides the foundational abstractions used
//! across all layers: the unified error type, typed identifiers, the
//! cache/settings/verse-of-day domain model, and best-effort side-effect
//! helpers.

pub mod domain;
pub mod effects;
pub mod error;
pub mod id;
pub mod result;
pub mod validation;

pub use domain::*;
pub use effects::*;
pub use error::*;
pub use id::*;
pub use result::*;
pub use validation::*;
