//! # CareSphere Domain
//!
//! Domain entities and value objects for the content-resolution layer:
//! cached provider payloads, sender settings with their precedence scopes,
//! verse-of-day rows, and the minimal organization/member surface the
//! birthday fan-out reads.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
