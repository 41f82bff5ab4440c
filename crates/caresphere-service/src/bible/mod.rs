//! Bible content: provider client, envelope normalization, and the
//! cached read service.

mod client;
mod envelope;
mod service;

pub use client::{BibleApiClient, BibleProvider, PROVIDER};
pub use service::{BibleService, BibleServiceImpl};
