//! Value objects shared across the domain.

mod message_type;
mod scope;
mod status;

pub use message_type::*;
pub use scope::*;
pub use status::*;
