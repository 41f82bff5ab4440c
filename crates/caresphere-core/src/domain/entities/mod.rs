//! Domain entities.

mod cache_entry;
mod member;
mod organization;
mod sender_setting;
mod verse_of_day;

pub use cache_entry::*;
pub use member::*;
pub use organization::*;
pub use sender_setting::*;
pub use verse_of_day::*;
