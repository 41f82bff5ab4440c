//! # CareSphere Repository
//!
//! Data access for the content layer:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn CacheEntryRepository>, Arc<dyn SenderSettingRepository>, ...
//! PgCacheEntryRepository, PgSenderSettingRepository, ...   (PostgreSQL / SQLx)
//!   ↓
//! PostgreSQL
//! ```
//!
//! ## Structure
//!
//! ```text
//! src/
//!   traits.rs      ← repository traits
//!   pool.rs        ← DatabasePool
//!   postgres/      ← SQLx implementations
//! ```

pub mod pool;
pub mod postgres;
pub mod traits;

pub use pool::*;
pub use postgres::*;
pub use traits::*;
