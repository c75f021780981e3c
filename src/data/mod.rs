//! Data layer boundary.
//!
//! # Data Flow
//! ```text
//! Router node needs an entity before it can show a screen
//!     → fetcher.rs (EntityFetcher::fetch_entity(kind, id))
//!     → catalog.rs (in-memory implementation, seeded from config)
//!     → Entity or FetchError
//! ```
//!
//! # Design Decisions
//! - Routers depend on the trait only; the HTTP client lives outside this crate
//! - Timeouts are applied by the caller, not the fetcher

pub mod catalog;
pub mod fetcher;

pub use catalog::InMemoryCatalog;
pub use fetcher::{Entity, EntityFetcher, EntityKind, Event, FetchError, Restaurant};
