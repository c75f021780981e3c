//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! RawDeepLinkPayload
//!     → container.rs (parse, owner lookup)
//!     → ownership.rs (IntentKind → RootId)
//!     → node.rs (root's router tree: local, then children in order)
//!     → features/ (per-root nodes push/present or defer)
//!     → deferred.rs (fetch, liveness check, push or alert)
//!     → final push/present/alert activates the owning root
//!     → Return: Presented / ErrorSurfaced / Discarded / Unhandled
//! ```
//!
//! # Design Decisions
//! - Router trees built at startup, immutable at runtime
//! - Deterministic: same context and tree always walk the same nodes
//! - First accepting node wins (ordered by declaration)
//! - Explicit Unhandled rather than a silent default screen

pub mod container;
pub mod deferred;
pub mod features;
pub mod node;
pub mod outcome;
pub mod ownership;

pub use container::{ContainerBuilder, DispatchReport, DispatchResult, RootModuleContainer};
pub use deferred::Hydrator;
pub use node::{RouterGroup, RouterNode};
pub use outcome::{DeferredRoute, Resolution, RoutingOutcome};
pub use ownership::OwnershipMap;
