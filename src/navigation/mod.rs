//! Navigation roots subsystem.
//!
//! # Data Flow
//! ```text
//! Navigator (one per process, injected)
//!     → root.rs (one NavigationRoot per tab, owns its back stack)
//!     → screen.rs (Screen descriptors, ErrorAlert)
//!     → liveness.rs (per-screen tokens, expired on teardown)
//!     → focus.rs (visible-root pointer shared by every root)
//!
//! Every mutation:
//!     → NavigationEvent on a broadcast channel
//!     → host UI renders it
//! ```
//!
//! # Design Decisions
//! - Activation only flips the active pointer, stacks are untouched
//! - Router-facing mutations bring their root to the front under the same lock
//! - Each mutation is atomic with respect to concurrent dispatches
//! - Roots live for the process lifetime

pub mod focus;
pub mod liveness;
pub mod navigator;
pub mod root;
pub mod screen;

pub use focus::Focus;
pub use liveness::LivenessToken;
pub use navigator::{NavigationEvent, NavigationSnapshot, Navigator};
pub use root::{NavigationError, NavigationRoot, RootId, RootSnapshot};
pub use screen::{ErrorAlert, Screen};
