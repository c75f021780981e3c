//! Deep link parsing boundary.
//!
//! # Data Flow
//! ```text
//! Host system callback (URL open, push notification, shortcut)
//!     → payload.rs (RawDeepLinkPayload)
//!     → parser.rs (scheme/host checks, intent resolution)
//!     → context.rs (DeeplinkContext, immutable)
//!     → routing::container
//! ```
//!
//! # Design Decisions
//! - Parsing is a pure function; failures are values, never panics
//! - Unparseable input never yields a context
//! - Payload fields are validated here so routers can trust them

pub mod context;
pub mod parser;
pub mod payload;

pub use context::{DeeplinkContext, EntityId, EventFilter, IntentKind, PromoCode};
pub use parser::{parse, DeeplinkParser, ParseError};
pub use payload::RawDeepLinkPayload;
