//! Deep link dispatch across independently owned navigation roots.

pub mod config;
pub mod data;
pub mod deeplink;
pub mod navigation;
pub mod observability;
pub mod routing;

pub use config::AppConfig;
pub use deeplink::{DeeplinkContext, RawDeepLinkPayload};
pub use navigation::Navigator;
pub use routing::RootModuleContainer;
