//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → handed to RootModuleContainer::from_config at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; roots live for the process lifetime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::AppConfig;
pub use schema::DataConfig;
pub use schema::DeeplinkConfig;
pub use schema::LogFormat;
pub use schema::NavigationConfig;
pub use schema::ObservabilityConfig;
pub use validation::{validate_config, ValidationError};
