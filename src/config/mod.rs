//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! built-in defaults
//!     → loader.rs (TOML file, then SITE_* environment overrides)
//!     → validation.rs (semantic checks)
//!     → RemoteConfig (validated, immutable)
//!     → handed to HttpClient / ContentApi at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once resolved; a new client is built for a new config
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, resolve_config, resolve_config_with, ConfigError};
pub use schema::RemoteConfig;
