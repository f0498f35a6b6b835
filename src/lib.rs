//! Tenant-scoped content client for the cleaning-company website.
//!
//! # Architecture Overview
//!
//! ```text
//!   consumer (page, CLI)
//!         │  use_services / use_menus / use_widget ...
//!         ▼
//!   ┌──────────────┐   cached?  ┌────────────────────────────┐
//!   │   hooks      │──────────▶│ store: cache + in-flight    │
//!   │ HookHandle<T>│◀──────────│ (one request per key)       │
//!   └──────┬───────┘           └─────────────┬──────────────┘
//!          │                                 │ loader
//!          ▼                                 ▼
//!   ┌──────────────┐            ┌────────────────────────────┐
//!   │  services    │──────────▶│ http: timeout, retry,       │──▶ backend
//!   │  normalize   │            │ X-Tenant-ID, errors         │
//!   └──────────────┘            └────────────────────────────┘
//!
//!   cross-cutting: config (TOML + env), locale, resilience, observability
//! ```

pub mod config;
pub mod hooks;
pub mod http;
pub mod locale;
pub mod observability;
pub mod resilience;
pub mod scope;
pub mod services;
pub mod store;

pub use config::RemoteConfig;
pub use hooks::{DataHooks, HookHandle, ResourceState};
pub use http::{HttpClient, NetworkError, RequestOptions};
pub use locale::Locale;
pub use scope::{Scope, TenantId};
pub use services::ContentApi;
pub use store::{CacheKey, ResourceStore};
