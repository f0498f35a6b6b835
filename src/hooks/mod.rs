//! Data hooks: bind a resource fetch to a consumer's lifetime.
//!
//! # Data Flow
//! ```text
//! DataHooks::use_*(scope, filters)
//!     → cached?   HookHandle ready immediately, no request
//!     → otherwise spawn: ResourceStore::fetch (dedup by key)
//!                        → ResourceState {data | error}, loading = false
//! ```
//!
//! # Design Decisions
//! - State is published on a `watch` channel; consumers read or await it
//! - Errors become display strings; nothing panics into the consumer
//! - Unmounting discards late results but does not abort the request

pub mod data;
pub mod locale_fallback;
pub mod state;

pub use data::DataHooks;
pub use locale_fallback::LocaleResolution;
pub use state::{HookHandle, ResourceState};
