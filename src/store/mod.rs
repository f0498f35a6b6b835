//! Resource store subsystem.
//!
//! # State Machine (per key)
//! ```text
//! Uncached  → fetch()           → In-flight
//! In-flight → fetch() same key  → attach to the pending request
//! In-flight → success           → Cached (cache written, then in-flight removed)
//! In-flight → failure           → Uncached (in-flight removed, nothing cached)
//! ```
//!
//! # Design Decisions
//! - One store per application instance, never a process global
//! - Keys are canonical so parameter order never splits the cache
//! - Entries live for the store's lifetime; removal is explicit

pub mod cache;
pub mod key;

pub use cache::ResourceStore;
pub use key::CacheKey;
