//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → router.rs (table scan)
//!     → matcher.rs (pattern match + specificity rank)
//!     → Return: matched handler or 404
//!
//! Table construction (at startup):
//!     MuxBuilder registrations
//!     → Freeze as immutable Mux
//!     → Shared via Arc, read-only thereafter
//! ```
//!
//! # Design Decisions
//! - No mutation after build; concurrency-safe without locks
//! - Deterministic: same path always selects the same registration
//! - Most specific match wins (exact > longer prefix > shorter prefix)

pub mod matcher;
pub mod router;

pub use matcher::RoutePattern;
pub use router::{Mux, MuxBuilder};
