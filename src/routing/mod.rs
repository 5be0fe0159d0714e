//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Raw request path
//!     → normalizer.rs (canonical form, fallback candidates)
//!     → resolver.rs (query "routing" collection per candidate)
//!     → types.rs (validate entry into RoutingRecord)
//!     → Return: RoutingRecord or ResolveError
//! ```
//!
//! # Design Decisions
//! - Candidates are tried most-specific first, first hit wins
//! - Invalid entries are rejected whole, never partially used
//! - Deterministic given a deterministic store

pub mod normalizer;
pub mod resolver;
pub mod types;

pub use normalizer::{candidate_paths, PathCandidates};
pub use resolver::{RouteResolver, ROUTING_CONTENT_TYPE};
pub use types::{InvalidRoute, ResolveError, ResolveResult, RoutingEntry, RoutingRecord};
