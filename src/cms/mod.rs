//! Headless CMS access subsystem.
//!
//! # Data Flow
//! ```text
//! routing / content layers
//!     → query.rs (plain EntryQuery / EntryRequest values)
//!     → store.rs (ContentStore trait)
//!         → client.rs (Contentstack delivery API over reqwest)
//!         → memory.rs (in-memory store for tests)
//!     → raw JSON entries
//! ```
//!
//! # Design Decisions
//! - The client is built once at startup and handed to consumers explicitly
//! - Requests are data, not builder chains
//! - Credentials never appear in logs or `Debug` output
//! - No retries at this layer

pub mod client;
pub mod memory;
pub mod query;
pub mod store;
pub mod types;

pub use client::CmsClient;
pub use memory::{MemoryStore, StoreCall};
pub use query::{entry_request, where_equals, EntryQuery, EntryRequest, FieldFilter};
pub use store::ContentStore;
pub use types::{CmsError, CmsResult};
