//! Content subsystem: fetches the entry a routing record points at and
//! normalizes it into a [`ContentRecord`].

pub mod fetcher;
pub mod types;

pub use fetcher::ContentFetcher;
pub use types::{ContentRecord, ImageRef};
