//! Path normalization and fallback candidates.
//!
//! # Responsibilities
//! - Canonicalize a raw path to exactly one leading `/`
//! - Produce the ordered candidates tried against the routing store
//!
//! # Design Decisions
//! - Most specific first: `/blog/ai` before `blog/ai`
//! - Routing entries may be authored with or without the leading `/`;
//!   neither convention is assumed correct
//! - The root path yields a single candidate (the stripped form is empty)
//! - Pure function, no I/O

use std::iter::{Chain, Once};
use std::option;

/// Iterator over [`PathCandidates`] in lookup order.
pub type Iter<'a> = Chain<Once<&'a str>, option::IntoIter<&'a str>>;

/// Ordered, deduplicated path representations to look up.
///
/// Cheap to clone and iterable any number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathCandidates {
    canonical: String,
    stripped: Option<String>,
}

impl PathCandidates {
    /// The canonical form (always starts with `/`).
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Iterate candidates in lookup order.
    pub fn iter(&self) -> Iter<'_> {
        std::iter::once(self.canonical.as_str()).chain(self.stripped.as_deref())
    }

    pub fn len(&self) -> usize {
        1 + usize::from(self.stripped.is_some())
    }

    /// Always false: the canonical form is always present.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(str::to_string).collect()
    }
}

impl<'a> IntoIterator for &'a PathCandidates {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Canonicalize `raw` so it starts with exactly one `/`.
pub fn canonicalize(raw: &str) -> String {
    format!("/{}", raw.trim_start_matches('/'))
}

/// Build the lookup candidates for a raw request path.
pub fn candidate_paths(raw: &str) -> PathCandidates {
    let canonical = canonicalize(raw);
    let stripped = &canonical[1..];

    let stripped = if stripped.is_empty() {
        None
    } else {
        Some(stripped.to_string())
    };

    PathCandidates { canonical, stripped }
}
