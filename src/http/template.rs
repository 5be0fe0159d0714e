//! Template selection for resolved routes.
//!
//! The hint comes from the routing entry as authored. Case-insensitive
//! `"blog"` selects the blog template; anything else, or no hint, the
//! generic page template.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    Blog,
    Page,
}

impl TemplateKind {
    pub fn from_hint(hint: Option<&str>) -> Self {
        match hint {
            Some(hint) if hint.eq_ignore_ascii_case("blog") => TemplateKind::Blog,
            _ => TemplateKind::Page,
        }
    }
}
