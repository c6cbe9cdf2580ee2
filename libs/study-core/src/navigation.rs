//! In-page navigation links.

use crate::error::NavigationError;
use crate::motion::ScrollBehavior;
use serde::{Deserialize, Serialize};

/// A section of the page reachable from the navigation bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
}

impl Section {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollRequest {
    pub section: usize,
    pub behavior: ScrollBehavior,
}

/// Resolve a navigation `href` such as `#quiz` to the section it scrolls to.
pub fn resolve_anchor(
    href: &str,
    sections: &[Section],
    behavior: ScrollBehavior,
) -> Result<ScrollRequest, NavigationError> {
    let id = href
        .strip_prefix('#')
        .filter(|id| !id.is_empty())
        .ok_or_else(|| NavigationError::NotInPage(href.to_string()))?;

    let section = sections
        .iter()
        .position(|s| s.id == id)
        .ok_or_else(|| NavigationError::UnknownSection(id.to_string()))?;

    Ok(ScrollRequest { section, behavior })
}
