use indexmap::IndexMap;
use thiserror::Error;

use settings_search_api::{Breadcrumb, SiteMapResolver};

/// Longest parent chain a lookup will follow before treating the registered
/// data as malformed.
const MAX_DEPTH: usize = 32;

/// Errors raised when registering pages in a [`StaticSiteMap`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SiteMapError {
    /// A page attempted to register an identifier that already exists.
    #[error("page id '{id}' is already registered")]
    DuplicatePage { id: String },
}

struct PageEntry {
    title: String,
    parent: Option<String>,
}

/// In-memory site map for breadcrumb lookup.
///
/// Pages register once with an optional parent; breadcrumbs resolve by
/// walking parent links up to the root. Lookups that leave the registered
/// set, or whose parent chain cycles, resolve to `None` rather than failing.
#[derive(Default)]
pub struct StaticSiteMap {
    pages: IndexMap<String, PageEntry>,
}

impl StaticSiteMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a top-level page.
    pub fn add_root(
        &mut self,
        id: impl Into<String>,
        title: impl Into<String>,
    ) -> Result<(), SiteMapError> {
        self.insert(id, title, None)
    }

    /// Register a page beneath `parent`.
    pub fn add_child(
        &mut self,
        id: impl Into<String>,
        title: impl Into<String>,
        parent: impl Into<String>,
    ) -> Result<(), SiteMapError> {
        self.insert(id, title, Some(parent.into()))
    }

    fn insert(
        &mut self,
        id: impl Into<String>,
        title: impl Into<String>,
        parent: Option<String>,
    ) -> Result<(), SiteMapError> {
        let id = id.into();
        if self.pages.contains_key(&id) {
            return Err(SiteMapError::DuplicatePage { id });
        }
        self.pages.insert(
            id,
            PageEntry {
                title: title.into(),
                parent,
            },
        );
        Ok(())
    }

    /// Identifiers of all registered pages, in registration order.
    pub fn page_ids(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl SiteMapResolver for StaticSiteMap {
    fn breadcrumb(&self, page_id: &str) -> Option<Breadcrumb> {
        let mut path = Vec::new();
        let mut current = Some(page_id);
        for _ in 0..=MAX_DEPTH {
            let Some(id) = current else {
                path.reverse();
                return Some(Breadcrumb::new(page_id, path));
            };
            let entry = self.pages.get(id)?;
            path.push(entry.title.clone());
            current = entry.parent.as_deref();
        }
        // Chain deeper than any real settings hierarchy: cyclic data.
        None
    }
}
