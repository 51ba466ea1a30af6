use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of the component asking to open the search results page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallerId {
    package: String,
    component: String,
}

impl CallerId {
    #[must_use]
    pub fn new(package: impl Into<String>, component: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            component: component.into(),
        }
    }

    /// Parse a `package/component` spec; `None` when either half is empty.
    #[must_use]
    pub fn parse(spec: &str) -> Option<Self> {
        let (package, component) = spec.split_once('/')?;
        if package.is_empty() || component.is_empty() {
            return None;
        }
        Some(Self::new(package, component))
    }

    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    #[must_use]
    pub fn component(&self) -> &str {
        &self.component
    }
}

impl fmt::Display for CallerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.package, self.component)
    }
}

/// One (label, score) pair produced by a ranking task.
///
/// A ranker yields these already ordered; this type carries no ordering of
/// its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedScore {
    pub label: String,
    pub score: f32,
}

impl RankedScore {
    #[must_use]
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// A settings page identifier together with its full navigational path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub page_id: String,
    pub path: Vec<String>,
}

impl Breadcrumb {
    #[must_use]
    pub fn new(page_id: impl Into<String>, path: Vec<String>) -> Self {
        Self {
            page_id: page_id.into(),
            path,
        }
    }

    /// Render the path the way search results display it.
    #[must_use]
    pub fn display(&self) -> String {
        self.path.join(" > ")
    }
}

/// Lifecycle of the search index as observed through the capability boundary.
///
/// Transitions are owned by the external indexing manager; the boundary only
/// reads the state. The boolean probe on the provider trait is defined in
/// terms of this enum: it reports `true` exactly for [`Complete`].
///
/// [`Complete`]: IndexingState::Complete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndexingState {
    NotStarted,
    InProgress,
    Complete,
    Failed,
}

impl IndexingState {
    #[must_use]
    pub fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }
}
