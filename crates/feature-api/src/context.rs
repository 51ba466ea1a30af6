use std::sync::Arc;

use crate::executor::SharedExecutor;
use crate::provider::SliceDataProvider;

/// Shared inputs handed to capability operations in place of an ambient
/// platform context.
///
/// The collaborators a search operation may need are injected once and then
/// carried by the context, so the trait surface stays stable while the
/// available state can grow. Contexts are cheap to clone; all clones share
/// the same inner state.
#[derive(Clone)]
pub struct SearchContext {
    inner: Arc<ContextInner>,
}

struct ContextInner {
    app_package: String,
    slices: Arc<dyn SliceDataProvider>,
    executor: SharedExecutor,
}

impl SearchContext {
    #[must_use]
    pub fn new(
        app_package: impl Into<String>,
        slices: Arc<dyn SliceDataProvider>,
        executor: SharedExecutor,
    ) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                app_package: app_package.into(),
                slices,
                executor,
            }),
        }
    }

    /// Package name of the hosting application.
    #[must_use]
    pub fn app_package(&self) -> &str {
        &self.inner.app_package
    }

    /// The slice data provider servicing this application.
    #[must_use]
    pub fn slices(&self) -> Arc<dyn SliceDataProvider> {
        Arc::clone(&self.inner.slices)
    }

    /// The executor shared by all search-related background work.
    #[must_use]
    pub fn executor(&self) -> SharedExecutor {
        self.inner.executor.clone()
    }
}
