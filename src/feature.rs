use std::sync::Arc;

use anyhow::{Context as _, Result};

use settings_search_api::{
    CallerId, IndexingManager, IndexingState, LaunchError, Ranker, RankerTask, SearchContext,
    SearchFeatureProvider, SharedExecutor, SiteMapResolver,
};

use crate::settings::SearchSettings;

/// Default [`SearchFeatureProvider`] for the settings application.
///
/// Every collaborator is injected at construction time through
/// [`SettingsSearchBuilder`]; there is no process-wide factory to consult.
/// Permission follows a fixed policy: the feature's own package is always
/// allowed, plus an explicit allowlist of external callers.
pub struct SettingsSearch {
    package: String,
    allowed_callers: Vec<CallerId>,
    site_map: Arc<dyn SiteMapResolver>,
    indexing: Arc<dyn IndexingManager>,
    executor: SharedExecutor,
    ranker: Option<Arc<dyn Ranker>>,
}

impl SettingsSearch {
    /// Start building a provider for the application package `package`.
    #[must_use]
    pub fn builder(package: impl Into<String>) -> SettingsSearchBuilder {
        SettingsSearchBuilder::new(package)
    }

    /// Start building a provider from loaded [`SearchSettings`].
    #[must_use]
    pub fn from_settings(settings: &SearchSettings) -> SettingsSearchBuilder {
        SettingsSearchBuilder::new(settings.package.clone())
            .allow_callers(settings.allowed_caller_ids())
    }

    fn is_authorized(&self, caller: &CallerId) -> bool {
        caller.package() == self.package
            || self.allowed_callers.iter().any(|allowed| allowed == caller)
    }
}

impl SearchFeatureProvider for SettingsSearch {
    fn verify_search_launch(
        &self,
        _context: &SearchContext,
        caller: Option<&CallerId>,
    ) -> Result<(), LaunchError> {
        let caller = caller.ok_or(LaunchError::MissingCaller)?;
        if self.is_authorized(caller) {
            Ok(())
        } else {
            tracing::warn!(caller = %caller, "rejected search page launch");
            Err(LaunchError::Denied {
                caller: caller.to_string(),
            })
        }
    }

    fn site_map(&self) -> Arc<dyn SiteMapResolver> {
        Arc::clone(&self.site_map)
    }

    fn update_index(&self, context: &SearchContext) {
        tracing::info!("starting blocking search index rebuild");
        self.indexing.rebuild(context);
        tracing::info!(state = ?self.indexing.state(), "search index rebuild returned");
    }

    fn indexing_manager(&self, _context: &SearchContext) -> Arc<dyn IndexingManager> {
        Arc::clone(&self.indexing)
    }

    fn indexing_state(&self, _context: &SearchContext) -> IndexingState {
        self.indexing.state()
    }

    fn shared_executor(&self) -> SharedExecutor {
        self.executor.clone()
    }

    fn ranker_task(&self, _context: &SearchContext, query: &str) -> Option<RankerTask> {
        let ranker = Arc::clone(self.ranker.as_ref()?);
        Some(RankerTask::new(query, move |q| ranker.rank(q)))
    }
}

/// Builder collecting the collaborators a [`SettingsSearch`] needs.
pub struct SettingsSearchBuilder {
    package: String,
    allowed_callers: Vec<CallerId>,
    site_map: Option<Arc<dyn SiteMapResolver>>,
    indexing: Option<Arc<dyn IndexingManager>>,
    executor: Option<SharedExecutor>,
    ranker: Option<Arc<dyn Ranker>>,
}

impl SettingsSearchBuilder {
    fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            allowed_callers: Vec::new(),
            site_map: None,
            indexing: None,
            executor: None,
            ranker: None,
        }
    }

    /// Allow one external caller to open the search page.
    #[must_use]
    pub fn allow_caller(mut self, caller: CallerId) -> Self {
        self.allowed_callers.push(caller);
        self
    }

    /// Allow a batch of external callers.
    #[must_use]
    pub fn allow_callers(mut self, callers: impl IntoIterator<Item = CallerId>) -> Self {
        self.allowed_callers.extend(callers);
        self
    }

    #[must_use]
    pub fn site_map(mut self, site_map: Arc<dyn SiteMapResolver>) -> Self {
        self.site_map = Some(site_map);
        self
    }

    #[must_use]
    pub fn indexing_manager(mut self, manager: Arc<dyn IndexingManager>) -> Self {
        self.indexing = Some(manager);
        self
    }

    /// Reuse an existing executor instead of spawning a fresh pool.
    #[must_use]
    pub fn executor(mut self, executor: SharedExecutor) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Enable the optional ranking capability.
    #[must_use]
    pub fn ranker(mut self, ranker: Arc<dyn Ranker>) -> Self {
        self.ranker = Some(ranker);
        self
    }

    /// Finish the build; the site map and indexing manager are required.
    pub fn build(self) -> Result<SettingsSearch> {
        let site_map = self.site_map.context("a site map resolver is required")?;
        let indexing = self.indexing.context("an indexing manager is required")?;
        let executor = match self.executor {
            Some(executor) => executor,
            None => SharedExecutor::new()?,
        };
        Ok(SettingsSearch {
            package: self.package,
            allowed_callers: self.allowed_callers,
            site_map,
            indexing,
            executor,
            ranker: self.ranker,
        })
    }
}
