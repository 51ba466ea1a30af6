//! Default wiring for a settings application's in-app search feature.
//!
//! The capability contract lives in the `settings-search-api` crate; this
//! crate supplies the pieces an application shell needs to stand the
//! feature up: a provider implementation with explicit dependency
//! injection, an in-memory site map, an executor-backed slice refresh
//! trigger, and layered settings loading.

pub mod feature;
pub mod settings;
pub mod sitemap;
pub mod slices;

pub use feature::{SettingsSearch, SettingsSearchBuilder};
pub use settings::SearchSettings;
pub use sitemap::{SiteMapError, StaticSiteMap};
pub use slices::ExecutorSliceIndexer;

pub use settings_search_api::{
    Activity, Breadcrumb, CallerId, IndexingManager, IndexingState, LaunchError, Navigator,
    RankedScore, Ranker, RankerTask, SEARCH_REQUEST_CODE, SEARCH_UI_ACTION, SearchContext,
    SearchFeatureProvider, SearchToolbar, SharedExecutor, SiteMapResolver, SliceDataProvider,
};
