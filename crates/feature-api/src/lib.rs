//! Capability boundary for a settings application's in-app search feature.
//!
//! This crate declares the contract between the application shell and the
//! search subsystem: the [`SearchFeatureProvider`] trait, the collaborator
//! traits its operations hand out, and the small amount of machinery those
//! signatures name (the shared executor and the cancellable ranker task).
//! Concrete implementations live with the embedding application.

pub mod context;
pub mod error;
pub mod executor;
pub mod provider;
pub mod task;
pub mod toolbar;
pub mod types;

pub use context::SearchContext;
pub use error::LaunchError;
pub use executor::SharedExecutor;
pub use provider::{
    IndexingManager, Navigator, Ranker, SEARCH_REQUEST_CODE, SEARCH_UI_ACTION,
    SearchFeatureProvider, SiteMapResolver, SliceDataProvider,
};
pub use task::RankerTask;
pub use toolbar::{Activity, SearchToolbar};
pub use types::{Breadcrumb, CallerId, IndexingState, RankedScore};
