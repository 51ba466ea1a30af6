use std::sync::Arc;

use crate::context::SearchContext;
use crate::error::LaunchError;
use crate::executor::SharedExecutor;
use crate::task::RankerTask;
use crate::toolbar::{Activity, SearchToolbar};
use crate::types::{Breadcrumb, CallerId, IndexingState, RankedScore};

/// Fixed action string naming the search UI destination.
pub const SEARCH_UI_ACTION: &str = "settings.intent.action.SEARCH";

/// Request code attached to every search navigation request.
pub const SEARCH_REQUEST_CODE: i32 = 0;

/// Maps a settings page identifier to its full navigational path.
pub trait SiteMapResolver: Send + Sync {
    /// Resolve the breadcrumb for `page_id`; `None` when the page is unknown.
    fn breadcrumb(&self, page_id: &str) -> Option<Breadcrumb>;
}

/// External maintenance of the search index.
///
/// The index itself, its storage and its build procedure all live behind
/// this trait; the capability boundary only observes and triggers it.
pub trait IndexingManager: Send + Sync {
    /// Rebuild the index, blocking the calling thread until done.
    fn rebuild(&self, context: &SearchContext);

    /// Request a rebuild through the manager's own background scheduling.
    fn request_rebuild(&self, context: &SearchContext);

    /// Current lifecycle state of the index.
    fn state(&self) -> IndexingState;
}

/// Provider of indexable slice data, refreshed off the calling thread.
pub trait SliceDataProvider: Send + Sync {
    /// Kick off an asynchronous refresh of slice data. Fire and forget.
    fn index_slice_data_async(&self, context: &SearchContext);
}

/// Optional ranking strategy producing ordered (label, score) pairs for a
/// free-text query.
pub trait Ranker: Send + Sync {
    fn rank(&self, query: &str) -> Vec<RankedScore>;
}

/// Navigation seam implemented by the hosting shell.
pub trait Navigator: Send + Sync {
    /// Ask the platform to open the screen identified by `action`.
    fn start_activity(&self, action: &str, request_code: i32);
}

/// The contract an application-wide search subsystem satisfies.
///
/// The permission guard is the one operation that fails loud; everything
/// else degrades to an absent value or a no-op so the hosting UI never
/// crashes because search is unavailable.
pub trait SearchFeatureProvider: Send + Sync {
    /// Ensure `caller` may open the search results page.
    ///
    /// An absent caller is an argument problem
    /// ([`LaunchError::MissingCaller`]); a present but unauthorized caller
    /// is a security problem ([`LaunchError::Denied`]). Success is silent.
    /// Evaluate this guard before presenting search result UI to an
    /// external caller.
    fn verify_search_launch(
        &self,
        context: &SearchContext,
        caller: Option<&CallerId>,
    ) -> Result<(), LaunchError>;

    /// Handle for looking up breadcrumbs. Always present; individual
    /// lookups may still resolve to nothing.
    fn site_map(&self) -> Arc<dyn SiteMapResolver>;

    /// Synchronously rebuild the search index.
    ///
    /// Blocks the calling thread for the duration of the rebuild. Callers
    /// on latency-sensitive paths must accept that cost or go through
    /// [`indexing_manager`](Self::indexing_manager) instead.
    fn update_index(&self, context: &SearchContext);

    /// Handle to the manager responsible for background index maintenance.
    fn indexing_manager(&self, context: &SearchContext) -> Arc<dyn IndexingManager>;

    /// Current indexing lifecycle state.
    fn indexing_state(&self, context: &SearchContext) -> IndexingState;

    /// Non-blocking probe; `true` exactly when indexing is complete.
    fn is_indexing_complete(&self, context: &SearchContext) -> bool {
        self.indexing_state(context).is_complete()
    }

    /// The executor shared between all search background tasks.
    fn shared_executor(&self) -> SharedExecutor;

    /// A cancellable task computing ranked scores for `query`.
    ///
    /// Ranking is an optional capability: the default is no task, and
    /// callers must check before use. Concurrent calls for different
    /// queries yield independent tasks with no mutual ordering.
    fn ranker_task(&self, context: &SearchContext, query: &str) -> Option<RankerTask> {
        let _ = (context, query);
        None
    }

    /// Wire a toolbar's click to the search UI.
    ///
    /// A no-op when either argument is absent. Once wired, each click
    /// triggers an asynchronous slice data refresh through the activity's
    /// context and dispatches one navigation request for
    /// [`SEARCH_UI_ACTION`] with [`SEARCH_REQUEST_CODE`].
    fn init_search_toolbar(
        &self,
        activity: Option<&Activity>,
        toolbar: Option<&mut SearchToolbar>,
    ) {
        let (Some(activity), Some(toolbar)) = (activity, toolbar) else {
            return;
        };
        let context = activity.context().clone();
        let navigator = activity.navigator();
        toolbar.set_click_handler(move || {
            tracing::debug!(action = SEARCH_UI_ACTION, "search toolbar activated");
            context.slices().index_slice_data_async(&context);
            navigator.start_activity(SEARCH_UI_ACTION, SEARCH_REQUEST_CODE);
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct BareProvider {
        executor: SharedExecutor,
    }

    impl SearchFeatureProvider for BareProvider {
        fn verify_search_launch(
            &self,
            _context: &SearchContext,
            caller: Option<&CallerId>,
        ) -> Result<(), LaunchError> {
            caller.map(|_| ()).ok_or(LaunchError::MissingCaller)
        }

        fn site_map(&self) -> Arc<dyn SiteMapResolver> {
            struct EmptySiteMap;
            impl SiteMapResolver for EmptySiteMap {
                fn breadcrumb(&self, _page_id: &str) -> Option<Breadcrumb> {
                    None
                }
            }
            Arc::new(EmptySiteMap)
        }

        fn update_index(&self, _context: &SearchContext) {}

        fn indexing_manager(&self, _context: &SearchContext) -> Arc<dyn IndexingManager> {
            struct IdleManager;
            impl IndexingManager for IdleManager {
                fn rebuild(&self, _context: &SearchContext) {}
                fn request_rebuild(&self, _context: &SearchContext) {}
                fn state(&self) -> IndexingState {
                    IndexingState::NotStarted
                }
            }
            Arc::new(IdleManager)
        }

        fn indexing_state(&self, _context: &SearchContext) -> IndexingState {
            IndexingState::NotStarted
        }

        fn shared_executor(&self) -> SharedExecutor {
            self.executor.clone()
        }
    }

    struct CountingSlices {
        requests: AtomicUsize,
    }

    impl SliceDataProvider for CountingSlices {
        fn index_slice_data_async(&self, _context: &SearchContext) {
            self.requests.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct RecordingNavigator {
        requests: Mutex<Vec<(String, i32)>>,
    }

    impl Navigator for RecordingNavigator {
        fn start_activity(&self, action: &str, request_code: i32) {
            self.requests
                .lock()
                .expect("navigator lock")
                .push((action.to_string(), request_code));
        }
    }

    fn fixture() -> (
        BareProvider,
        Arc<CountingSlices>,
        Arc<RecordingNavigator>,
        Activity,
    ) {
        let executor = SharedExecutor::with_workers(1).expect("spawn pool");
        let slices = Arc::new(CountingSlices {
            requests: AtomicUsize::new(0),
        });
        let context = SearchContext::new("settings", Arc::clone(&slices) as _, executor.clone());
        let navigator = Arc::new(RecordingNavigator {
            requests: Mutex::new(Vec::new()),
        });
        let activity = Activity::new(context, Arc::clone(&navigator) as _);
        (BareProvider { executor }, slices, navigator, activity)
    }

    #[test]
    fn default_ranker_task_is_absent() {
        let (provider, _slices, _navigator, activity) = fixture();
        assert!(
            provider
                .ranker_task(activity.context(), "anything")
                .is_none()
        );
    }

    #[test]
    fn toolbar_wiring_is_a_noop_without_both_arguments() {
        let (provider, _slices, _navigator, activity) = fixture();
        let mut toolbar = SearchToolbar::new();

        provider.init_search_toolbar(None, Some(&mut toolbar));
        assert!(!toolbar.has_click_handler());

        provider.init_search_toolbar(Some(&activity), None);
        provider.init_search_toolbar(None, None);
    }

    #[test]
    fn one_click_dispatches_one_navigation_and_one_slice_refresh() {
        let (provider, slices, navigator, activity) = fixture();
        let mut toolbar = SearchToolbar::new();

        provider.init_search_toolbar(Some(&activity), Some(&mut toolbar));
        assert!(toolbar.has_click_handler());
        toolbar.click();

        assert_eq!(slices.requests.load(Ordering::SeqCst), 1);
        let requests = navigator.requests.lock().expect("navigator lock");
        assert_eq!(
            *requests,
            vec![(SEARCH_UI_ACTION.to_string(), SEARCH_REQUEST_CODE)]
        );
    }

    #[test]
    fn boolean_probe_tracks_the_state_enum() {
        let (provider, _slices, _navigator, activity) = fixture();
        assert!(!provider.is_indexing_complete(activity.context()));
    }
}
