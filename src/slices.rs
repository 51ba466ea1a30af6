use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use settings_search_api::{SearchContext, SliceDataProvider};

type RefreshFn = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct SliceCounters {
    requested: AtomicUsize,
    completed: AtomicUsize,
}

/// Slice refresh trigger that runs the actual work on the shared executor.
///
/// The slice store behind the refresh is external; this type guarantees the
/// request leaves the calling thread and keeps request/completion counts
/// observable for status displays and tests.
#[derive(Default)]
pub struct ExecutorSliceIndexer {
    refresh: Option<RefreshFn>,
    counters: Arc<SliceCounters>,
}

impl ExecutorSliceIndexer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the refresh routine executed once per request.
    #[must_use]
    pub fn with_refresh<F>(refresh: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            refresh: Some(Arc::new(refresh)),
            counters: Arc::default(),
        }
    }

    /// Number of refreshes requested so far.
    #[must_use]
    pub fn requested(&self) -> usize {
        self.counters.requested.load(Ordering::SeqCst)
    }

    /// Number of refreshes that have finished running.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.counters.completed.load(Ordering::SeqCst)
    }
}

impl SliceDataProvider for ExecutorSliceIndexer {
    fn index_slice_data_async(&self, context: &SearchContext) {
        self.counters.requested.fetch_add(1, Ordering::SeqCst);
        tracing::debug!("slice data refresh requested");

        let counters = Arc::clone(&self.counters);
        let refresh = self.refresh.clone();
        context.executor().execute(move || {
            if let Some(refresh) = refresh {
                refresh();
            }
            counters.completed.fetch_add(1, Ordering::SeqCst);
        });
    }
}
