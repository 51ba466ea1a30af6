use std::sync::{Arc, Condvar, Mutex};

use crate::types::RankedScore;

type Compute = Box<dyn FnOnce(&str) -> Vec<RankedScore> + Send>;

enum TaskState {
    Pending,
    Running,
    Finished(Vec<RankedScore>),
    Cancelled,
}

/// A cancellable, awaitable unit of ranking work.
///
/// Handles are cheap clones of shared state so one clone can be submitted to
/// the shared executor while the originating caller awaits the outcome. The
/// computation runs at most once; cancellation wins any race with it.
#[derive(Clone)]
pub struct RankerTask {
    inner: Arc<TaskInner>,
}

struct TaskInner {
    query: String,
    compute: Mutex<Option<Compute>>,
    state: Mutex<TaskState>,
    done: Condvar,
}

impl RankerTask {
    #[must_use]
    pub fn new<F>(query: impl Into<String>, compute: F) -> Self
    where
        F: FnOnce(&str) -> Vec<RankedScore> + Send + 'static,
    {
        Self {
            inner: Arc::new(TaskInner {
                query: query.into(),
                compute: Mutex::new(Some(Box::new(compute))),
                state: Mutex::new(TaskState::Pending),
                done: Condvar::new(),
            }),
        }
    }

    /// The free-text query this task ranks.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.inner.query
    }

    /// Execute the computation.
    ///
    /// A no-op when the task was cancelled or has already run.
    pub fn run(&self) {
        {
            let Ok(mut state) = self.inner.state.lock() else {
                return;
            };
            match *state {
                TaskState::Pending => *state = TaskState::Running,
                _ => return,
            }
        }

        let compute = match self.inner.compute.lock() {
            Ok(mut slot) => slot.take(),
            Err(_) => None,
        };
        let scores = compute.map(|f| f(&self.inner.query)).unwrap_or_default();

        if let Ok(mut state) = self.inner.state.lock() {
            // A cancel that raced the computation wins; the result is dropped.
            if matches!(*state, TaskState::Running) {
                *state = TaskState::Finished(scores);
            }
        }
        self.inner.done.notify_all();
    }

    /// Cancel the task and wake any waiters. An already finished result is
    /// kept.
    pub fn cancel(&self) {
        if let Ok(mut state) = self.inner.state.lock()
            && !matches!(*state, TaskState::Finished(_))
        {
            *state = TaskState::Cancelled;
        }
        self.inner.done.notify_all();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner
            .state
            .lock()
            .map(|state| matches!(*state, TaskState::Cancelled))
            .unwrap_or(false)
    }

    /// Block until the task finishes or is cancelled; `None` on cancellation.
    #[must_use]
    pub fn wait(&self) -> Option<Vec<RankedScore>> {
        let Ok(mut state) = self.inner.state.lock() else {
            return None;
        };
        loop {
            match &*state {
                TaskState::Finished(scores) => return Some(scores.clone()),
                TaskState::Cancelled => return None,
                TaskState::Pending | TaskState::Running => {}
            }
            state = self.inner.done.wait(state).ok()?;
        }
    }

    /// Non-blocking probe for a finished result.
    #[must_use]
    pub fn try_scores(&self) -> Option<Vec<RankedScore>> {
        let state = self.inner.state.lock().ok()?;
        match &*state {
            TaskState::Finished(scores) => Some(scores.clone()),
            _ => None,
        }
    }
}
