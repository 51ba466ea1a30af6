use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use anyhow::{Context as _, Result};

use crate::task::RankerTask;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Cloneable handle to the worker pool shared by all search background work.
///
/// Indexing maintenance, slice refreshes and ranking tasks are all submitted
/// through clones of the same handle; callers must not assume exclusive
/// ownership. The pool shuts down once the last handle is dropped.
#[derive(Clone)]
pub struct SharedExecutor {
    inner: Arc<Inner>,
}

struct Inner {
    sender: Mutex<Option<Sender<Job>>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl SharedExecutor {
    pub const DEFAULT_WORKERS: usize = 2;

    /// Spawn a pool with [`DEFAULT_WORKERS`](Self::DEFAULT_WORKERS) threads.
    pub fn new() -> Result<Self> {
        Self::with_workers(Self::DEFAULT_WORKERS)
    }

    /// Spawn a pool with `workers` threads (at least one).
    pub fn with_workers(workers: usize) -> Result<Self> {
        let workers = workers.max(1);
        let (tx, rx) = mpsc::channel::<Job>();
        let rx = Arc::new(Mutex::new(rx));

        let mut handles = Vec::with_capacity(workers);
        for index in 0..workers {
            let rx = Arc::clone(&rx);
            let handle = thread::Builder::new()
                .name(format!("search-worker-{index}"))
                .spawn(move || worker_loop(&rx))
                .with_context(|| format!("failed to spawn search worker {index}"))?;
            handles.push(handle);
        }
        tracing::debug!(workers, "shared search executor started");

        Ok(Self {
            inner: Arc::new(Inner {
                sender: Mutex::new(Some(tx)),
                workers: Mutex::new(handles),
            }),
        })
    }

    /// Submit a job to the pool.
    ///
    /// Jobs from concurrently cloned handles interleave without ordering
    /// guarantees. Submitting to an already shut down pool silently drops
    /// the job, matching the best-effort contract of background search work.
    pub fn execute<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let Ok(sender) = self.inner.sender.lock() else {
            return;
        };
        if let Some(tx) = sender.as_ref() {
            let _ = tx.send(Box::new(job));
        }
    }

    /// Submit a ranker task's computation to the pool.
    pub fn spawn_task(&self, task: &RankerTask) {
        let task = task.clone();
        self.execute(move || task.run());
    }
}

fn worker_loop(rx: &Mutex<Receiver<Job>>) {
    loop {
        let job = {
            let Ok(guard) = rx.lock() else {
                return;
            };
            guard.recv()
        };
        match job {
            Ok(job) => job(),
            Err(_) => return,
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Ok(mut sender) = self.sender.lock() {
            sender.take();
        }
        if let Ok(mut workers) = self.workers.lock() {
            for handle in workers.drain(..) {
                let _ = handle.join();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn submitted_jobs_run_to_completion() {
        let counter = Arc::new(AtomicUsize::new(0));
        {
            let executor = SharedExecutor::with_workers(1).expect("spawn pool");
            for _ in 0..8 {
                let counter = Arc::clone(&counter);
                executor.execute(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                });
            }
        }
        // Dropping the last handle joins the workers, so all jobs have run.
        assert_eq!(counter.load(Ordering::SeqCst), 8);
    }

    #[test]
    fn cloned_handles_feed_the_same_pool() {
        let counter = Arc::new(AtomicUsize::new(0));
        {
            let executor = SharedExecutor::with_workers(2).expect("spawn pool");
            let clone = executor.clone();
            let jobs: Vec<_> = (0..4)
                .map(|index| {
                    let handle = if index % 2 == 0 {
                        executor.clone()
                    } else {
                        clone.clone()
                    };
                    let counter = Arc::clone(&counter);
                    thread::spawn(move || {
                        handle.execute(move || {
                            counter.fetch_add(1, Ordering::SeqCst);
                        });
                    })
                })
                .collect();
            for job in jobs {
                job.join().expect("submitter thread");
            }
        }
        assert_eq!(counter.load(Ordering::SeqCst), 4);
    }
}
