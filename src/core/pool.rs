//! # WorkerPool: fixed workers, one shared unbounded queue.
//!
//! [`WorkerPool`] backs pooled-asynchronous deliveries. A fixed set of
//! worker tasks drains a single unbounded queue of boxed jobs.
//!
//! ## What it guarantees
//! - `submit` returns immediately; it never blocks and never rejects.
//! - Panics inside jobs are caught at the worker boundary (isolation); the
//!   pool keeps running.
//!
//! ## What it does **not** guarantee
//! - No ordering between two jobs, even submitted back-to-back: any idle
//!   worker picks up the next job.
//! - No backpressure: a slow or stuck job grows the queue without bound.
//!   Deliberate simplicity tradeoff, documented rather than "fixed".
//!
//! ## Diagram
//! ```text
//!    submit(job)
//!        │
//!        └──► [unbounded queue] ─┬─► worker 1 ─► job.await
//!                                ├─► worker 2 ─► job.await
//!                                └─► worker N ─► job.await
//! ```

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};

use futures::FutureExt;
use tokio::{
    sync::{mpsc, Mutex},
    task::JoinHandle,
};

/// A boxed unit of work for the pool.
pub type Job = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Fixed-size worker pool with an unbounded submission queue.
pub struct WorkerPool {
    /// `None` once shut down; the sender drop is what closes the queue.
    tx: StdMutex<Option<mpsc::UnboundedSender<Job>>>,
    workers: StdMutex<Vec<JoinHandle<()>>>,
    count: usize,
}

impl WorkerPool {
    /// Creates a pool and spawns `workers` worker tasks (clamped to ≥ 1).
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn new(workers: usize) -> Self {
        let workers = workers.max(1);
        let (tx, rx) = mpsc::unbounded_channel::<Job>();
        let rx = Arc::new(Mutex::new(rx));

        let mut handles = Vec::with_capacity(workers);
        for id in 0..workers {
            let rx = Arc::clone(&rx);
            handles.push(tokio::spawn(async move {
                loop {
                    // Lock only to dequeue; the job runs lock-free so other
                    // workers keep draining while this one is busy.
                    let job = { rx.lock().await.recv().await };
                    let Some(job) = job else { break };
                    if let Err(panic_err) = AssertUnwindSafe(job).catch_unwind().await {
                        eprintln!("[typebus] worker {id} caught a job panic: {panic_err:?}");
                    }
                }
            }));
        }

        Self {
            tx: StdMutex::new(Some(tx)),
            workers: StdMutex::new(handles),
            count: workers,
        }
    }

    /// Enqueues a job; never blocks, never rejects.
    ///
    /// After [`shutdown`](WorkerPool::shutdown) the queue is closed and the
    /// job is dropped with a last-resort message.
    pub fn submit(&self, job: Job) {
        let guard = self.tx.lock().unwrap_or_else(PoisonError::into_inner);
        match guard.as_ref() {
            Some(tx) if tx.send(job).is_ok() => {}
            _ => eprintln!("[typebus] worker pool is shut down; job dropped"),
        }
    }

    /// Number of worker tasks.
    #[must_use]
    pub fn workers(&self) -> usize {
        self.count
    }

    /// Graceful shutdown: close the queue and await worker completion.
    ///
    /// Already-queued jobs still run to completion; jobs submitted after
    /// this are dropped. Works on a shared handle, so a pool handed to a
    /// bus can still be drained (see `EventBus::shutdown`). Idempotent.
    pub async fn shutdown(&self) {
        self.tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let drained: Vec<JoinHandle<()>> = {
            let mut workers = self.workers.lock().unwrap_or_else(PoisonError::into_inner);
            workers.drain(..).collect()
        };
        for handle in drained {
            let _ = handle.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    async fn eventually(check: impl Fn() -> bool) -> bool {
        for _ in 0..200 {
            if check() {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        check()
    }

    #[tokio::test]
    async fn runs_submitted_jobs() {
        let pool = WorkerPool::new(2);
        let done = Arc::new(AtomicU32::new(0));
        for _ in 0..10 {
            let done = Arc::clone(&done);
            pool.submit(Box::pin(async move {
                done.fetch_add(1, Ordering::SeqCst);
            }));
        }
        assert!(eventually(|| done.load(Ordering::SeqCst) == 10).await);
    }

    #[tokio::test]
    async fn a_panicking_job_does_not_kill_the_pool() {
        let pool = WorkerPool::new(1);
        pool.submit(Box::pin(async {
            panic!("job blew up");
        }));

        let done = Arc::new(AtomicU32::new(0));
        let observed = Arc::clone(&done);
        pool.submit(Box::pin(async move {
            observed.fetch_add(1, Ordering::SeqCst);
        }));
        assert!(eventually(|| done.load(Ordering::SeqCst) == 1).await);
    }

    #[tokio::test]
    async fn shutdown_drains_queued_jobs() {
        let pool = WorkerPool::new(2);
        let done = Arc::new(AtomicU32::new(0));
        for _ in 0..5 {
            let done = Arc::clone(&done);
            pool.submit(Box::pin(async move {
                done.fetch_add(1, Ordering::SeqCst);
            }));
        }
        pool.shutdown().await;
        assert_eq!(done.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn worker_count_is_clamped() {
        let pool = WorkerPool::new(0);
        assert_eq!(pool.workers(), 1);
        pool.shutdown().await;
    }

    #[tokio::test]
    async fn jobs_submitted_after_shutdown_are_dropped() {
        let pool = WorkerPool::new(1);
        pool.shutdown().await;

        let done = Arc::new(AtomicU32::new(0));
        let observed = Arc::clone(&done);
        pool.submit(Box::pin(async move {
            observed.fetch_add(1, Ordering::SeqCst);
        }));

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(done.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn shutdown_twice_is_harmless() {
        let pool = WorkerPool::new(2);
        pool.shutdown().await;
        pool.shutdown().await;
        assert_eq!(pool.workers(), 2);
    }
}
