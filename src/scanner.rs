use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinSet;

use crate::config::DEFAULT_CONCURRENCY;
use crate::target::ScanTarget;
use crate::types::ScanResult;

type TargetQueue = Arc<Mutex<mpsc::UnboundedReceiver<ScanTarget>>>;

#[async_trait]
pub trait Classifier: Send + Sync {
    /// Check one target. Failures are folded into the result, never returned.
    async fn classify(&self, target: &ScanTarget) -> ScanResult;
}

/// Fixed-size worker pool that runs a [`Classifier`] over a target list.
pub struct Scheduler<C: ?Sized> {
    classifier: Arc<C>,
    concurrency: usize,
}

impl<C> Scheduler<C>
where
    C: Classifier + ?Sized + 'static,
{
    pub fn new(classifier: Arc<C>) -> Self {
        Self {
            classifier,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Classify every target exactly once and return the results in
    /// completion order.
    ///
    /// The queue is filled and closed before any worker starts. This returns
    /// only after all workers have exited, so the result set is complete.
    pub async fn run(&self, targets: Vec<ScanTarget>) -> Vec<ScanResult> {
        let total = targets.len();
        log::debug!("[scanner] run: targets={} concurrency={}", total, self.concurrency);

        let (queue_tx, queue_rx) = mpsc::unbounded_channel();
        for target in targets {
            if let Err(mpsc::error::SendError(target)) = queue_tx.send(target) {
                log::error!("[scanner] enqueue_failed: target={}", target);
            }
        }
        drop(queue_tx);
        let queue: TargetQueue = Arc::new(Mutex::new(queue_rx));

        let (results_tx, mut results_rx) = mpsc::unbounded_channel();
        let scan_start = Instant::now();

        let mut workers = JoinSet::new();
        for worker_id in 0..self.concurrency {
            workers.spawn(worker(
                worker_id,
                Arc::clone(&queue),
                results_tx.clone(),
                Arc::clone(&self.classifier),
            ));
        }
        drop(results_tx);

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                log::error!("[scanner] worker_failed: error={}", e);
            }
        }

        let mut results = Vec::with_capacity(total);
        while let Some(result) = results_rx.recv().await {
            results.push(result);
        }

        if results.len() != total {
            log::warn!("[scanner] result_count_mismatch: expected={} actual={}", total, results.len());
        }
        log::debug!("[scanner] run_completed: results={} duration={}ms",
            results.len(), scan_start.elapsed().as_millis());

        results
    }
}

async fn worker<C>(
    worker_id: usize,
    queue: TargetQueue,
    results: mpsc::UnboundedSender<ScanResult>,
    classifier: Arc<C>,
) where
    C: Classifier + ?Sized + 'static,
{
    let mut processed = 0usize;

    loop {
        let next = queue.lock().await.recv().await;
        let Some(target) = next else {
            break;
        };

        let result = classify_isolated(Arc::clone(&classifier), target).await;
        processed += 1;

        if results.send(result).is_err() {
            log::warn!("[scanner] collector_closed: worker={}", worker_id);
            break;
        }
    }

    log::trace!("[scanner] worker_exited: worker={} processed={}", worker_id, processed);
}

/// Run one classification on its own task so a panic becomes a failed
/// result for that target instead of taking the worker down.
async fn classify_isolated<C>(classifier: Arc<C>, target: ScanTarget) -> ScanResult
where
    C: Classifier + ?Sized + 'static,
{
    let owned = target.clone();
    let handle = tokio::spawn(async move { classifier.classify(&owned).await });

    match handle.await {
        Ok(result) => result,
        Err(e) => {
            log::error!("[scanner] classify_aborted: target={} error={}", target, e);
            ScanResult::failed(target, format!("classification aborted: {}", e))
        }
    }
}
