//! Bounded worker pool.
//!
//! A fixed number of tokio tasks share one job queue receiver. Each worker
//! takes a domain, inspects it and sends the result on, until the queue is
//! closed and drained. The number of workers is the upper bound on domains
//! being inspected at any moment.

use std::sync::Arc;

use log::{debug, error, warn};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;

use crate::dns::MailResolver;
use crate::error_handling::{ErrorType, ProcessingStats};
use crate::inspect::{inspect_domain, InspectionResult};

/// Shared receiving end of the job queue.
type JobQueue = Arc<Mutex<mpsc::Receiver<String>>>;

/// Running workers of one check.
pub struct WorkerPool {
    workers: JoinSet<usize>,
}

/// What the workers did, collected once all of them have exited.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PoolOutcome {
    /// Results handed to the result stream
    pub processed: usize,
    /// Workers that terminated abnormally
    pub failed_workers: usize,
}

impl WorkerPool {
    /// Starts `size` workers consuming `jobs` and producing into `results`.
    ///
    /// Every worker holds a clone of `results`; the result stream closes once
    /// all workers have exited.
    pub fn spawn(
        size: usize,
        jobs: mpsc::Receiver<String>,
        results: mpsc::Sender<InspectionResult>,
        resolver: Arc<dyn MailResolver>,
        stats: Arc<ProcessingStats>,
    ) -> Self {
        let jobs: JobQueue = Arc::new(Mutex::new(jobs));
        let mut workers = JoinSet::new();
        for id in 0..size {
            workers.spawn(run_worker(
                id,
                Arc::clone(&jobs),
                results.clone(),
                Arc::clone(&resolver),
                Arc::clone(&stats),
            ));
        }
        debug!("Started {size} workers");
        Self { workers }
    }

    /// Waits for every worker to exit.
    ///
    /// Workers exit when the job queue is closed and empty, or when the result
    /// stream has no receiver left.
    pub async fn join(mut self) -> PoolOutcome {
        let mut outcome = PoolOutcome::default();
        while let Some(joined) = self.workers.join_next().await {
            match joined {
                Ok(processed) => outcome.processed += processed,
                Err(e) => {
                    error!("Worker terminated abnormally: {e}");
                    outcome.failed_workers += 1;
                }
            }
        }
        outcome
    }
}

async fn run_worker(
    id: usize,
    jobs: JobQueue,
    results: mpsc::Sender<InspectionResult>,
    resolver: Arc<dyn MailResolver>,
    stats: Arc<ProcessingStats>,
) -> usize {
    let mut processed = 0usize;
    loop {
        // The lock is released at the end of this statement
        let next = jobs.lock().await.recv().await;
        let Some(domain) = next else {
            break;
        };

        let result = inspect_isolated(domain, &resolver, &stats).await;
        if results.send(result).await.is_err() {
            warn!("Result stream closed, worker {id} stopping");
            break;
        }
        processed += 1;
    }
    debug!("Worker {id} finished after {processed} domains");
    processed
}

/// Runs one inspection in its own task so a panic only costs that domain.
///
/// A panicked inspection yields an all-negative result.
async fn inspect_isolated(
    domain: String,
    resolver: &Arc<dyn MailResolver>,
    stats: &Arc<ProcessingStats>,
) -> InspectionResult {
    let task = tokio::spawn({
        let domain = domain.clone();
        let resolver = Arc::clone(resolver);
        let stats = Arc::clone(stats);
        async move { inspect_domain(&domain, resolver.as_ref(), &stats).await }
    });

    match task.await {
        Ok(result) => result,
        Err(e) => {
            error!("Inspection of {domain} did not complete: {e}");
            stats.increment_error(ErrorType::InspectionPanic);
            InspectionResult::absent(domain)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::LookupError;
    use crate::test_helpers::StubResolver;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    async fn run_pool(
        size: usize,
        domains: &[&str],
        resolver: Arc<dyn MailResolver>,
    ) -> (Vec<InspectionResult>, PoolOutcome, Arc<ProcessingStats>) {
        let (jobs_tx, jobs_rx) = mpsc::channel(size);
        let (results_tx, mut results_rx) = mpsc::channel(size);
        let stats = Arc::new(ProcessingStats::new());
        let pool = WorkerPool::spawn(size, jobs_rx, results_tx, resolver, Arc::clone(&stats));

        let domains: Vec<String> = domains.iter().map(|d| d.to_string()).collect();
        let producer = tokio::spawn(async move {
            for domain in domains {
                jobs_tx.send(domain).await.unwrap();
            }
        });

        let mut results = Vec::new();
        while let Some(result) = results_rx.recv().await {
            results.push(result);
        }
        producer.await.unwrap();
        let outcome = pool.join().await;
        (results, outcome, stats)
    }

    #[tokio::test]
    async fn test_pool_yields_one_result_per_job() {
        let resolver = Arc::new(StubResolver::new().with_mx("a.com", &[(10, "mx.a.com.")]));
        let domains: Vec<String> = (0..50).map(|i| format!("d{i}.example")).collect();
        let refs: Vec<&str> = domains.iter().map(String::as_str).collect();

        let (results, outcome, _) = run_pool(4, &refs, resolver).await;

        assert_eq!(results.len(), 50);
        assert_eq!(outcome.processed, 50);
        assert_eq!(outcome.failed_workers, 0);
        let mut seen: Vec<String> = results.into_iter().map(|r| r.domain).collect();
        seen.sort();
        let mut expected = domains.clone();
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[tokio::test]
    async fn test_pool_result_stream_closes_with_no_jobs() {
        let resolver = Arc::new(StubResolver::new());
        let (results, outcome, _) = run_pool(3, &[], resolver).await;
        assert!(results.is_empty());
        assert_eq!(outcome, PoolOutcome::default());
    }

    /// Tracks how many lookups run at once.
    struct SlowResolver {
        active: AtomicUsize,
        peak: AtomicUsize,
    }

    impl SlowResolver {
        async fn slow_answer(&self) {
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.active.fetch_sub(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl MailResolver for SlowResolver {
        async fn lookup_mx(&self, _name: &str) -> Result<Vec<(u16, String)>, LookupError> {
            self.slow_answer().await;
            Ok(Vec::new())
        }

        async fn lookup_txt(&self, _name: &str) -> Result<Vec<String>, LookupError> {
            self.slow_answer().await;
            Ok(Vec::new())
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_pool_bounds_concurrent_lookups() {
        let resolver = Arc::new(SlowResolver {
            active: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        });
        let domains: Vec<String> = (0..40).map(|i| format!("d{i}.example")).collect();
        let refs: Vec<&str> = domains.iter().map(String::as_str).collect();

        let (results, _, _) = run_pool(2, &refs, resolver.clone()).await;

        assert_eq!(results.len(), 40);
        // Two workers, three lookups per domain
        assert!(resolver.peak.load(Ordering::SeqCst) <= 6);
    }

    /// Panics for one specific name.
    struct PanickingResolver;

    #[async_trait]
    impl MailResolver for PanickingResolver {
        async fn lookup_mx(&self, name: &str) -> Result<Vec<(u16, String)>, LookupError> {
            if name == "boom.example" {
                panic!("resolver bug");
            }
            Ok(vec![(10, format!("mx.{name}."))])
        }

        async fn lookup_txt(&self, _name: &str) -> Result<Vec<String>, LookupError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_pool_survives_panicking_inspection() {
        let (results, outcome, stats) = run_pool(
            1,
            &["a.example", "boom.example", "b.example"],
            Arc::new(PanickingResolver),
        )
        .await;

        assert_eq!(results.len(), 3);
        assert_eq!(outcome.failed_workers, 0);
        let boom = results
            .iter()
            .find(|r| r.domain == "boom.example")
            .unwrap();
        assert_eq!(*boom, InspectionResult::absent("boom.example"));
        assert!(results
            .iter()
            .filter(|r| r.domain != "boom.example")
            .all(|r| r.has_mx));
        assert_eq!(stats.get_error_count(ErrorType::InspectionPanic), 1);
    }

    #[tokio::test]
    async fn test_workers_stop_when_result_stream_closes() {
        let (jobs_tx, jobs_rx) = mpsc::channel(2);
        let (results_tx, results_rx) = mpsc::channel(2);
        drop(results_rx);
        let pool = WorkerPool::spawn(
            2,
            jobs_rx,
            results_tx,
            Arc::new(StubResolver::new()),
            Arc::new(ProcessingStats::new()),
        );

        jobs_tx.send("a.example".to_string()).await.unwrap();
        jobs_tx.send("b.example".to_string()).await.unwrap();

        let outcome = tokio::time::timeout(Duration::from_secs(5), pool.join())
            .await
            .expect("workers should exit once nobody reads results");
        assert_eq!(outcome.processed, 0);
        // Every worker is gone, so the queue is closed for the producer too
        assert!(jobs_tx.send("c.example".to_string()).await.is_err());
    }
}
