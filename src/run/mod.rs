//! Check orchestration.
//!
//! A run moves through three phases:
//!
//! 1. **Filling**: the dispatcher reads domains into the bounded job queue
//!    while workers inspect them and the sink writes results.
//! 2. **Draining**: input is exhausted (or cancelled) and the job queue is
//!    closed; workers finish the remaining jobs.
//! 3. **Done**: every worker has been joined, so the result stream is closed
//!    and the sink has written the last row.
//!
//! Every dispatched domain produces exactly one row before the run reports
//! success.

mod dispatcher;
mod sink;
mod worker;

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{debug, info};
use tokio::io::{AsyncBufRead, AsyncWrite, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::app::{
    print_error_statistics, print_simple_summary, shutdown_gracefully, spawn_interrupt_watcher,
    spawn_progress_logger,
};
use crate::config::{Config, LOGGING_INTERVAL_SECS};
use crate::dns::MailResolver;
use crate::error_handling::{CheckError, ProcessingStats};
use crate::initialization::init_resolver;
use crate::inspect::InspectionResult;

pub use dispatcher::{dispatch_domains, parse_domain_line};
pub use sink::{ResultSink, SinkSummary};
pub use worker::{PoolOutcome, WorkerPool};

/// Summary of a completed check.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    /// Domains dispatched, equal to the number of rows written
    pub total_domains: usize,
    /// Rows with an MX record
    pub with_mx: usize,
    /// Rows with an SPF record
    pub with_spf: usize,
    /// Rows with a DMARC record
    pub with_dmarc: usize,
    /// Lookups that failed (timeouts, SERVFAIL, ...) across all domains
    pub lookup_failures: usize,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
}

/// Tuning for [`check_domains`].
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Number of workers, also the capacity of the job queue
    pub workers: usize,
    /// Log progress at this interval; `None` disables progress lines
    pub progress_interval: Option<Duration>,
}

impl CheckOptions {
    /// Options with `workers` workers and no progress logging.
    pub fn new(workers: usize) -> Self {
        Self {
            workers,
            progress_interval: None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Filling,
    Draining,
    Done,
}

/// Runs a check with the provided configuration.
///
/// Opens the configured input and output (stdin/stdout by default),
/// initializes the system resolver and checks every domain. Ctrl-C stops
/// reading input; queued domains are still written.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the input or output
/// cannot be opened, or the run fails with a [`CheckError`].
pub async fn run_check(config: Config) -> Result<CheckReport> {
    config
        .validate()
        .context("Configuration validation failed")?;

    // Resolved once; never re-read during the run
    let workers = config.worker_count();

    let input: Box<dyn AsyncBufRead + Unpin + Send> = match config.input_path() {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open input file {}", path.display()))?;
            info!("Reading domains from {}", path.display());
            Box::new(BufReader::new(file))
        }
        None => {
            info!("Reading domains from stdin");
            Box::new(BufReader::new(tokio::io::stdin()))
        }
    };

    let output: Box<dyn AsyncWrite + Unpin + Send> = match config.output_path() {
        Some(path) => Box::new(
            tokio::fs::File::create(path)
                .await
                .with_context(|| format!("Failed to create output file {}", path.display()))?,
        ),
        None => Box::new(tokio::io::stdout()),
    };

    let resolver: Arc<dyn MailResolver> = init_resolver(
        Duration::from_secs(config.dns_timeout_secs),
        config.dns_attempts,
    );

    let cancel = CancellationToken::new();
    let interrupt_watcher = spawn_interrupt_watcher(cancel.clone());

    let options = CheckOptions {
        workers,
        progress_interval: Some(Duration::from_secs(LOGGING_INTERVAL_SECS)),
    };
    let result = check_domains(input, output, resolver, options, cancel).await;
    interrupt_watcher.abort();

    let report = result?;
    print_simple_summary(&report);
    Ok(report)
}

/// Checks every domain read from `input` and writes one row per domain to `output`.
///
/// This is the engine behind [`run_check`], usable with any async reader,
/// writer and resolver. `cancel` stops dispatching early; the run then
/// completes normally with the domains already queued.
///
/// # Errors
///
/// - `CheckError::OutputWrite` if writing fails; workers and dispatcher stop.
/// - `CheckError::InputRead` if reading fails; queued domains are still written first.
/// - `CheckError::IncompleteRun` if fewer rows were written than domains dispatched.
pub async fn check_domains<R, W>(
    input: R,
    output: W,
    resolver: Arc<dyn MailResolver>,
    options: CheckOptions,
    cancel: CancellationToken,
) -> Result<CheckReport, CheckError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let start_time = Instant::now();
    let workers = options.workers.max(1);
    let stats = Arc::new(ProcessingStats::new());
    let completed = Arc::new(AtomicUsize::new(0));

    // Sink failures stop dispatching without cancelling the caller's token
    let run_cancel = cancel.child_token();

    let progress_cancel = CancellationToken::new();
    let progress_task = options.progress_interval.map(|interval| {
        spawn_progress_logger(
            start_time,
            Arc::clone(&completed),
            interval,
            progress_cancel.clone(),
        )
    });

    let (jobs_tx, jobs_rx) = mpsc::channel::<String>(workers);
    let (results_tx, results_rx) = mpsc::channel::<InspectionResult>(workers);

    debug!("{:?}: {workers} workers", Phase::Filling);
    let pool = WorkerPool::spawn(workers, jobs_rx, results_tx, resolver, Arc::clone(&stats));
    let sink = ResultSink::new(output, Arc::clone(&completed));

    let producer = async {
        // jobs_tx moves into the dispatcher, closing the queue when it returns
        let dispatched = dispatch_domains(input, jobs_tx, &run_cancel).await;
        debug!("{:?}: job queue closed", Phase::Draining);
        let outcome = pool.join().await;
        (dispatched, outcome)
    };
    let consumer = async {
        let summary = sink.drain(results_rx).await;
        if summary.is_err() {
            run_cancel.cancel();
        }
        summary
    };

    let ((dispatched, outcome), summary) = tokio::join!(producer, consumer);
    debug!(
        "{:?}: {} results from workers, {} abnormal worker exits",
        Phase::Done,
        outcome.processed,
        outcome.failed_workers
    );

    shutdown_gracefully(progress_cancel, progress_task).await;

    let summary = summary?;
    let dispatched = dispatched?;
    if summary.written != dispatched {
        return Err(CheckError::IncompleteRun {
            dispatched,
            written: summary.written,
        });
    }

    print_error_statistics(&stats);

    Ok(CheckReport {
        total_domains: dispatched,
        with_mx: summary.with_mx,
        with_spf: summary.with_spf,
        with_dmarc: summary.with_dmarc,
        lookup_failures: stats.total_errors(),
        elapsed_seconds: start_time.elapsed().as_secs_f64(),
    })
}
