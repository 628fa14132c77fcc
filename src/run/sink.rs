//! Streams inspection results to the output.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};
use tokio::sync::mpsc;

use crate::error_handling::CheckError;
use crate::export::{format_row, CSV_HEADER};
use crate::inspect::InspectionResult;

/// Tally of the rows a sink has written.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SinkSummary {
    /// Result rows written (header excluded)
    pub written: usize,
    /// Rows with `hasMX = true`
    pub with_mx: usize,
    /// Rows with `hasSPF = true`
    pub with_spf: usize,
    /// Rows with `hasDMARC = true`
    pub with_dmarc: usize,
}

impl SinkSummary {
    fn record(&mut self, result: &InspectionResult) {
        self.written += 1;
        self.with_mx += usize::from(result.has_mx);
        self.with_spf += usize::from(result.has_spf);
        self.with_dmarc += usize::from(result.has_dmarc);
    }
}

/// Writes the header and then one row per result as results arrive.
///
/// Every row is flushed before the next one is awaited, so partial progress
/// is visible even if the run later fails.
pub struct ResultSink<W> {
    writer: BufWriter<W>,
    completed: Arc<AtomicUsize>,
}

impl<W: AsyncWrite + Unpin> ResultSink<W> {
    /// Creates a sink; `completed` is incremented after each written row.
    pub fn new(writer: W, completed: Arc<AtomicUsize>) -> Self {
        Self {
            writer: BufWriter::new(writer),
            completed,
        }
    }

    /// Consumes `results` until every sender is gone.
    ///
    /// The receiver is dropped on return, including on error, which tells the
    /// workers to stop.
    ///
    /// # Errors
    ///
    /// Returns `CheckError::OutputWrite` on the first failed write or flush.
    pub async fn drain(
        mut self,
        mut results: mpsc::Receiver<InspectionResult>,
    ) -> Result<SinkSummary, CheckError> {
        self.write_line(CSV_HEADER).await?;

        let mut summary = SinkSummary::default();
        while let Some(result) = results.recv().await {
            self.write_line(&format_row(&result)).await?;
            summary.record(&result);
            self.completed.fetch_add(1, Ordering::SeqCst);
        }
        Ok(summary)
    }

    async fn write_line(&mut self, line: &str) -> Result<(), CheckError> {
        self.writer
            .write_all(line.as_bytes())
            .await
            .map_err(CheckError::OutputWrite)?;
        self.writer
            .write_all(b"\n")
            .await
            .map_err(CheckError::OutputWrite)?;
        self.writer.flush().await.map_err(CheckError::OutputWrite)
    }
}
