//! Feeds domain names from the input into the job queue.

use std::io;

use log::{debug, info, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::config::MAX_LINE_BYTES;
use crate::error_handling::CheckError;

/// Extracts the domain from one input line.
///
/// Surrounding whitespace is trimmed. Blank lines and `#` comments yield
/// `None` and are never queried.
pub fn parse_domain_line(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        None
    } else {
        Some(trimmed)
    }
}

/// Reads the next line of `input` into `buf`, without its `\n` terminator.
///
/// At most `MAX_LINE_BYTES` (plus the terminator) are buffered; a longer
/// line is an `InvalidData` error, as is a line that is not UTF-8.
/// Returns `None` at end of input.
async fn read_bounded_line<R>(input: &mut R, buf: &mut Vec<u8>) -> io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    let limit = MAX_LINE_BYTES as u64 + 1;
    let read = (&mut *input).take(limit).read_until(b'\n', buf).await?;
    if read == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
    } else if buf.len() > MAX_LINE_BYTES {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("input line exceeds {MAX_LINE_BYTES} bytes"),
        ));
    }
    match std::str::from_utf8(buf) {
        Ok(line) => Ok(Some(line.to_string())),
        Err(e) => Err(io::Error::new(io::ErrorKind::InvalidData, e)),
    }
}

/// Reads `input` line by line and sends each domain to `jobs`.
///
/// `send` waits while the queue is full, so reading never runs further ahead
/// of the workers than the queue capacity. The queue is closed when this
/// function returns and `jobs` is dropped.
///
/// Dispatch stops early, without error, when `cancel` fires or when every
/// worker has gone away.
///
/// # Returns
///
/// The number of domains handed to the queue.
///
/// # Errors
///
/// Returns `CheckError::InputRead` if reading fails before end of input,
/// including a line longer than `MAX_LINE_BYTES`. Domains sent before the
/// failure remain queued.
pub async fn dispatch_domains<R>(
    mut input: R,
    jobs: mpsc::Sender<String>,
    cancel: &CancellationToken,
) -> Result<usize, CheckError>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let mut dispatched = 0usize;

    loop {
        let line = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!("Dispatch cancelled after {dispatched} domains");
                break;
            }
            line = read_bounded_line(&mut input, &mut buf) => line.map_err(CheckError::InputRead)?,
        };
        let Some(line) = line else {
            break;
        };
        let Some(domain) = parse_domain_line(&line) else {
            continue;
        };

        let sent = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!("Dispatch cancelled after {dispatched} domains");
                break;
            }
            sent = jobs.send(domain.to_string()) => sent,
        };
        if sent.is_err() {
            warn!("Job queue closed before input was exhausted, stopping dispatch");
            break;
        }
        dispatched += 1;
    }

    debug!("Dispatched {dispatched} domains");
    Ok(dispatched)
}
