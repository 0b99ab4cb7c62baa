//! Record reading logic for the subprocess transport

use std::pin::Pin;
use std::time::Duration;

use futures::{Stream, StreamExt};
use tokio::time::Sleep;
use tokio_util::codec::AnyDelimiterCodecError;
use tokio_util::sync::CancellationToken;

use crate::error::{AntToolsError, Result};
use crate::message::parse_record;
use crate::types::records::Record;

use super::transport::RecordStream;

impl RecordStream {
    /// Pull the next record from the child's output
    ///
    /// Returns `None` once the stream is finished. Items are:
    /// - `Ok(record)` for every line (blank lines only when not skipped)
    /// - `Err(MalformedRecord)` for a line that does not decode; reading continues
    /// - `Err(Read)`, `Err(Cancelled)` or `Err(NonZeroExit)` as the final item
    pub async fn next_record(&mut self) -> Option<Result<Record>> {
        loop {
            if self.finished {
                return None;
            }

            let Some(lines) = self.lines.as_mut() else {
                self.finished = true;
                return None;
            };

            let next = guarded(
                self.cancel.as_ref(),
                self.deadline.as_mut(),
                self.timeout,
                lines.next(),
            )
            .await;

            match next {
                Err(reason) => {
                    log::debug!("Stopping {}: {reason}", self.program.display());
                    self.finished = true;
                    self.terminate().await;
                    return Some(Err(AntToolsError::cancelled(reason)));
                }
                Ok(Some(Ok(chunk))) => {
                    self.line_number += 1;
                    let line = match decode_line(&chunk) {
                        Ok(line) => line,
                        Err(message) => {
                            return Some(Err(AntToolsError::malformed_record(
                                self.line_number,
                                String::from_utf8_lossy(strip_cr(&chunk)),
                                message,
                            )));
                        }
                    };
                    if self.skip_blank_lines && line.trim().is_empty() {
                        continue;
                    }
                    return Some(parse_record(line, self.mode, self.line_number));
                }
                Ok(Some(Err(AnyDelimiterCodecError::MaxChunkLengthExceeded))) => {
                    // The codec cannot resynchronise on line boundaries after this
                    self.line_number += 1;
                    self.finished = true;
                    self.terminate().await;
                    return Some(Err(AntToolsError::malformed_record(
                        self.line_number,
                        String::new(),
                        format!(
                            "line exceeds maximum length of {} bytes",
                            self.max_line_length
                        ),
                    )));
                }
                Ok(Some(Err(AnyDelimiterCodecError::Io(e)))) => {
                    self.finished = true;
                    self.terminate().await;
                    return Some(Err(AntToolsError::Read(e)));
                }
                Ok(None) => {
                    let exit = self.wait_for_exit().await;
                    self.finished = true;
                    return exit.err().map(Err);
                }
            }
        }
    }

    /// Drain the stream, collecting every record
    ///
    /// # Errors
    /// Returns the first error of any kind, after closing the child
    pub async fn collect_records(mut self) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        while let Some(item) = self.next_record().await {
            match item {
                Ok(record) => records.push(record),
                Err(e) => {
                    self.close().await?;
                    return Err(e);
                }
            }
        }
        Ok(records)
    }

    /// Convert into a [`futures::Stream`]
    ///
    /// Dropping the returned stream drops the child with it.
    pub fn into_stream(mut self) -> impl Stream<Item = Result<Record>> + Send {
        async_stream::stream! {
            while let Some(item) = self.next_record().await {
                yield item;
            }
        }
    }
}

fn strip_cr(chunk: &[u8]) -> &[u8] {
    chunk.strip_suffix(b"\r").unwrap_or(chunk)
}

/// Turn one raw line into text, dropping a trailing `\r`
fn decode_line(chunk: &[u8]) -> std::result::Result<String, String> {
    std::str::from_utf8(strip_cr(chunk))
        .map(str::to_owned)
        .map_err(|e| format!("invalid UTF-8: {e}"))
}

/// Run `fut` unless the token fires or the deadline passes first
///
/// The error carries a human-readable reason for the interruption.
pub(super) async fn guarded<F: Future>(
    cancel: Option<&CancellationToken>,
    deadline: Option<&mut Pin<Box<Sleep>>>,
    timeout: Option<Duration>,
    fut: F,
) -> std::result::Result<F::Output, String> {
    let cancelled = async {
        match cancel {
            Some(token) => token.cancelled().await,
            None => std::future::pending().await,
        }
    };
    let expired = async {
        match deadline {
            Some(sleep) => sleep.as_mut().await,
            None => std::future::pending().await,
        }
    };

    tokio::select! {
        biased;
        () = cancelled => Err("cancellation requested".to_string()),
        () = expired => Err(match timeout {
            Some(timeout) => format!("timed out after {timeout:?}"),
            None => "timed out".to_string(),
        }),
        output = fut => Ok(output),
    }
}
