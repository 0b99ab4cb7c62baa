//! Lifecycle management for the subprocess transport (spawn, exit, close)

use std::path::PathBuf;
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::process::ChildStderr;
use tokio::task::JoinHandle;
use tokio_util::codec::{AnyDelimiterCodec, FramedRead};
use tokio_util::sync::CancellationToken;

use crate::error::{AntToolsError, Result};
use crate::types::options::AdapterOptions;
use crate::types::records::OutputMode;

use super::command::CommandBuilder;
use super::config::{MAX_CAPTURED_STDERR, STDERR_DRAIN_GRACE};
use super::transport::RecordStream;

impl RecordStream {
    /// Spawn the child process and wire up its pipes
    ///
    /// # Errors
    /// Returns error if the process cannot be started or its stdout is missing
    pub(super) async fn spawn_impl(
        program: PathBuf,
        args: &[String],
        options: &AdapterOptions,
        mode: OutputMode,
        skip_blank_lines: bool,
        timeout: Option<Duration>,
        cancel: Option<CancellationToken>,
    ) -> Result<Self> {
        let builder = CommandBuilder::new(&program, args, options);
        let mut cmd = builder.build();

        log::debug!(
            "Spawning {} with {} argument(s) in {mode} mode",
            program.display(),
            builder.effective_args().len()
        );

        let mut child = cmd.spawn().map_err(|e| {
            if let Some(ref cwd) = options.cwd
                && !cwd.exists()
            {
                return AntToolsError::Spawn {
                    path: program.clone(),
                    source: std::io::Error::new(
                        e.kind(),
                        format!("working directory does not exist: {}", cwd.display()),
                    ),
                };
            }
            if e.kind() == std::io::ErrorKind::NotFound {
                return AntToolsError::executable_not_found(&program, e.to_string());
            }
            AntToolsError::Spawn {
                path: program.clone(),
                source: e,
            }
        })?;

        let pid = child.id();

        let stdout = child.stdout.take().ok_or_else(|| AntToolsError::Spawn {
            path: program.clone(),
            source: std::io::Error::other("failed to get stdout handle"),
        })?;

        let stderr_task = child.stderr.take().map(|stderr| tokio::spawn(collect_stderr(stderr)));

        // Framed as raw bytes so one undecodable line cannot end the stream
        let lines = FramedRead::new(
            stdout,
            AnyDelimiterCodec::new_with_max_length(
                b"\n".to_vec(),
                b"\n".to_vec(),
                options.max_line_length,
            ),
        );

        Ok(Self {
            program,
            pid,
            process: Some(child),
            lines: Some(lines),
            mode,
            skip_blank_lines,
            max_line_length: options.max_line_length,
            line_number: 0,
            cancel,
            timeout,
            deadline: timeout.map(|t| Box::pin(tokio::time::sleep(t))),
            stderr_task,
            finished: false,
        })
    }

    /// Wait for the child after its output ended and check the exit status
    ///
    /// # Errors
    /// Returns `NonZeroExit` for an unsuccessful exit, `Cancelled` if the wait
    /// was interrupted
    pub(super) async fn wait_for_exit(&mut self) -> Result<()> {
        self.lines = None;

        let Some(mut child) = self.process.take() else {
            return Ok(());
        };

        let waited = super::reader::guarded(
            self.cancel.as_ref(),
            self.deadline.as_mut(),
            self.timeout,
            child.wait(),
        )
        .await;

        let status = match waited {
            Ok(Ok(status)) => status,
            Ok(Err(e)) => {
                self.abort_stderr();
                return Err(AntToolsError::Io(e));
            }
            Err(reason) => {
                self.process = Some(child);
                self.terminate().await;
                return Err(AntToolsError::cancelled(reason));
            }
        };

        let stderr = match self.stderr_task.take() {
            Some(task) => self.join_stderr(task).await?,
            None => None,
        };

        log::debug!(
            "{} exited with {status} after {} line(s)",
            self.program.display(),
            self.line_number
        );

        if status.success() {
            Ok(())
        } else {
            Err(AntToolsError::non_zero_exit(status.code(), stderr))
        }
    }

    /// Kill and reap the child, dropping the pipes
    pub(super) async fn terminate(&mut self) {
        self.lines = None;
        self.abort_stderr();

        if let Some(mut child) = self.process.take() {
            // kill() also waits, so the child is reaped here
            if let Err(e) = child.kill().await {
                log::warn!("Failed to kill {}: {e}", self.program.display());
            } else {
                log::debug!("Killed {}", self.program.display());
            }
        }
    }

    /// Stop the invocation, killing the child if it is still running
    ///
    /// Safe to call at any point, including after the stream finished.
    ///
    /// # Errors
    /// Currently infallible; kill failures are logged
    pub async fn close(&mut self) -> Result<()> {
        self.finished = true;
        self.terminate().await;
        Ok(())
    }

    /// Wait for the stderr collector once the child has exited
    ///
    /// A grandchild can keep the pipe open long after the child is gone, so the
    /// join is bounded by the cancellation token, the deadline and a short grace
    /// period. Past the grace period the captured text is dropped.
    async fn join_stderr(&mut self, mut task: JoinHandle<String>) -> Result<Option<String>> {
        let joined = super::reader::guarded(
            self.cancel.as_ref(),
            self.deadline.as_mut(),
            self.timeout,
            tokio::time::timeout(STDERR_DRAIN_GRACE, &mut task),
        )
        .await;

        match joined {
            Ok(Ok(collected)) => Ok(collected.ok()),
            Ok(Err(_)) => {
                log::debug!(
                    "stderr of {} still open {STDERR_DRAIN_GRACE:?} after exit, giving up on it",
                    self.program.display()
                );
                task.abort();
                Ok(None)
            }
            Err(reason) => {
                log::debug!("Stopping {}: {reason}", self.program.display());
                task.abort();
                Err(AntToolsError::cancelled(reason))
            }
        }
    }

    fn abort_stderr(&mut self) {
        if let Some(task) = self.stderr_task.take() {
            task.abort();
        }
    }

    /// Handle Drop cleanup
    pub(super) fn drop_impl(&mut self) {
        self.lines = None;
        self.abort_stderr();

        if let Some(mut child) = self.process.take() {
            // tokio reaps the killed child in the background
            let _ = child.start_kill();
        }
    }
}

/// Read stderr to the end, keeping only the most recent bytes
async fn collect_stderr(mut stderr: ChildStderr) -> String {
    let mut kept: Vec<u8> = Vec::new();
    let mut buffer = vec![0u8; 4096];

    loop {
        match stderr.read(&mut buffer).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                kept.extend_from_slice(&buffer[..n]);
                if kept.len() > MAX_CAPTURED_STDERR {
                    let excess = kept.len() - MAX_CAPTURED_STDERR;
                    kept.drain(..excess);
                }
            }
        }
    }

    String::from_utf8_lossy(&kept).into_owned()
}
