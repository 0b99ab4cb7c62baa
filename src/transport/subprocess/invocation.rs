//! Per-call invocation settings

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::types::records::OutputMode;

use super::transport::{ProcessAdapter, RecordStream};

/// One call to ant-tools: arguments plus per-call overrides of the adapter options
///
/// ```no_run
/// # use ant_tools_adapter::{ProcessAdapter, OutputMode};
/// # use tokio_util::sync::CancellationToken;
/// # async fn example() -> ant_tools_adapter::Result<()> {
/// let adapter = ProcessAdapter::default();
/// let cancel = CancellationToken::new();
/// let mut records = adapter
///     .invocation(["sample.ant"])
///     .mode(OutputMode::Json)
///     .cancel_token(cancel.clone())
///     .spawn()
///     .await?;
/// while let Some(record) = records.next_record().await {
///     println!("{}", record?);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
#[must_use = "an invocation does nothing until spawned"]
pub struct Invocation<'a> {
    adapter: &'a ProcessAdapter,
    args: Vec<String>,
    mode: Option<OutputMode>,
    skip_blank_lines: Option<bool>,
    timeout: Option<Duration>,
    cancel: Option<CancellationToken>,
}

impl<'a> Invocation<'a> {
    pub(super) const fn new(adapter: &'a ProcessAdapter, args: Vec<String>) -> Self {
        Self {
            adapter,
            args,
            mode: None,
            skip_blank_lines: None,
            timeout: None,
            cancel: None,
        }
    }

    /// Arguments passed to the executable, before the empty-args policy
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn extend_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Override the output mode for this call
    pub const fn mode(mut self, mode: OutputMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Override blank-line skipping for this call
    pub const fn skip_blank_lines(mut self, skip: bool) -> Self {
        self.skip_blank_lines = Some(skip);
        self
    }

    /// Override the timeout for this call
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Stop the child and end the stream when `token` is cancelled
    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Resolve the executable and start the child
    ///
    /// # Errors
    /// Returns `ExecutableNotFound` if the executable cannot be resolved, or
    /// `Spawn` if the OS refuses to start it
    pub async fn spawn(self) -> Result<RecordStream> {
        let options = self.adapter.options();
        let executable = self.adapter.resolve_executable()?;

        RecordStream::spawn_impl(
            executable,
            &self.args,
            options,
            self.mode.unwrap_or(options.output_mode),
            self.skip_blank_lines.unwrap_or(options.skip_blank_lines),
            self.timeout.or(options.timeout),
            self.cancel,
        )
        .await
    }
}
