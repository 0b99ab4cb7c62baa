//! Process adapter and record stream types

use std::env;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::time::Duration;

use tokio::process::{Child, ChildStdout};
use tokio::task::JoinHandle;
use tokio::time::Sleep;
use tokio_util::codec::{AnyDelimiterCodec, FramedRead};
use tokio_util::sync::CancellationToken;

use crate::error::{AntToolsError, Result};
use crate::types::options::AdapterOptions;
use crate::types::records::OutputMode;

use super::invocation::Invocation;

/// Launches ant-tools and hands back its output as a [`RecordStream`]
///
/// The adapter itself holds nothing but configuration; every call to
/// [`run`](Self::run) or [`Invocation::spawn`] starts an independent child.
#[derive(Debug, Clone, Default)]
pub struct ProcessAdapter {
    options: AdapterOptions,
}

impl ProcessAdapter {
    /// Create a new adapter
    #[must_use]
    pub const fn new(options: AdapterOptions) -> Self {
        Self { options }
    }

    /// Adapter configured from `ANT_TOOLS_*` environment variables
    ///
    /// # Errors
    /// Returns `AntToolsError::InvalidConfig` if a variable is unusable
    pub fn from_env() -> Result<Self> {
        AdapterOptions::from_env().map(Self::new)
    }

    /// Options this adapter was built with
    #[must_use]
    pub const fn options(&self) -> &AdapterOptions {
        &self.options
    }

    /// Start describing an invocation with the given arguments
    pub fn invocation<I, S>(&self, args: I) -> Invocation<'_>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation::new(self, args.into_iter().map(Into::into).collect())
    }

    /// Spawn ant-tools with `args` using the adapter's configured output mode
    ///
    /// # Errors
    /// Returns `ExecutableNotFound` if the executable cannot be resolved, or
    /// `Spawn` if the OS refuses to start it
    pub async fn run<I, S>(&self, args: I) -> Result<RecordStream>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.invocation(args).spawn().await
    }

    /// Resolve the configured executable to a runnable file
    ///
    /// Absolute paths are checked as-is. Paths with more than one component are
    /// joined onto the base directory (default: the current directory). A bare
    /// name is looked up on `PATH` first and then in the base directory.
    ///
    /// # Errors
    /// Returns `AntToolsError::ExecutableNotFound` if no runnable file is found
    pub fn resolve_executable(&self) -> Result<PathBuf> {
        let configured = &self.options.executable_path;

        if configured.as_os_str().is_empty() {
            return Err(AntToolsError::executable_not_found(
                configured,
                "no executable path configured",
            ));
        }

        if configured.is_absolute() {
            return check_executable(configured.clone());
        }

        let base = match self.options.base_dir {
            Some(ref dir) => dir.clone(),
            None => env::current_dir()?,
        };

        if configured.components().count() == 1
            && let Ok(found) = which::which(configured)
        {
            log::debug!("Resolved {} on PATH: {}", configured.display(), found.display());
            return Ok(found);
        }

        check_executable(base.join(configured))
    }
}

fn check_executable(path: PathBuf) -> Result<PathBuf> {
    let metadata = match std::fs::metadata(&path) {
        Ok(metadata) => metadata,
        Err(e) => return Err(AntToolsError::executable_not_found(path, e.to_string())),
    };

    if !metadata.is_file() {
        return Err(AntToolsError::executable_not_found(path, "not a regular file"));
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if metadata.permissions().mode() & 0o111 == 0 {
            return Err(AntToolsError::executable_not_found(
                path,
                "file is not executable",
            ));
        }
    }

    Ok(path)
}

/// Lazy, pull-based sequence of records from one running ant-tools process
///
/// Records are read only when asked for with [`next_record`](Self::next_record)
/// or by polling [`into_stream`](Self::into_stream). The child is killed and
/// reaped on [`close`](Self::close), on cancellation or timeout, and on
/// read failure; dropping the stream kills it as well.
///
/// A line that fails to decode yields `MalformedRecord` and reading carries on
/// with the next line. After end of output the child's exit status is checked
/// and a failure is yielded as a final `NonZeroExit` item.
pub struct RecordStream {
    pub(super) program: PathBuf,
    pub(super) pid: Option<u32>,
    pub(super) process: Option<Child>,
    pub(super) lines: Option<FramedRead<ChildStdout, AnyDelimiterCodec>>,
    pub(super) mode: OutputMode,
    pub(super) skip_blank_lines: bool,
    pub(super) max_line_length: usize,
    pub(super) line_number: usize,
    pub(super) cancel: Option<CancellationToken>,
    pub(super) timeout: Option<Duration>,
    pub(super) deadline: Option<Pin<Box<Sleep>>>,
    pub(super) stderr_task: Option<JoinHandle<String>>,
    pub(super) finished: bool,
}

impl RecordStream {
    /// Path of the running executable
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// OS process id of the child, if the OS reported one
    #[must_use]
    pub const fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Output mode records are produced in
    #[must_use]
    pub const fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Number of lines read from the child so far, including skipped ones
    #[must_use]
    pub const fn lines_read(&self) -> usize {
        self.line_number
    }

    /// True once the stream has yielded its last item
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }
}

impl std::fmt::Debug for RecordStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStream")
            .field("program", &self.program)
            .field("pid", &self.pid)
            .field("mode", &self.mode)
            .field("line_number", &self.line_number)
            .field("timeout", &self.timeout)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

impl Drop for RecordStream {
    fn drop(&mut self) {
        self.drop_impl();
    }
}
