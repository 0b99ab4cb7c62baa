//! Error types for the ant-tools adapter

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the ant-tools adapter
///
/// Every message is prefixed with the stage that failed so that a user
/// reading it on the terminal can tell a missing binary from a bad line.
#[derive(Error, Debug)]
pub enum AntToolsError {
    /// The configured executable could not be resolved to a runnable file
    #[error("spawn: ant-tools executable not found at {}: {reason}", .path.display())]
    ExecutableNotFound {
        /// Path that was tried
        path: PathBuf,
        /// Why resolution failed
        reason: String,
    },

    /// The executable resolved but the OS refused to start it
    #[error("spawn: failed to start {}: {source}", .path.display())]
    Spawn {
        /// Resolved executable path
        path: PathBuf,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// Reading the child's standard output failed
    #[error("read: failed reading ant-tools output: {0}")]
    Read(#[source] std::io::Error),

    /// A line of output could not be turned into a record
    #[error("decode: malformed record on line {line_number}: {message}")]
    MalformedRecord {
        /// 1-based line number within the child's output; 0 when the record
        /// was decoded after the fact and its line is unknown
        line_number: usize,
        /// The offending line, terminator stripped
        line: String,
        /// Decoder message
        message: String,
    },

    /// The child exited unsuccessfully
    #[error("exit: ant-tools {}", describe_exit(.code, .stderr))]
    NonZeroExit {
        /// Exit code, `None` when the child was killed by a signal
        code: Option<i32>,
        /// Captured standard error, when capture was enabled
        stderr: Option<String>,
    },

    /// The invocation was stopped by a cancellation token or timeout
    #[error("cancelled: {0}")]
    Cancelled(String),

    /// A required argument was empty or otherwise unusable
    #[error("argument: {0}")]
    InvalidArgument(String),

    /// Invalid adapter configuration
    #[error("config: {0}")]
    InvalidConfig(String),

    /// I/O error outside of the output stream
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, AntToolsError>;

fn describe_exit(code: &Option<i32>, stderr: &Option<String>) -> String {
    let status = match code {
        Some(code) => format!("exited with code {code}"),
        None => "was terminated by a signal".to_string(),
    };
    match stderr.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(stderr) => format!("{status}: {stderr}"),
        None => status,
    }
}

impl AntToolsError {
    /// Create an executable not found error
    pub fn executable_not_found(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ExecutableNotFound {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a malformed record error
    pub fn malformed_record(
        line_number: usize,
        line: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::MalformedRecord {
            line_number,
            line: line.into(),
            message: message.into(),
        }
    }

    /// Create a non-zero exit error
    #[must_use]
    pub fn non_zero_exit(code: Option<i32>, stderr: Option<String>) -> Self {
        Self::NonZeroExit { code, stderr }
    }

    /// Create a cancellation error
    pub fn cancelled(reason: impl Into<String>) -> Self {
        Self::Cancelled(reason.into())
    }

    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// True for errors that concern a single line; the stream keeps going after them
    #[must_use]
    pub const fn is_per_record(&self) -> bool {
        matches!(self, Self::MalformedRecord { .. })
    }

    /// Process exit code a command-line front end should report for this error
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NonZeroExit { code: Some(code), .. } => *code,
            Self::ExecutableNotFound { .. } => 127,
            Self::Cancelled(_) => 130,
            _ => 1,
        }
    }
}
