//! Adapter options and configuration
//!
//! This module contains the configuration for the process adapter, including a
//! builder pattern and an environment-variable loader.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AntToolsError, Result};
use crate::transport::subprocess::config::{
    DEFAULT_EXECUTABLE_PATH, DEFAULT_MAX_LINE_LENGTH, ENV_EXECUTABLE, ENV_OUTPUT_MODE,
    ENV_TIMEOUT_SECS,
};

use super::records::OutputMode;

// ============================================================================
// Policies
// ============================================================================

/// What to pass to the executable when the caller supplies no arguments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyArgs {
    /// Run the executable with no arguments at all
    #[default]
    PassThrough,
    /// Run the executable with one literal empty-string argument
    SingleEmptyArgument,
}

/// How the child's standard error is handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StderrMode {
    /// Child writes straight to the parent's stderr
    #[default]
    Inherit,
    /// Stderr is collected and attached to [`AntToolsError::NonZeroExit`]
    Capture,
}

// ============================================================================
// Adapter Options
// ============================================================================

/// Main options for the process adapter
#[derive(Debug, Clone)]
pub struct AdapterOptions {
    /// Path to the ant-tools executable (absolute, relative or a bare name)
    pub executable_path: PathBuf,
    /// Directory relative executable paths are resolved against (default: current dir)
    pub base_dir: Option<PathBuf>,
    /// Working directory for the child process
    pub cwd: Option<PathBuf>,
    /// Extra environment variables for the child process
    pub env: HashMap<String, String>,
    /// Whether each line is yielded as text or decoded as JSON
    pub output_mode: OutputMode,
    /// Drop lines that are empty or whitespace-only
    pub skip_blank_lines: bool,
    /// Behaviour for an empty argument list
    pub empty_args: EmptyArgs,
    /// Kill the child and stop the stream after this long
    pub timeout: Option<Duration>,
    /// Standard error handling
    pub stderr: StderrMode,
    /// Longest line accepted from the child, in bytes
    pub max_line_length: usize,
}

impl Default for AdapterOptions {
    fn default() -> Self {
        Self {
            executable_path: PathBuf::from(DEFAULT_EXECUTABLE_PATH),
            base_dir: None,
            cwd: None,
            env: HashMap::new(),
            output_mode: OutputMode::Text,
            skip_blank_lines: false,
            empty_args: EmptyArgs::PassThrough,
            timeout: None,
            stderr: StderrMode::Inherit,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }
}

impl AdapterOptions {
    /// Create a new builder for `AdapterOptions`
    #[must_use]
    pub fn builder() -> AdapterOptionsBuilder {
        AdapterOptionsBuilder::default()
    }

    /// Load options from `ANT_TOOLS_*` environment variables
    ///
    /// # Errors
    /// Returns `AntToolsError::InvalidConfig` if a variable holds an unusable value
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load options through an arbitrary key lookup
    ///
    /// Unset keys keep their defaults.
    ///
    /// # Errors
    /// Returns `AntToolsError::InvalidConfig` if a value cannot be parsed
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = Self::default();

        if let Some(path) = lookup(ENV_EXECUTABLE).filter(|v| !v.trim().is_empty()) {
            options.executable_path = PathBuf::from(path);
        }

        if let Some(mode) = lookup(ENV_OUTPUT_MODE) {
            options.output_mode = mode.parse()?;
        }

        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|e| {
                AntToolsError::invalid_config(format!("{ENV_TIMEOUT_SECS}={secs:?}: {e}"))
            })?;
            if secs == 0 {
                return Err(AntToolsError::invalid_config(format!(
                    "{ENV_TIMEOUT_SECS} must be greater than zero"
                )));
            }
            options.timeout = Some(Duration::from_secs(secs));
        }

        Ok(options)
    }
}

// ============================================================================
// Builder for AdapterOptions
// ============================================================================

/// Builder for `AdapterOptions`
#[derive(Debug, Default)]
pub struct AdapterOptionsBuilder {
    options: AdapterOptions,
}

impl AdapterOptionsBuilder {
    /// Set the executable path
    #[must_use]
    pub fn executable_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.executable_path = path.into();
        self
    }

    /// Set the directory relative executable paths resolve against
    #[must_use]
    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options.base_dir = Some(dir.into());
        self
    }

    /// Set the child's working directory
    #[must_use]
    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options.cwd = Some(dir.into());
        self
    }

    /// Add an environment variable for the child
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.env.insert(key.into(), value.into());
        self
    }

    /// Set the output mode
    #[must_use]
    pub const fn output_mode(mut self, mode: OutputMode) -> Self {
        self.options.output_mode = mode;
        self
    }

    /// Skip blank lines
    #[must_use]
    pub const fn skip_blank_lines(mut self, skip: bool) -> Self {
        self.options.skip_blank_lines = skip;
        self
    }

    /// Set the empty argument policy
    #[must_use]
    pub const fn empty_args(mut self, policy: EmptyArgs) -> Self {
        self.options.empty_args = policy;
        self
    }

    /// Set the invocation timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = Some(timeout);
        self
    }

    /// Set stderr handling
    #[must_use]
    pub const fn stderr(mut self, mode: StderrMode) -> Self {
        self.options.stderr = mode;
        self
    }

    /// Set the maximum accepted line length
    ///
    /// # Panics
    /// Panics if `max` is zero
    #[must_use]
    pub fn max_line_length(mut self, max: usize) -> Self {
        assert!(max > 0, "max_line_length must be greater than zero");
        self.options.max_line_length = max;
        self
    }

    /// Build the options
    #[must_use]
    pub fn build(self) -> AdapterOptions {
        self.options
    }
}
