//! Configuration constants for the subprocess transport

use std::time::Duration;

/// Executable used when nothing else is configured, relative to the base directory
pub const DEFAULT_EXECUTABLE_PATH: &str = "bin/ant-tools";

/// Default maximum line length accepted from the child (1MB)
pub const DEFAULT_MAX_LINE_LENGTH: usize = 1024 * 1024;

/// Upper bound on captured stderr; older output is discarded first
pub const MAX_CAPTURED_STDERR: usize = 64 * 1024;

/// How long captured stderr may stay open after the child has exited
pub const STDERR_DRAIN_GRACE: Duration = Duration::from_secs(1);

/// Environment variable overriding the executable path
pub const ENV_EXECUTABLE: &str = "ANT_TOOLS_BIN";

/// Environment variable selecting `text` or `json` output
pub const ENV_OUTPUT_MODE: &str = "ANT_TOOLS_OUTPUT";

/// Environment variable setting the invocation timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "ANT_TOOLS_TIMEOUT_SECS";

/// Variable exported to the child so it can tell who launched it
pub const ENV_ADAPTER_VERSION: &str = "ANT_TOOLS_ADAPTER_VERSION";

/// Environment variables that are never forwarded from [`AdapterOptions::env`]
///
/// These change how the child loads code.
///
/// [`AdapterOptions::env`]: crate::types::options::AdapterOptions::env
pub const DANGEROUS_ENV_VARS: &[&str] = &[
    "LD_PRELOAD",
    "LD_LIBRARY_PATH",
    "DYLD_INSERT_LIBRARIES",
    "DYLD_LIBRARY_PATH",
    "MONO_PATH",
    "MONO_ENV_OPTIONS",
    "DOTNET_STARTUP_HOOKS",
];
