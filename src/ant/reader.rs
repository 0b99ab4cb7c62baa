//! `.ant` file reader built on the process adapter

use std::path::Path;

use crate::error::Result;
use crate::transport::{Invocation, ProcessAdapter, RecordStream};
use crate::types::identifiers::AntPath;
use crate::types::records::OutputMode;

use super::load_options::LoadOptions;

/// Flag selecting ant-tools' validation output
pub const VALIDATE_FLAG: &str = "--validate";
/// Flag selecting ant-tools' statistics output
pub const STATS_FLAG: &str = "--stats";
/// Flag selecting BED-like output
pub const BED_OUTPUT_FLAG: &str = "--bedout";

/// Binds one `.ant` file and runs ant-tools against it
///
/// Holds no state besides the path and the adapter; each operation starts a
/// fresh child process.
///
/// ```no_run
/// # use ant_tools_adapter::{AntReader, ProcessAdapter};
/// # async fn example() -> ant_tools_adapter::Result<()> {
/// let reader = AntReader::new("annotations.ant", ProcessAdapter::default())?;
/// let mut messages = reader.validate().await?;
/// while let Some(line) = messages.next_record().await {
///     println!("{}", line?);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AntReader {
    path: AntPath,
    adapter: ProcessAdapter,
}

impl AntReader {
    /// Bind a reader to `path`
    ///
    /// # Errors
    /// Returns `AntToolsError::InvalidArgument` if `path` is empty or not UTF-8
    pub fn new(path: impl AsRef<Path>, adapter: ProcessAdapter) -> Result<Self> {
        Ok(Self {
            path: AntPath::new(path)?,
            adapter,
        })
    }

    /// The bound `.ant` path
    #[must_use]
    pub const fn path(&self) -> &AntPath {
        &self.path
    }

    /// The adapter used for every operation
    #[must_use]
    pub const fn adapter(&self) -> &ProcessAdapter {
        &self.adapter
    }

    /// Stream every annotation record as JSON
    ///
    /// # Errors
    /// Returns error if ant-tools cannot be started
    pub async fn load(&self) -> Result<RecordStream> {
        self.load_with(&LoadOptions::default()).await
    }

    /// Stream annotation records as JSON, filtered by `options`
    ///
    /// # Errors
    /// Returns error if ant-tools cannot be started
    pub async fn load_with(&self, options: &LoadOptions) -> Result<RecordStream> {
        self.invocation(OutputMode::Json)
            .extend_args(options.to_args())
            .spawn()
            .await
    }

    /// Stream BED-like `CHROM START STOP {json}` lines
    ///
    /// # Errors
    /// Returns error if ant-tools cannot be started
    pub async fn export_bed(&self, options: &LoadOptions) -> Result<RecordStream> {
        self.invocation(OutputMode::Text)
            .extend_args(options.to_args())
            .arg(BED_OUTPUT_FLAG)
            .spawn()
            .await
    }

    /// Stream ant-tools' validation messages for the file
    ///
    /// # Errors
    /// Returns error if ant-tools cannot be started
    pub async fn validate(&self) -> Result<RecordStream> {
        self.invocation(OutputMode::Text)
            .arg(VALIDATE_FLAG)
            .spawn()
            .await
    }

    /// Stream ant-tools' summary statistics for the file
    ///
    /// # Errors
    /// Returns error if ant-tools cannot be started
    pub async fn print_stats(&self) -> Result<RecordStream> {
        self.invocation(OutputMode::Text).arg(STATS_FLAG).spawn().await
    }

    fn invocation(&self, mode: OutputMode) -> Invocation<'_> {
        self.adapter.invocation([self.path.as_str()]).mode(mode)
    }
}
