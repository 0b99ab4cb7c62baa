//! # ant-tools adapter
//!
//! Runs the external `ant-tools` executable and hands its standard output back
//! as a lazy sequence of records: raw text lines, or JSON values decoded one
//! per line. Loading, validating and summarising `.ant` annotation files is
//! entirely the tool's job; this crate only spawns it, reads it and reports
//! how it went.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ant_tools_adapter::{AdapterOptions, OutputMode, ProcessAdapter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = AdapterOptions::builder()
//!         .executable_path("bin/ant-tools")
//!         .output_mode(OutputMode::Json)
//!         .build();
//!     let adapter = ProcessAdapter::new(options);
//!
//!     let mut records = adapter.run(["sample.ant"]).await?;
//!     while let Some(record) = records.next_record().await {
//!         log::info!("record: {}", record?);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Named operations with [`AntReader`]
//!
//! ```no_run
//! # use ant_tools_adapter::{AntReader, ProcessAdapter, LoadOptions, ChrRange};
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = AntReader::new("sample.ant", ProcessAdapter::default())?;
//!
//! let stats = reader.print_stats().await?.collect_records().await?;
//!
//! let options = LoadOptions::builder()
//!     .range("chr1:10000-20000".parse::<ChrRange>()?)
//!     .limit(100)
//!     .build()?;
//! let mut records = reader.load_with(&options).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Streams and cleanup
//!
//! [`RecordStream::next_record`] pulls one record at a time and
//! [`RecordStream::into_stream`] turns it into a [`futures::Stream`]. The child
//! process is killed and reaped on [`RecordStream::close`], on cancellation
//! through a [`tokio_util::sync::CancellationToken`], on timeout and on read
//! failure. Dropping a stream part way through kills the child too.
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, AntToolsError>`](Result):
//!
//! ```no_run
//! # use ant_tools_adapter::{AntToolsError, ProcessAdapter};
//! # async fn example() {
//! let adapter = ProcessAdapter::default();
//! match adapter.run(["sample.ant", "--validate"]).await {
//!     Ok(stream) => { /* ... */ }
//!     Err(AntToolsError::ExecutableNotFound { path, .. }) => {
//!         log::error!("ant-tools missing at {}", path.display());
//!     }
//!     Err(e) => {
//!         log::error!("Error: {}", e);
//!     }
//! }
//! # }
//! ```
//!
//! A JSON line that fails to decode is reported as
//! [`AntToolsError::MalformedRecord`] and the stream continues. A child that
//! exits unsuccessfully ends the stream with [`AntToolsError::NonZeroExit`].

pub mod ant;
pub mod error;
pub mod message;
pub mod transport;
pub mod types;

// Re-export main types
pub use ant::{AntReader, LoadOptions, LoadOptionsBuilder};
pub use error::{AntToolsError, Result};
pub use message::parse_record;
pub use transport::{Invocation, ProcessAdapter, RecordStream};
pub use types::{
    AdapterOptions, AdapterOptionsBuilder, AntPath, ChrRange, EmptyArgs, OutputMode, Record,
    StderrMode,
};

/// Version of the adapter
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run ant-tools once with `args`
///
/// Uses `options`, or [`AdapterOptions::from_env`] when `None`.
///
/// # Errors
/// Returns `InvalidConfig` for unusable environment settings, otherwise the
/// errors of [`ProcessAdapter::run`]
pub async fn run<I, S>(args: I, options: Option<AdapterOptions>) -> Result<RecordStream>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let options = match options {
        Some(options) => options,
        None => AdapterOptions::from_env()?,
    };
    ProcessAdapter::new(options).run(args).await
}
