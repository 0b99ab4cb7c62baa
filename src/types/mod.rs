//! Type definitions for the ant-tools adapter
//!
//! - [`identifiers`] - Validated `.ant` path newtype
//! - [`options`] - Adapter configuration and builder
//! - [`range`] - Chromosome ranges for `--range`
//! - [`records`] - Output modes and records

pub mod identifiers;
pub mod options;
pub mod range;
pub mod records;

pub use identifiers::AntPath;
pub use options::{AdapterOptions, AdapterOptionsBuilder, EmptyArgs, StderrMode};
pub use range::ChrRange;
pub use records::{OutputMode, Record};
