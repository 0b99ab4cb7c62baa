//! Subprocess transport for the ant-tools CLI
//!
//! This module spawns ant-tools as a child process and reads its standard
//! output line by line.

mod command;
pub mod config;
mod invocation;
mod lifecycle;
mod reader;
mod transport;

// Re-export public types
pub use invocation::Invocation;
pub use transport::{ProcessAdapter, RecordStream};
