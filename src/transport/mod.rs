//! Transport layer for running the ant-tools executable
//!
//! ant-tools is treated as a black box reached through three things only: a
//! spawn with arguments, a newline-delimited stdout stream and an exit status.

pub mod subprocess;

pub use subprocess::{Invocation, ProcessAdapter, RecordStream};
