//! Named operations on a single `.ant` file
//!
//! [`AntReader`] maps `load`, `validate` and `print_stats` onto the argument
//! shapes ant-tools understands.

mod load_options;
mod reader;

pub use load_options::{LoadOptions, LoadOptionsBuilder};
pub use reader::{AntReader, BED_OUTPUT_FLAG, STATS_FLAG, VALIDATE_FLAG};
