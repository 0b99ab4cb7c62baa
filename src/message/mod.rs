//! Turning raw output lines into records

mod parser;

pub use parser::parse_record;
