//! Line parser for ant-tools output

use crate::error::{AntToolsError, Result};
use crate::types::records::{OutputMode, Record};

/// Parse one output line into a [`Record`]
///
/// # Arguments
/// * `line` - Line with its terminator already stripped
/// * `mode` - Whether to keep the text or decode it as JSON
/// * `line_number` - 1-based position of the line, used in error reports
///
/// # Errors
/// Returns `AntToolsError::MalformedRecord` if `mode` is JSON and the line is not
/// a single JSON value
pub fn parse_record(line: String, mode: OutputMode, line_number: usize) -> Result<Record> {
    match mode {
        OutputMode::Text => Ok(Record::Line(line)),
        OutputMode::Json => match serde_json::from_str::<serde_json::Value>(&line) {
            Ok(value) => Ok(Record::Json(value)),
            Err(e) => {
                log::debug!("ant-tools line {line_number} is not JSON: {e}");
                Err(AntToolsError::malformed_record(
                    line_number,
                    line,
                    format!("invalid JSON: {e}"),
                ))
            }
        },
    }
}
