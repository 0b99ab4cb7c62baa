//! Output records produced by the external tool

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;

use crate::error::{AntToolsError, Result};

/// How each output line is turned into a [`Record`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputMode {
    /// Yield the raw line
    #[default]
    Text,
    /// Decode the line as one JSON value
    Json,
}

impl OutputMode {
    /// Name used in configuration values
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputMode {
    type Err = AntToolsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(AntToolsError::invalid_config(format!(
                "unknown output mode {other:?} (expected \"text\" or \"json\")"
            ))),
        }
    }
}

/// One unit of output from ant-tools
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// A raw text line, terminator stripped
    Line(String),
    /// A decoded JSON value
    Json(serde_json::Value),
}

impl Record {
    /// The text line, if this is a text record
    #[must_use]
    pub fn as_line(&self) -> Option<&str> {
        match self {
            Self::Line(line) => Some(line.as_str()),
            Self::Json(_) => None,
        }
    }

    /// The JSON value, if this is a JSON record
    #[must_use]
    pub const fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Line(_) => None,
        }
    }

    /// Consume the record, returning the JSON value if there is one
    #[must_use]
    pub fn into_json(self) -> Option<serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Line(_) => None,
        }
    }

    /// Convert the record into a caller-defined type
    ///
    /// Text records are parsed as JSON first.
    ///
    /// # Errors
    /// Returns `AntToolsError::MalformedRecord` with `line_number` 0 if the
    /// record does not match `T`
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        let decoded = match self {
            Self::Json(value) => T::deserialize(value),
            Self::Line(line) => serde_json::from_str(line),
        };
        decoded.map_err(|e| AntToolsError::malformed_record(0, self.to_string(), e.to_string()))
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line(line) => f.write_str(line),
            Self::Json(value) => write!(f, "{value}"),
        }
    }
}
