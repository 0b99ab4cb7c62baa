//! Newtype wrappers for type safety

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AntToolsError, Result};

// ============================================================================
// Newtype Wrappers for Type Safety
// ============================================================================

/// Path of an `.ant` file as it is handed to ant-tools
///
/// Always non-empty valid UTF-8, since it travels as a command-line argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AntPath(String);

impl AntPath {
    /// Validate and wrap an `.ant` path
    ///
    /// # Errors
    /// Returns `AntToolsError::InvalidArgument` if the path is empty or not UTF-8
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = path.to_str().ok_or_else(|| {
            AntToolsError::invalid_argument(format!(
                "ant file path is not valid UTF-8: {}",
                path.display()
            ))
        })?;

        if text.trim().is_empty() {
            return Err(AntToolsError::invalid_argument(
                "ant file path must not be empty",
            ));
        }

        Ok(Self(text.to_string()))
    }

    /// Get the path as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the path as a filesystem path
    #[must_use]
    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl fmt::Display for AntPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AntPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for AntPath {
    type Error = AntToolsError;

    fn try_from(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for AntPath {
    type Error = AntToolsError;

    fn try_from(s: String) -> Result<Self> {
        Self::new(s)
    }
}
