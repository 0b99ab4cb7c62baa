//! Options for loading annotation records

use std::path::PathBuf;

use crate::error::{AntToolsError, Result};
use crate::types::range::ChrRange;

/// Filters and limits ant-tools applies while loading records
///
/// Built through [`LoadOptions::builder`], which enforces the same conflicts
/// the tool itself rejects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    range: Option<ChrRange>,
    bed: Option<PathBuf>,
    include_all: bool,
    limit: Option<u32>,
    memory_limit_mb: Option<u32>,
}

impl LoadOptions {
    /// Create a new builder for `LoadOptions`
    #[must_use]
    pub fn builder() -> LoadOptionsBuilder {
        LoadOptionsBuilder::default()
    }

    /// Single region to load
    #[must_use]
    pub const fn range(&self) -> Option<&ChrRange> {
        self.range.as_ref()
    }

    /// BED file listing the regions to load
    #[must_use]
    pub fn bed(&self) -> Option<&std::path::Path> {
        self.bed.as_deref()
    }

    /// Whether records without annotation are included
    #[must_use]
    pub const fn include_all(&self) -> bool {
        self.include_all
    }

    /// Maximum number of records
    #[must_use]
    pub const fn limit(&self) -> Option<u32> {
        self.limit
    }

    /// Memory ceiling for ant-tools, in megabytes
    #[must_use]
    pub const fn memory_limit_mb(&self) -> Option<u32> {
        self.memory_limit_mb
    }

    /// Render as ant-tools flags, in a fixed order
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if let Some(ref range) = self.range {
            args.push(format!("--range={range}"));
        }
        if let Some(ref bed) = self.bed {
            args.push(format!("--bed={}", bed.display()));
        }
        if self.include_all {
            args.push("--all".to_string());
        }
        if let Some(limit) = self.limit {
            args.push(format!("--limit={limit}"));
        }
        if let Some(mb) = self.memory_limit_mb {
            args.push(format!("--memlimit={mb}"));
        }

        args
    }
}

/// Builder for `LoadOptions`
#[derive(Debug, Default)]
pub struct LoadOptionsBuilder {
    options: LoadOptions,
}

impl LoadOptionsBuilder {
    /// Restrict loading to one region
    #[must_use]
    pub fn range(mut self, range: ChrRange) -> Self {
        self.options.range = Some(range);
        self
    }

    /// Restrict loading to the regions in a BED file
    #[must_use]
    pub fn bed(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.bed = Some(path.into());
        self
    }

    /// Include records that carry no annotation
    #[must_use]
    pub const fn include_all(mut self, all: bool) -> Self {
        self.options.include_all = all;
        self
    }

    /// Stop after `limit` records
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.options.limit = Some(limit);
        self
    }

    /// Cap ant-tools memory use
    #[must_use]
    pub const fn memory_limit_mb(mut self, mb: u32) -> Self {
        self.options.memory_limit_mb = Some(mb);
        self
    }

    /// Validate and build the options
    ///
    /// # Errors
    /// Returns `AntToolsError::InvalidArgument` if `range` and `bed` are both
    /// set, if `include_all` is combined with either, or if a limit is zero
    pub fn build(self) -> Result<LoadOptions> {
        let options = self.options;

        if options.range.is_some() && options.bed.is_some() {
            return Err(AntToolsError::invalid_argument(
                "'range' and 'bed' are mutually exclusive",
            ));
        }
        if options.include_all && (options.range.is_some() || options.bed.is_some()) {
            return Err(AntToolsError::invalid_argument(
                "'all' and 'bed'/'range' are mutually exclusive",
            ));
        }
        if let Some(ref bed) = options.bed
            && bed.as_os_str().is_empty()
        {
            return Err(AntToolsError::invalid_argument("bed path must not be empty"));
        }
        if options.limit == Some(0) {
            return Err(AntToolsError::invalid_argument("limit must be greater than zero"));
        }
        if options.memory_limit_mb == Some(0) {
            return Err(AntToolsError::invalid_argument(
                "memory limit must be greater than zero",
            ));
        }

        Ok(options)
    }
}
