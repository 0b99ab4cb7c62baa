//! Chromosome ranges accepted by `ant-tools --range`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AntToolsError, Result};

/// A `CHR:START-STOP` region
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChrRange {
    /// Chromosome name, e.g. `chr1`
    pub chromosome: String,
    /// First position
    pub start: u64,
    /// Last position, never less than `start`
    pub stop: u64,
}

impl ChrRange {
    /// Create a range
    ///
    /// # Errors
    /// Returns `AntToolsError::InvalidArgument` if the chromosome is empty or
    /// `start > stop`
    pub fn new(chromosome: impl Into<String>, start: u64, stop: u64) -> Result<Self> {
        let chromosome = chromosome.into();
        if chromosome.is_empty() {
            return Err(AntToolsError::invalid_argument(
                "range chromosome must not be empty",
            ));
        }
        if start > stop {
            return Err(AntToolsError::invalid_argument(format!(
                "range start {start} is after stop {stop}"
            )));
        }
        Ok(Self {
            chromosome,
            start,
            stop,
        })
    }
}

impl fmt::Display for ChrRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chromosome, self.start, self.stop)
    }
}

impl FromStr for ChrRange {
    type Err = AntToolsError;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || {
            AntToolsError::invalid_argument(format!(
                "range {s:?} is not in CHR:START-STOP format"
            ))
        };

        // Chromosome names may themselves contain ':', the positions never do.
        let (chromosome, positions) = s.trim().rsplit_once(':').ok_or_else(malformed)?;
        let (start, stop) = positions.split_once('-').ok_or_else(malformed)?;

        let parse = |digits: &str| -> Result<u64> {
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            digits.parse().map_err(|_| malformed())
        };

        Self::new(chromosome, parse(start)?, parse(stop)?)
    }
}
