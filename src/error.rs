//! Construction errors.

use core::fmt;

/// Returned when a map is constructed with an unusable table size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSizeError {
    /// A table needs at least one bucket.
    Zero,
}

impl fmt::Display for TableSizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableSizeError::Zero => f.write_str("table size must be at least one bucket"),
        }
    }
}

impl std::error::Error for TableSizeError {}
