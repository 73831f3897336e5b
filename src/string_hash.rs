//! Polynomial rolling hash over a key's characters.
//!
//! `acc = (acc * 31 + c) mod n` for every character `c`, starting from 0.
//! The reduction happens after each character, so the accumulator never
//! exceeds the table size and bucket assignment is identical on every
//! platform regardless of key length.

use crate::error::TableSizeError;
use core::num::NonZeroUsize;

const MULTIPLIER: u128 = 31;

/// Number of buckets in a table. Never zero.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TableSize(NonZeroUsize);

impl TableSize {
    /// 101 buckets.
    pub const DEFAULT: TableSize = match NonZeroUsize::new(101) {
        Some(n) => TableSize(n),
        None => panic!("101 is non-zero"),
    };

    /// Returns `None` for zero.
    pub const fn new(buckets: usize) -> Option<TableSize> {
        match NonZeroUsize::new(buckets) {
            Some(n) => Some(TableSize(n)),
            None => None,
        }
    }

    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for TableSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<NonZeroUsize> for TableSize {
    fn from(n: NonZeroUsize) -> Self {
        TableSize(n)
    }
}

impl TryFrom<usize> for TableSize {
    type Error = TableSizeError;

    fn try_from(buckets: usize) -> Result<Self, Self::Error> {
        TableSize::new(buckets).ok_or(TableSizeError::Zero)
    }
}

/// Maps `key` to a bucket in `[0, table_size)`.
///
/// Characters contribute their Unicode scalar value, which is the byte
/// value for ASCII keys. The intermediate product is widened so that no
/// table size can overflow it.
pub fn bucket_index(key: &str, table_size: TableSize) -> usize {
    let n = table_size.get() as u128;
    let mut acc: u128 = 0;
    for c in key.chars() {
        acc = (acc * MULTIPLIER + c as u128) % n;
    }
    // acc < n <= usize::MAX
    acc as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> TableSize {
        TableSize::new(n).unwrap()
    }

    #[test]
    fn zero_table_size_rejected() {
        assert_eq!(TableSize::new(0), None);
        assert_eq!(TableSize::try_from(0usize), Err(TableSizeError::Zero));
        assert_eq!(TableSize::try_from(7usize).map(TableSize::get), Ok(7));
    }

    #[test]
    fn default_is_101() {
        assert_eq!(TableSize::default().get(), 101);
        assert_eq!(TableSize::DEFAULT, size(101));
    }

    /// Hand-computed values: "ab" = (97 * 31 + 98) mod 101 = 75.
    #[test]
    fn known_indices() {
        assert_eq!(bucket_index("", size(7)), 0);
        assert_eq!(bucket_index("a", size(101)), 97);
        assert_eq!(bucket_index("ab", size(101)), 75);
        assert_eq!(bucket_index("cat", size(5)), 2);
        assert_eq!(bucket_index("rat", size(5)), 2);
        assert_eq!(bucket_index("hat", size(5)), 2);
        assert_eq!(bucket_index("bat", size(5)), 1);
        assert_eq!(bucket_index("dog", size(5)), 4);
        assert_eq!(bucket_index("Alice", size(10)), 8);
        assert_eq!(bucket_index("Bob", size(10)), 5);
    }

    /// Reducing after every character must match reducing the exact
    /// polynomial once, for keys short enough not to overflow u128.
    #[test]
    fn per_character_reduction_matches_exact_polynomial() {
        for key in ["hello", "separate chaining", "Zz9"] {
            for n in [1usize, 2, 10, 101, 4096] {
                let exact = key
                    .chars()
                    .fold(0u128, |acc, c| acc * 31 + c as u128)
                    % n as u128;
                assert_eq!(bucket_index(key, size(n)) as u128, exact, "{key} mod {n}");
            }
        }
    }

    #[test]
    fn always_in_range_and_deterministic() {
        let keys = ["", "x", "a much longer key with spaces", "ünïcödé", "\u{10FFFF}"];
        for n in [1usize, 3, 101, usize::MAX] {
            for k in keys {
                let i = bucket_index(k, size(n));
                assert!(i < n);
                assert_eq!(i, bucket_index(k, size(n)));
            }
        }
    }

    #[test]
    fn single_bucket_maps_everything_to_zero() {
        for k in ["a", "b", "anything"] {
            assert_eq!(bucket_index(k, size(1)), 0);
        }
    }

    #[test]
    fn order_matters() {
        let n = size(101);
        assert_ne!(bucket_index("ab", n), bucket_index("ba", n));
    }
}
