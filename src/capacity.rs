//! Capacity policy: prime bucket counts, load factor, and the grow/shrink
//! decisions driving rehashes.

use crate::error::Error;
use crate::error::Result;

/// Bucket counts a table may take, in ascending order.
///
/// Each step grows by roughly a fifth. Prime moduli keep hashes whose low
/// bits share a pattern from piling into the same few buckets, which a
/// power-of-two table would do.
pub const PRIMES: [usize; 74] = [
    17, 23, 29, 37, 47, 59, 71, 89, 107, 131, 163, 197, 239, 293, 353, 431, 521, 631, 761, 919,
    1103, 1327, 1597, 1931, 2333, 2801, 3371, 4049, 4861, 5839, 7013, 8419, 10103, 12143, 14591,
    17519, 21023, 25229, 30293, 36353, 43627, 52361, 62851, 75431, 90523, 108631, 130363, 156437,
    187751, 225307, 270371, 324449, 389357, 467237, 560689, 672827, 807403, 968897, 1162687,
    1395263, 1674319, 2009191, 2411033, 2893249, 3471899, 4166287, 4999559, 5999471, 7199369,
    8639231, 10367087, 12440509, 14928661, 17914393,
];

/// The maximum ratio of elements to buckets a table tolerates before growing.
///
/// Always positive and finite.
///
/// # Examples
///
/// ```rust
/// use chain_hash::LoadFactor;
///
/// assert_eq!(LoadFactor::default().get(), 0.75);
/// assert!(LoadFactor::new(1.5).is_ok());
/// assert!(LoadFactor::new(0.0).is_err());
/// assert!(LoadFactor::new(f64::NAN).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct LoadFactor(f64);

impl LoadFactor {
    /// The load factor used when none is specified.
    pub const DEFAULT: LoadFactor = LoadFactor(0.75);

    /// Validates `value` as a load factor.
    ///
    /// Fails with [`Error::InvalidLoadFactor`] if `value` is zero, negative,
    /// NaN, or infinite.
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(Error::InvalidLoadFactor(value))
        }
    }

    /// Returns the raw ratio.
    pub fn get(self) -> f64 {
        self.0
    }

    /// Whether `len` elements spread over `buckets` buckets is over the limit.
    #[inline]
    pub(crate) fn is_exceeded(self, len: usize, buckets: usize) -> bool {
        len as f64 / buckets as f64 > self.0
    }

    /// Bucket count to request when building a table for `len` elements up
    /// front: `ceil(len / load_factor) + 1`.
    pub(crate) fn buckets_for(self, len: usize) -> usize {
        let exact = len as f64 / self.0;
        // Saturating float-to-int conversion, then round up by hand since
        // `f64::ceil` is not available in core.
        let truncated = exact as usize;
        let ceiled = if (truncated as f64) < exact {
            truncated.saturating_add(1)
        } else {
            truncated
        };
        ceiled.saturating_add(1)
    }
}

impl Default for LoadFactor {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f64> for LoadFactor {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

/// A position in [`PRIMES`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Capacity {
    index: usize,
}

impl From<usize> for Capacity {
    /// Picks the smallest prime at least `requested`, or the largest prime if
    /// `requested` is beyond the sequence.
    #[inline]
    fn from(requested: usize) -> Self {
        let index = PRIMES.partition_point(|&p| p < requested);
        Capacity {
            index: index.min(PRIMES.len() - 1),
        }
    }
}

impl Capacity {
    pub(crate) const MIN: Capacity = Capacity { index: 0 };
    #[cfg(test)]
    pub(crate) const MAX: Capacity = Capacity {
        index: PRIMES.len() - 1,
    };

    #[inline(always)]
    pub(crate) fn buckets(self) -> usize {
        PRIMES[self.index]
    }

    #[inline(always)]
    pub(crate) fn index(self) -> usize {
        self.index
    }

    /// The capacity needed to hold `len` elements under `load_factor`, if it
    /// is larger than `self`.
    ///
    /// Returns `Ok(None)` when `self` already suffices. Otherwise steps
    /// forward at least once, and further only while the ratio is still over
    /// the limit. Fails if even the largest prime is too small.
    pub(crate) fn grown_for(self, len: usize, load_factor: LoadFactor) -> Result<Option<Self>> {
        if !load_factor.is_exceeded(len, self.buckets()) {
            return Ok(None);
        }

        PRIMES[self.index + 1..]
            .iter()
            .position(|&p| !load_factor.is_exceeded(len, p))
            .map(|offset| {
                Some(Capacity {
                    index: self.index + 1 + offset,
                })
            })
            .ok_or(Error::CapacityExhausted {
                capacity: self.buckets(),
            })
    }

    /// One step back, if `len` elements use a quarter or less of the buckets.
    ///
    /// Never goes below [`Capacity::MIN`].
    pub(crate) fn shrunk_for(self, len: usize) -> Option<Self> {
        if self.index > 0 && len <= self.buckets() / 4 {
            Some(Capacity {
                index: self.index - 1,
            })
        } else {
            None
        }
    }
}
