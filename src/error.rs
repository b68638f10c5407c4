/// Errors reported by the fallible operations of this crate.
///
/// Every fallible method comes in two versions: a `try_xxx` method returning
/// [`Result`], and a convenience `xxx` method which panics with the error's
/// message instead.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The load factor was zero, negative, NaN, or infinite.
    #[error("load factor must be positive and finite, got {0}")]
    InvalidLoadFactor(f64),

    /// The table is already at the largest supported bucket count and
    /// cannot grow any further.
    #[error("hash table capacity exhausted at {capacity} buckets")]
    CapacityExhausted {
        /// The bucket count the table was stuck at.
        capacity: usize,
    },

    /// The set was structurally modified after a [`Cursor`] was created.
    ///
    /// [`Cursor`]: crate::hash_set::Cursor
    #[error("set was modified while a cursor was iterating over it")]
    ConcurrentModification,
}

/// Result type of this crate.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            "load factor must be positive and finite, got -1",
            format!("{}", Error::InvalidLoadFactor(-1.0))
        );
        assert_eq!(
            "hash table capacity exhausted at 17914393 buckets",
            format!(
                "{}",
                Error::CapacityExhausted {
                    capacity: 17_914_393
                }
            )
        );
    }
}
