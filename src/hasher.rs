use core::hash::BuildHasherDefault;

use siphasher::sip::SipHasher13;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The hasher builder used by [`HashSet`](crate::HashSet) when none is
        /// specified.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// The hasher builder used by [`HashSet`](crate::HashSet) when none is
        /// specified.
        pub type DefaultHashBuilder = std::collections::hash_map::RandomState;
    } else {
        /// The hasher builder used by [`HashSet`](crate::HashSet) when none is
        /// specified.
        pub type DefaultHashBuilder = FixedState;
    }
}

/// Builds SipHash-1-3 hashers with fixed zero keys.
///
/// Produces the same output for the same input in every process, which is
/// what the `Hash` impl of [`HashSet`](crate::HashSet) needs so that equal
/// sets hash equally whatever their own hasher state. Not resistant to
/// collision attacks.
pub type FixedState = BuildHasherDefault<SipHasher13>;

#[cfg(test)]
mod tests {
    use core::hash::BuildHasher;
    use core::hash::Hash;
    use core::hash::Hasher;

    use super::*;

    #[test]
    fn fixed_state_uses_zero_keys() {
        let mut hasher = SipHasher13::new_with_keys(0, 0);
        "chain".hash(&mut hasher);
        assert_eq!(FixedState::default().hash_one("chain"), hasher.finish());
    }

    #[test]
    fn fixed_state_is_deterministic() {
        let a = FixedState::default();
        let b = FixedState::default();
        assert_eq!(a.hash_one(12345u64), b.hash_one(12345u64));
        assert_ne!(a.hash_one(1u64), a.hash_one(2u64));
    }
}
