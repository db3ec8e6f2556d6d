//! Member module - the identity handle for pool members

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Stable identifier for a live pool member
///
/// The host pool assigns each member an unsigned-integer handle that stays
/// fixed for the member's lifetime. Handles may be reused by the pool after a
/// member is destroyed and collected; Culler never generates them, it only
/// carries them.
///
/// The original host exposed 32-bit handles; `u64` is a strict widening and
/// round-trips any value the pool can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberId(u64);

impl MemberId {
    /// Wrap a raw handle obtained from the pool
    ///
    /// # Examples
    ///
    /// ```
    /// use culler_domain::MemberId;
    ///
    /// let id = MemberId::new(42);
    /// assert_eq!(id.value(), 42);
    /// ```
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw handle value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MemberId {
    type Err = ParseIntError;

    /// Parse a MemberId from its decimal representation
    ///
    /// This is primarily for the persistence layer, which stores handles as
    /// plain decimal text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

impl From<u64> for MemberId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: MemberId ordering matches u64 ordering
        #[test]
        fn test_id_ordering_property(a: u64, b: u64) {
            let id_a = MemberId::new(a);
            let id_b = MemberId::new(b);

            // Ordering should be consistent with underlying values
            prop_assert_eq!(id_a < id_b, a < b);
            prop_assert_eq!(id_a == id_b, a == b);
            prop_assert_eq!(id_a > id_b, a > b);
        }

        /// Property: Round-trip through string representation preserves the handle
        #[test]
        fn test_id_string_roundtrip(value: u64) {
            let id = MemberId::new(value);
            let id_str = id.to_string();

            match id_str.parse::<MemberId>() {
                Ok(parsed) => prop_assert_eq!(id, parsed),
                Err(e) => return Err(TestCaseError::fail(e.to_string())),
            }
        }
    }
}
