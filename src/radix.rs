// Mixed-radix integer <-> digit-list conversion.

use std::str::FromStr;

use crate::error::{Error, Result};

/// How template slot positions map to numeric significance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ByteOrder {
    /// First slot in template order is least significant.
    #[default]
    Little,
    /// First slot in template order is most significant.
    Big,
    /// Explicit significance rank per slot position; the lowest rank is the
    /// least significant slot. Ties resolve by slot position.
    Ranks(Vec<usize>),
}

impl ByteOrder {
    /// Slot positions ordered least-significant first. Both conversion
    /// directions consume the same ordering, which is what makes every
    /// byte order a bijection.
    pub(crate) fn significance(&self, slots: usize) -> Result<Vec<usize>> {
        match self {
            ByteOrder::Little => Ok((0..slots).collect()),
            ByteOrder::Big => Ok((0..slots).rev().collect()),
            ByteOrder::Ranks(ranks) => {
                if ranks.len() != slots {
                    return Err(Error::BadByteOrder { got: ranks.len(), slots });
                }
                let mut order: Vec<usize> = (0..slots).collect();
                order.sort_by_key(|&pos| ranks[pos]);
                Ok(order)
            }
        }
    }
}

impl FromStr for ByteOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "little" => Ok(ByteOrder::Little),
            "big" => Ok(ByteOrder::Big),
            other => Err(Error::UnknownByteOrder(other.to_string())),
        }
    }
}

/// Split `value` into one digit per slot, peeling radices off in
/// significance order. Caller guarantees `value < capacity`.
pub(crate) fn decompose(value: u64, radices: &[u64], significance: &[usize]) -> Vec<u64> {
    let mut digits = vec![0u64; radices.len()];
    let mut rest = value;
    for &pos in significance {
        digits[pos] = rest % radices[pos];
        rest /= radices[pos];
    }
    debug_assert_eq!(rest, 0, "value exceeded the radix capacity");
    digits
}

/// Exact inverse of [`decompose`] under the same significance order.
pub(crate) fn compose(digits: &[u64], radices: &[u64], significance: &[usize]) -> u64 {
    let mut value = 0u64;
    for &pos in significance.iter().rev() {
        value = value * radices[pos] + digits[pos];
    }
    value
}
