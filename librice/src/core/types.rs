//! common types for the rice codec

use serde::Serialize;

use super::error::{RiceError, RiceResult};

// symbols

/// sign symbol for non-negative values
pub const PLUS: char = '+';

/// sign symbol for negative values
pub const MINUS: char = '-';

// types

/// sign carried in front of every codeword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Sign {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
}

impl Sign {
    /// sign of a value, zero counts as positive
    pub fn of(value: i64) -> Self {
        if value < 0 {
            Sign::Minus
        } else {
            Sign::Plus
        }
    }

    /// textual symbol
    pub fn symbol(self) -> char {
        match self {
            Sign::Plus => PLUS,
            Sign::Minus => MINUS,
        }
    }

    /// parse a textual symbol
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            PLUS => Some(Sign::Plus),
            MINUS => Some(Sign::Minus),
            _ => None,
        }
    }

    /// single-bit form used by the packed stream (0 = plus, 1 = minus)
    pub fn bit(self) -> bool {
        self == Sign::Minus
    }

    pub fn from_bit(bit: bool) -> Self {
        if bit {
            Sign::Minus
        } else {
            Sign::Plus
        }
    }

    /// apply to a magnitude, failing if the result leaves the i64 range
    pub fn apply(self, magnitude: u64) -> RiceResult<i64> {
        let signed = match self {
            Sign::Plus => magnitude as i128,
            Sign::Minus => -(magnitude as i128),
        };
        i64::try_from(signed).map_err(|_| RiceError::Overflow)
    }
}

/// Validated divisor M together with the values derived from it.
///
/// | Field  | Meaning                                          |
/// |--------|--------------------------------------------------|
/// | `m`    | divisor, at least 1                              |
/// | `k`    | bit length of `m - 1` (0 when `m == 1`)          |
/// | `diff` | `2^k - m`, zero exactly when `m` is a power of 2 |
///
/// Remainders below `diff` take `k - 1` bits, the rest take `k` bits and are
/// offset by `diff` (truncated binary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Parameter {
    m: u64,
    k: u32,
    diff: u64,
}

impl Parameter {
    pub fn new(m: u64) -> RiceResult<Self> {
        if m < 1 {
            return Err(RiceError::InvalidParameter(m));
        }

        // integer bit length, 2^k >= m
        let k = u64::BITS - (m - 1).leading_zeros();
        // k can be 64, so widen before shifting
        let diff = ((1u128 << k) - m as u128) as u64;

        Ok(Parameter { m, k, diff })
    }

    pub fn m(self) -> u64 {
        self.m
    }

    pub fn k(self) -> u32 {
        self.k
    }

    pub fn diff(self) -> u64 {
        self.diff
    }

    pub fn is_power_of_two(self) -> bool {
        self.diff == 0
    }

    /// quotient and remainder of a magnitude
    pub fn split(self, magnitude: u64) -> (u64, u64) {
        (magnitude / self.m, magnitude % self.m)
    }

    /// Width and bit pattern of the remainder field.
    ///
    /// `k - 1` is never allowed to go negative; `m == 1` emits no remainder
    /// bits at all.
    pub fn remainder_field(self, remainder: u64) -> (u32, u64) {
        if remainder < self.diff {
            (self.k.saturating_sub(1), remainder)
        } else {
            (self.k, remainder + self.diff)
        }
    }

    /// shortest remainder field a valid codeword can carry
    pub fn min_remainder_width(self) -> u32 {
        if self.diff > 0 {
            self.k - 1
        } else {
            self.k
        }
    }
}

/// A decoded codeword split into its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodewordParts {
    /// divisor used to decode
    pub m: u64,
    pub sign: Sign,
    /// length of the unary run
    pub quotient: u64,
    pub remainder: u64,
    /// number of bits in the remainder field (k - 1 or k)
    pub remainder_width: u32,
    /// decoded value
    pub value: i64,
    /// total symbols including the sign
    pub length: u64,
}
