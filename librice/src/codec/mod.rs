//! textual rice codewords
//!
//! A codeword is a sign symbol (`+` or `-`), the quotient in unary (`1`s
//! closed by a `0`) and a truncated-binary remainder. The divisor is never
//! part of the codeword: decoding with a different M than the one used to
//! encode returns a wrong value or a malformed-codeword error, it is not
//! detected as a mismatch.
mod decoder;
mod encoder;

use crate::core::{Parameter, RiceError, RiceResult};

/// Default cap on the unary run of a single codeword.
pub const DEFAULT_MAX_QUOTIENT: u64 = 1 << 20;

/// Rice codec for one divisor.
///
/// ```
/// use librice::RiceCodec;
///
/// let codec = RiceCodec::new(2).unwrap();
/// assert_eq!(codec.encode(5).unwrap(), "+1101");
/// assert_eq!(codec.decode("+1101").unwrap(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiceCodec {
    param: Parameter,
    max_quotient: u64,
}

impl RiceCodec {
    /// codec for divisor `m` (must be at least 1)
    pub fn new(m: u64) -> RiceResult<Self> {
        Ok(RiceCodec {
            param: Parameter::new(m)?,
            max_quotient: DEFAULT_MAX_QUOTIENT,
        })
    }

    /// Set the longest unary run accepted when encoding or decoding.
    ///
    /// `u64::MAX` turns the guard off.
    pub fn with_max_quotient(mut self, max_quotient: u64) -> Self {
        self.max_quotient = max_quotient;
        self
    }

    pub fn parameter(&self) -> Parameter {
        self.param
    }

    pub fn m(&self) -> u64 {
        self.param.m()
    }

    pub fn max_quotient(&self) -> u64 {
        self.max_quotient
    }

    /// encode every value, stopping at the first error
    pub fn encode_batch(&self, values: &[i64]) -> RiceResult<Vec<String>> {
        values.iter().map(|&v| self.encode(v)).collect()
    }

    /// decode every codeword, stopping at the first error
    pub fn decode_batch<S: AsRef<str>>(&self, codewords: &[S]) -> RiceResult<Vec<i64>> {
        codewords.iter().map(|c| self.decode(c.as_ref())).collect()
    }

    pub(crate) fn check_quotient(&self, quotient: u64) -> RiceResult<()> {
        if quotient > self.max_quotient {
            tracing::debug!(quotient, limit = self.max_quotient, "rejecting unary run");
            return Err(RiceError::QuotientTooLarge {
                quotient,
                limit: self.max_quotient,
            });
        }
        Ok(())
    }
}

/// Encode `value` with divisor `m` using the default limits.
///
/// The same `m` must be passed to [`decode`].
pub fn encode(value: i64, m: u64) -> RiceResult<String> {
    RiceCodec::new(m)?.encode(value)
}

/// Decode a codeword produced by [`encode`] with the same `m`.
///
/// A different `m` is not detected and yields a wrong value or an error.
pub fn decode(codeword: &str, m: u64) -> RiceResult<i64> {
    RiceCodec::new(m)?.decode(codeword)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Malformed;

    #[test]
    fn test_power_of_two_example() {
        assert_eq!(encode(5, 2).unwrap(), "+1101");
        assert_eq!(decode("+1101", 2).unwrap(), 5);
    }

    #[test]
    fn test_zero_divisor_rejected() {
        assert_eq!(encode(1, 0), Err(RiceError::InvalidParameter(0)));
        assert_eq!(decode("+0", 0), Err(RiceError::InvalidParameter(0)));
    }

    #[test]
    fn test_quotient_guard_both_directions() {
        let codec = RiceCodec::new(1).unwrap().with_max_quotient(3);
        assert!(codec.encode(3).is_ok());
        assert_eq!(
            codec.encode(4),
            Err(RiceError::QuotientTooLarge {
                quotient: 4,
                limit: 3
            })
        );
        assert!(matches!(
            codec.decode("+11110"),
            Err(RiceError::QuotientTooLarge { limit: 3, .. })
        ));
    }

    #[test]
    fn test_batch_stops_at_first_error() {
        let codec = RiceCodec::new(4).unwrap();
        let words = codec.encode_batch(&[0, 7, -9]).unwrap();
        assert_eq!(codec.decode_batch(&words).unwrap(), vec![0, 7, -9]);

        let bad = ["+000", "+1", "+001"];
        assert_eq!(
            codec.decode_batch(&bad),
            Err(RiceError::MalformedCodeword(Malformed::MissingTerminator))
        );
    }
}
