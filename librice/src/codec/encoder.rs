use super::RiceCodec;
use crate::core::{RiceError, RiceResult, Sign};

impl RiceCodec {
    /// Encode a value into a textual codeword.
    ///
    /// Fails with `QuotientTooLarge` when `|value| / m` exceeds the
    /// configured limit.
    pub fn encode(&self, value: i64) -> RiceResult<String> {
        let sign = Sign::of(value);
        let magnitude = value.unsigned_abs();

        let (quotient, remainder) = self.param.split(magnitude);
        self.check_quotient(quotient)?;

        let (width, field) = self.param.remainder_field(remainder);
        tracing::trace!(value, m = self.param.m(), quotient, remainder, width, "encode");

        let run = unary_run(quotient)?;

        let mut codeword = String::with_capacity(run.saturating_add(width as usize + 2));
        codeword.push(sign.symbol());

        // unary quotient
        codeword.extend(std::iter::repeat('1').take(run));
        codeword.push('0');

        // remainder, MSB first
        for i in (0..width).rev() {
            codeword.push(if (field >> i) & 1 == 1 { '1' } else { '0' });
        }

        Ok(codeword)
    }
}

/// Length of the unary run as a `usize`; fails when the target cannot address it.
fn unary_run(quotient: u64) -> RiceResult<usize> {
    usize::try_from(quotient).map_err(|_| RiceError::QuotientTooLarge {
        quotient,
        limit: usize::MAX as u64,
    })
}
