// Codeword lengths and divisor selection

use crate::core::{Parameter, RiceError, RiceResult};

/// Largest power-of-two exponent tried by [`estimate_parameter`]
pub const MAX_SEARCH_EXPONENT: u32 = 20;

/// Exact symbol count of the textual codeword for `value`, sign included.
///
/// The packed stream spends the same number of bits (the sign symbol becomes
/// a sign bit). Nothing is allocated, so this works for any quotient.
pub fn codeword_len(value: i64, m: u64) -> RiceResult<u64> {
    Ok(len_with(Parameter::new(m)?, value))
}

fn len_with(param: Parameter, value: i64) -> u64 {
    let (quotient, remainder) = param.split(value.unsigned_abs());
    let (width, _) = param.remainder_field(remainder);
    // sign + unary run + terminator + remainder
    1 + quotient + 1 + width as u64
}

/// Total bits of the packed stream for `values`.
pub fn stream_bits(values: &[i64], m: u64) -> RiceResult<u64> {
    let param = Parameter::new(m)?;
    values.iter().try_fold(0u64, |total, &v| {
        total
            .checked_add(len_with(param, v))
            .ok_or(RiceError::LengthOverflow)
    })
}

/// Candidate with the fewest stream bits; ties go to the smaller divisor.
///
/// Candidates whose stream length does not fit a `u64` are skipped.
/// Returns `None` when no candidate is left.
pub fn best_parameter(values: &[i64], candidates: &[u64]) -> RiceResult<Option<u64>> {
    let mut best: Option<(u64, u64)> = None;

    for &m in candidates {
        let bits = match stream_bits(values, m) {
            Ok(bits) => bits,
            Err(RiceError::LengthOverflow) => {
                tracing::trace!(m, "skipping candidate, stream length overflows");
                continue;
            }
            Err(e) => return Err(e),
        };
        let better = match best {
            None => true,
            Some((best_m, best_bits)) => bits < best_bits || (bits == best_bits && m < best_m),
        };
        if better {
            best = Some((m, bits));
        }
    }

    Ok(best.map(|(m, _)| m))
}

/// Pick a divisor for `values`.
///
/// Tries every power of two up to `2^MAX_SEARCH_EXPONENT` plus the Golomb
/// divisor suggested by the mean magnitude, then keeps whichever packs the
/// values into the fewest bits. Empty input gives 1.
///
/// Fails with `LengthOverflow` only when no candidate can be sized.
pub fn estimate_parameter(values: &[i64]) -> RiceResult<u64> {
    if values.is_empty() {
        return Ok(1);
    }

    let mut candidates: Vec<u64> = (0..=MAX_SEARCH_EXPONENT).map(|e| 1u64 << e).collect();
    let guess = golomb_guess(values);
    if !candidates.contains(&guess) {
        candidates.push(guess);
    }

    let best = best_parameter(values, &candidates)?.ok_or(RiceError::LengthOverflow)?;
    tracing::debug!(count = values.len(), guess, best, "estimated rice parameter");
    Ok(best)
}

/// ceil(mean * ln 2), the usual approximation for geometric sources
fn golomb_guess(values: &[i64]) -> u64 {
    let sum: f64 = values.iter().map(|&v| v.unsigned_abs() as f64).sum();
    let mean = sum / values.len() as f64;
    ((mean * std::f64::consts::LN_2).ceil() as u64).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lengths() {
        assert_eq!(codeword_len(5, 1).unwrap(), 7);
        assert_eq!(codeword_len(5, 2).unwrap(), 5);
        assert_eq!(codeword_len(2, 5).unwrap(), 4);
        assert_eq!(codeword_len(3, 5).unwrap(), 5);
        assert_eq!(codeword_len(i64::MIN, 1).unwrap(), (1u64 << 63) + 2);
        assert_eq!(codeword_len(1, 0), Err(RiceError::InvalidParameter(0)));
    }

    #[test]
    fn test_stream_bits_overflow() {
        let values = [i64::MIN, i64::MIN];
        assert_eq!(stream_bits(&values, 1), Err(RiceError::LengthOverflow));
        assert!(stream_bits(&values, 2).is_ok());
    }

    #[test]
    fn test_golomb_guess_floor() {
        assert_eq!(golomb_guess(&[0, 0, 0]), 1);
        assert_eq!(golomb_guess(&[100, -100]), 70);
    }
}
