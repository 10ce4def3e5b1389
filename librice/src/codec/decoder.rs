use super::RiceCodec;
use crate::core::{CodewordParts, Malformed, RiceError, RiceResult, Sign};

/// Decoder progress through a codeword. Strictly forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
    ExpectSign,
    ScanUnary,
    ReadRemainder,
    Done,
}

fn binary_digit(position: usize, symbol: char) -> RiceResult<u64> {
    match symbol {
        '0' => Ok(0),
        '1' => Ok(1),
        _ => Err(Malformed::UnexpectedSymbol { position, symbol }.into()),
    }
}

impl RiceCodec {
    /// Decode a textual codeword back into its value.
    pub fn decode(&self, codeword: &str) -> RiceResult<i64> {
        self.inspect(codeword).map(|parts| parts.value)
    }

    /// Decode a codeword and report its fields.
    pub fn inspect(&self, codeword: &str) -> RiceResult<CodewordParts> {
        let param = self.param;
        let k = param.k();

        let mut state = DecodeState::ExpectSign;
        let mut sign = Sign::Plus;
        let mut quotient = 0u64;
        let mut field = 0u64;
        let mut width = 0u32;
        let mut length = 0u64;

        for (position, symbol) in codeword.chars().enumerate() {
            match state {
                DecodeState::ExpectSign => {
                    sign = Sign::from_symbol(symbol).ok_or(Malformed::MissingSign)?;
                    state = DecodeState::ScanUnary;
                }
                DecodeState::ScanUnary => {
                    if binary_digit(position, symbol)? == 1 {
                        quotient += 1;
                        self.check_quotient(quotient)?;
                    } else if k == 0 {
                        state = DecodeState::Done;
                    } else {
                        state = DecodeState::ReadRemainder;
                    }
                }
                DecodeState::ReadRemainder => {
                    field = (field << 1) | binary_digit(position, symbol)?;
                    width += 1;
                    if width == k {
                        state = DecodeState::Done;
                    }
                }
                DecodeState::Done => {
                    let count = codeword.chars().count() - position;
                    tracing::debug!(count, "trailing symbols after codeword");
                    return Err(Malformed::TrailingSymbols { count }.into());
                }
            }
            length += 1;
        }

        let remainder = match state {
            DecodeState::ExpectSign => return Err(Malformed::MissingSign.into()),
            DecodeState::ScanUnary => return Err(Malformed::MissingTerminator.into()),
            // short form, only valid at exactly k - 1 bits below diff
            DecodeState::ReadRemainder => {
                let minimum = param.min_remainder_width();
                if width < minimum {
                    return Err(Malformed::RemainderTooShort {
                        expected: minimum,
                        found: width,
                    }
                    .into());
                }
                if field >= param.diff() {
                    return Err(Malformed::NonCanonicalRemainder.into());
                }
                field
            }
            DecodeState::Done if field >= param.diff() => field - param.diff(),
            DecodeState::Done => field,
        };

        let magnitude = quotient
            .checked_mul(param.m())
            .and_then(|s| s.checked_add(remainder))
            .ok_or(RiceError::Overflow)?;
        let value = sign.apply(magnitude)?;

        tracing::trace!(value, m = param.m(), quotient, remainder, width, "decode");

        Ok(CodewordParts {
            m: param.m(),
            sign,
            quotient,
            remainder,
            remainder_width: width,
            value,
            length,
        })
    }
}
