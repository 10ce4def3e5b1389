//! packed bit stream of rice codewords
//!
//! Each value is written as one sign bit (0 = `+`, 1 = `-`), the quotient in
//! unary and the truncated-binary remainder, MSB first with no byte
//! alignment between values. The final byte is zero-padded, so the number of
//! values has to travel out of band (like the divisor).
//!
//! The remainder is prefix-free: the decoder reads `k - 1` bits and only
//! pulls one more when that partial value is at least `diff`.

use crate::codec::RiceCodec;
use crate::core::{BitReader, BitWriter, Malformed, Parameter, RiceError, RiceResult, Sign};

/// Incremental packer for a sequence of values.
#[derive(Debug, Clone)]
pub struct StreamEncoder {
    codec: RiceCodec,
    bits: BitWriter,
    count: u64,
}

impl StreamEncoder {
    pub fn new(codec: RiceCodec) -> Self {
        StreamEncoder {
            codec,
            bits: BitWriter::new(),
            count: 0,
        }
    }

    /// append one value
    pub fn push(&mut self, value: i64) -> RiceResult<()> {
        let param = self.codec.parameter();
        let (quotient, remainder) = param.split(value.unsigned_abs());
        self.codec.check_quotient(quotient)?;

        let (width, field) = param.remainder_field(remainder);
        self.bits.write_bit(Sign::of(value).bit());
        self.bits.write_unary(quotient);
        self.bits.write_bits(field, width);
        self.count += 1;
        Ok(())
    }

    /// values written so far
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn bit_len(&self) -> u64 {
        self.bits.bit_len()
    }

    pub fn finish(self) -> Vec<u8> {
        tracing::trace!(count = self.count, bits = self.bits.bit_len(), "stream finished");
        self.bits.into_bytes()
    }
}

/// Incremental unpacker.
///
/// Bytes can be fed in pieces; [`StreamDecoder::next_value`] returns
/// `Ok(None)` until a whole codeword is buffered. Zero padding at the end of
/// a stream can look like extra zeros, so callers stop after the number of
/// values they expect.
#[derive(Debug, Clone)]
pub struct StreamDecoder {
    codec: RiceCodec,
    buffer: Vec<u8>,
    /// bits of `buffer` already consumed
    bit_pos: u64,
    decoded: u64,
}

impl StreamDecoder {
    pub fn new(codec: RiceCodec) -> Self {
        StreamDecoder {
            codec,
            buffer: Vec::new(),
            bit_pos: 0,
            decoded: 0,
        }
    }

    /// append more bytes
    pub fn feed(&mut self, data: &[u8]) {
        // drop fully consumed bytes first
        let consumed = (self.bit_pos / 8) as usize;
        if consumed > 0 {
            self.buffer.drain(..consumed);
            self.bit_pos -= consumed as u64 * 8;
        }
        self.buffer.extend_from_slice(data);
    }

    /// Decode the next value if its codeword is fully buffered.
    pub fn next_value(&mut self) -> RiceResult<Option<i64>> {
        let mut reader = BitReader::at(&self.buffer, self.bit_pos);
        match read_value(&mut reader, &self.codec)? {
            Some(value) => {
                self.bit_pos = reader.position();
                self.decoded += 1;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// values decoded so far
    pub fn decoded(&self) -> u64 {
        self.decoded
    }

    /// buffered bits not yet consumed
    pub fn buffered_bits(&self) -> u64 {
        (self.buffer.len() as u64 * 8).saturating_sub(self.bit_pos)
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
        self.bit_pos = 0;
        self.decoded = 0;
    }
}

/// Read one value, `None` if the reader runs out first.
fn read_value(reader: &mut BitReader<'_>, codec: &RiceCodec) -> RiceResult<Option<i64>> {
    let Some(sign) = reader.read_bit() else {
        return Ok(None);
    };

    let mut quotient = 0u64;
    loop {
        match reader.read_bit() {
            Some(true) => {
                quotient += 1;
                codec.check_quotient(quotient)?;
            }
            Some(false) => break,
            None => return Ok(None),
        }
    }

    let Some(remainder) = read_remainder(reader, codec.parameter()) else {
        return Ok(None);
    };

    let magnitude = quotient
        .checked_mul(codec.m())
        .and_then(|s| s.checked_add(remainder))
        .ok_or(RiceError::Overflow)?;
    Sign::from_bit(sign).apply(magnitude).map(Some)
}

fn read_remainder(reader: &mut BitReader<'_>, param: Parameter) -> Option<u64> {
    if param.k() == 0 {
        return Some(0);
    }

    let short = reader.read_bits(param.k() - 1)?;
    if short < param.diff() {
        return Some(short);
    }

    let long = (short << 1) | reader.read_bit()? as u64;
    Some(long - param.diff())
}

/// Pack `values` with divisor `m`.
pub fn encode_all(values: &[i64], m: u64) -> RiceResult<Vec<u8>> {
    encode_all_with(values, RiceCodec::new(m)?)
}

/// Pack `values` with an already configured codec.
pub fn encode_all_with(values: &[i64], codec: RiceCodec) -> RiceResult<Vec<u8>> {
    let mut encoder = StreamEncoder::new(codec);
    for &value in values {
        encoder.push(value)?;
    }
    Ok(encoder.finish())
}

/// Unpack exactly `count` values packed with divisor `m`.
pub fn decode_all(bytes: &[u8], m: u64, count: usize) -> RiceResult<Vec<i64>> {
    decode_all_with(bytes, RiceCodec::new(m)?, count)
}

/// Unpack exactly `count` values with an already configured codec.
pub fn decode_all_with(bytes: &[u8], codec: RiceCodec, count: usize) -> RiceResult<Vec<i64>> {
    let mut reader = BitReader::new(bytes);
    // every codeword takes at least two bits
    let mut values = Vec::with_capacity(count.min(bytes.len() * 4));

    for _ in 0..count {
        match read_value(&mut reader, &codec)? {
            Some(value) => values.push(value),
            None => {
                tracing::debug!(decoded = values.len(), count, "stream truncated");
                return Err(Malformed::Truncated.into());
            }
        }
    }

    Ok(values)
}
