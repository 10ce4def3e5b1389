// Bit-level reader/writer for the packed stream

/// Bit-level writer, MSB first
#[derive(Debug, Clone)]
pub struct BitWriter {
    bytes: Vec<u8>,
    current_byte: u8,
    bit_pos: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        BitWriter {
            bytes: Vec::new(),
            current_byte: 0,
            bit_pos: 0,
        }
    }

    pub fn write_bit(&mut self, bit: bool) {
        if bit {
            self.current_byte |= 1 << (7 - self.bit_pos);
        }

        self.bit_pos += 1;
        if self.bit_pos == 8 {
            self.bytes.push(self.current_byte);
            self.current_byte = 0;
            self.bit_pos = 0;
        }
    }

    /// write the low `num_bits` of `value`, most significant first
    pub fn write_bits(&mut self, value: u64, num_bits: u32) {
        for i in (0..num_bits).rev() {
            self.write_bit((value >> i) & 1 == 1);
        }
    }

    /// `count` ones followed by a zero
    pub fn write_unary(&mut self, count: u64) {
        for _ in 0..count {
            self.write_bit(true);
        }
        self.write_bit(false);
    }

    /// bits written so far
    pub fn bit_len(&self) -> u64 {
        self.bytes.len() as u64 * 8 + self.bit_pos as u64
    }

    /// finish, zero-padding the last byte
    pub fn into_bytes(mut self) -> Vec<u8> {
        if self.bit_pos > 0 {
            self.bytes.push(self.current_byte);
        }
        self.bytes
    }

    pub fn byte_count(&self) -> usize {
        self.bytes.len() + if self.bit_pos > 0 { 1 } else { 0 }
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Bit-level reader, MSB first
///
/// Reads past the end return `None` rather than padding with zeros.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    bytes: &'a [u8],
    bit_pos: u64,
}

impl<'a> BitReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::at(bytes, 0)
    }

    /// start reading `bit_offset` bits into `bytes`
    pub fn at(bytes: &'a [u8], bit_offset: u64) -> Self {
        BitReader {
            bytes,
            bit_pos: bit_offset,
        }
    }

    pub fn read_bit(&mut self) -> Option<bool> {
        let byte = *self.bytes.get(usize::try_from(self.bit_pos / 8).ok()?)?;
        let bit = (byte >> (7 - (self.bit_pos % 8))) & 1;
        self.bit_pos += 1;
        Some(bit == 1)
    }

    pub fn read_bits(&mut self, num_bits: u32) -> Option<u64> {
        let mut value = 0u64;
        for _ in 0..num_bits {
            value = (value << 1) | self.read_bit()? as u64;
        }
        Some(value)
    }

    /// bits consumed from the start of the slice
    pub fn position(&self) -> u64 {
        self.bit_pos
    }

    pub fn remaining_bits(&self) -> u64 {
        (self.bytes.len() as u64 * 8).saturating_sub(self.bit_pos)
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining_bits() == 0
    }
}
