//! rerice - Rice/Golomb converter library
//!
//! Helpers behind the `rerice` command: textual codewords, a small
//! container for packed value streams, and divisor estimation.
//!
//! Packed file layout (little-endian):
//!
//! | Offset | Size | Field                      |
//! |--------|------|----------------------------|
//! | 0      | 4    | magic `RICE`               |
//! | 4      | 1    | format version             |
//! | 5      | 8    | divisor M                  |
//! | 13     | 8    | value count                |
//! | 21     | ...  | packed codewords           |

pub mod values;

use anyhow::{bail, Context, Result};
use librice::stream::{decode_all_with, encode_all_with};
use serde::Serialize;

/// Re-export librice types
pub use librice::{CodewordParts, RiceCodec, RiceError, DEFAULT_MAX_QUOTIENT};

/// Magic number "RICE"
pub const MAGIC: [u8; 4] = *b"RICE";

/// container format version
pub const FORMAT_VERSION: u8 = 1;

/// header size including magic
pub const HEADER_SIZE: usize = 21;

/// Codec settings shared by every command
#[derive(Debug, Clone, Copy)]
pub struct CodecOptions {
    /// Divisor M
    pub m: u64,
    /// Longest unary run accepted
    pub max_quotient: u64,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            m: 1,
            max_quotient: DEFAULT_MAX_QUOTIENT,
        }
    }
}

impl CodecOptions {
    pub fn new(m: u64) -> Self {
        Self {
            m,
            ..Default::default()
        }
    }

    /// Set the unary run limit
    pub fn with_max_quotient(mut self, max_quotient: u64) -> Self {
        self.max_quotient = max_quotient;
        self
    }

    pub fn codec(&self) -> Result<RiceCodec> {
        let codec = RiceCodec::new(self.m).context("Invalid divisor")?;
        Ok(codec.with_max_quotient(self.max_quotient))
    }
}

/// Encode values to textual codewords
pub fn encode_values(values: &[i64], options: CodecOptions) -> Result<Vec<String>> {
    let codec = options.codec()?;
    values
        .iter()
        .map(|&v| {
            codec
                .encode(v)
                .with_context(|| format!("Failed to encode {}", v))
        })
        .collect()
}

/// Decode textual codewords
pub fn decode_codewords<S: AsRef<str>>(codewords: &[S], options: CodecOptions) -> Result<Vec<i64>> {
    let codec = options.codec()?;
    codewords
        .iter()
        .map(|c| {
            let c = c.as_ref();
            codec
                .decode(c)
                .with_context(|| format!("Failed to decode {:?}", c))
        })
        .collect()
}

/// Break a codeword into its fields
pub fn inspect_codeword(codeword: &str, options: CodecOptions) -> Result<CodewordParts> {
    options
        .codec()?
        .inspect(codeword)
        .with_context(|| format!("Failed to decode {:?}", codeword))
}

/// Information about a packed file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackInfo {
    pub version: u8,
    pub m: u64,
    pub count: u64,
    pub payload_bytes: usize,
    pub file_size: usize,
}

/// Pack values into a container
pub fn pack(values: &[i64], options: CodecOptions) -> Result<Vec<u8>> {
    let payload = encode_all_with(values, options.codec()?).context("Failed to pack values")?;

    let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
    out.extend_from_slice(&MAGIC);
    out.push(FORMAT_VERSION);
    out.extend_from_slice(&options.m.to_le_bytes());
    out.extend_from_slice(&(values.len() as u64).to_le_bytes());
    out.extend_from_slice(&payload);

    tracing::debug!(
        count = values.len(),
        m = options.m,
        bytes = out.len(),
        "packed values"
    );
    Ok(out)
}

/// Read the container header
pub fn read_pack_info(data: &[u8]) -> Result<PackInfo> {
    if data.len() < HEADER_SIZE {
        bail!(
            "Invalid packed file: {} bytes is shorter than the {}-byte header",
            data.len(),
            HEADER_SIZE
        );
    }
    if data[0..4] != MAGIC {
        bail!("Invalid packed file: bad magic");
    }

    let version = data[4];
    if version != FORMAT_VERSION {
        bail!("Unsupported packed file version {}", version);
    }

    let m = u64::from_le_bytes(read_array(&data[5..13])?);
    let count = u64::from_le_bytes(read_array(&data[13..21])?);

    Ok(PackInfo {
        version,
        m,
        count,
        payload_bytes: data.len() - HEADER_SIZE,
        file_size: data.len(),
    })
}

/// Unpack a container, returning its header and values
pub fn unpack(data: &[u8], max_quotient: u64) -> Result<(PackInfo, Vec<i64>)> {
    let info = read_pack_info(data)?;
    let codec = CodecOptions::new(info.m)
        .with_max_quotient(max_quotient)
        .codec()?;
    let count = usize::try_from(info.count).context("Value count does not fit in memory")?;

    let values = decode_all_with(&data[HEADER_SIZE..], codec, count)
        .context("Failed to unpack values")?;
    Ok((info, values))
}

fn read_array(bytes: &[u8]) -> Result<[u8; 8]> {
    bytes
        .try_into()
        .context("Invalid packed file: short header field")
}

/// Divisor recommendation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    pub m: u64,
    pub count: usize,
    pub total_bits: u64,
    pub bits_per_value: f64,
}

/// Recommend a divisor for the values
pub fn estimate(values: &[i64]) -> Result<Estimate> {
    let m = librice::estimate_parameter(values).context("Failed to pick a divisor")?;
    let total_bits = librice::stream_bits(values, m).context("Failed to size stream")?;
    let bits_per_value = if values.is_empty() {
        0.0
    } else {
        total_bits as f64 / values.len() as f64
    };

    Ok(Estimate {
        m,
        count: values.len(),
        total_bits,
        bits_per_value,
    })
}
